use crate::auth::Session;
use crate::constants::GOAL_DEPOSIT_MAX_ATTEMPTS;
use crate::errors::{Error, Result, ValidationError};
use crate::goals::goals_model::{apply_deposit, Goal, GoalProgressUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }

    async fn load_owned_goal(&self, session: &Session, goal_id: &str) -> Result<Goal> {
        let goal = self.goal_repo.get_goal(session, goal_id).await?;
        if goal.user_id != session.user_id() {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        Ok(goal)
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn get_goals(&self, session: &Session) -> Result<Vec<Goal>> {
        self.goal_repo
            .list_goals(session, Some(session.user_id()))
            .await
    }

    async fn create_goal(&self, session: &Session, mut new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        new_goal.title = new_goal.title.trim().to_string();
        self.goal_repo.insert_goal(session, new_goal).await
    }

    async fn deposit(&self, session: &Session, goal_id: &str, amount: Decimal) -> Result<Goal> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::non_positive("deposit amount").into());
        }

        for attempt in 1..=GOAL_DEPOSIT_MAX_ATTEMPTS {
            let observed = self.load_owned_goal(session, goal_id).await?;
            let updated = apply_deposit(&observed, amount)?;
            let update = GoalProgressUpdate::between(&observed, &updated);

            match self.goal_repo.update_goal_progress(session, &update).await? {
                Some(stored) => {
                    if stored.completed && !observed.completed {
                        info!("Goal {} reached its target", goal_id);
                    }
                    return Ok(stored);
                }
                None => {
                    warn!(
                        "Goal {} changed during deposit (attempt {}/{})",
                        goal_id, attempt, GOAL_DEPOSIT_MAX_ATTEMPTS
                    );
                }
            }
        }

        Err(Error::ConcurrentModification(format!(
            "Goal {} kept changing while depositing; please retry",
            goal_id
        )))
    }

    async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<()> {
        let deleted = self.goal_repo.delete_goal(session, goal_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        debug!("Deleted goal {} for user {}", goal_id, session.user_id());
        Ok(())
    }
}
