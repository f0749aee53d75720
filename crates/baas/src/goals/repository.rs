use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use budgetpal_core::auth::Session;
use budgetpal_core::errors::Error;
use budgetpal_core::goals::{Goal, GoalProgressUpdate, GoalRepositoryTrait, NewGoal};
use budgetpal_core::Result;

use super::model::{GoalProgressPatch, GoalRow, NewGoalRow, GOALS_TABLE};
use crate::client::BaasClient;
use crate::query::RestQuery;

pub struct GoalRepository {
    client: Arc<BaasClient>,
}

impl GoalRepository {
    pub fn new(client: Arc<BaasClient>) -> Self {
        GoalRepository { client }
    }
}

/// Row filter for a conditional progress write: matches only while the
/// stored amount is still the one the caller observed.
pub(crate) fn progress_filter(update: &GoalProgressUpdate) -> RestQuery {
    RestQuery::new()
        .eq("id", &update.goal_id)
        .eq("current_amount", update.expected_current_amount)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn list_goals(&self, session: &Session, owner: Option<&str>) -> Result<Vec<Goal>> {
        let mut query = RestQuery::new().select("*");
        if let Some(owner) = owner {
            query = query.eq("user_id", owner);
        }
        let rows: Vec<GoalRow> = self
            .client
            .select(
                "load goals",
                &session.access_token,
                GOALS_TABLE,
                query.order_desc(&["created_at", "id"]),
            )
            .await?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn get_goal(&self, session: &Session, goal_id: &str) -> Result<Goal> {
        let rows: Vec<GoalRow> = self
            .client
            .select(
                "load goal",
                &session.access_token,
                GOALS_TABLE,
                RestQuery::new().select("*").eq("id", goal_id),
            )
            .await?;
        rows.into_iter()
            .next()
            .map(Goal::from)
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
    }

    async fn insert_goal(&self, session: &Session, new_goal: NewGoal) -> Result<Goal> {
        let row = NewGoalRow::for_user(session.user_id(), new_goal);
        let stored: GoalRow = self
            .client
            .insert("create goal", &session.access_token, GOALS_TABLE, &row)
            .await?;
        Ok(stored.into())
    }

    async fn update_goal_progress(
        &self,
        session: &Session,
        update: &GoalProgressUpdate,
    ) -> Result<Option<Goal>> {
        let rows: Vec<GoalRow> = self
            .client
            .update(
                "add to goal",
                &session.access_token,
                GOALS_TABLE,
                progress_filter(update),
                &GoalProgressPatch::from(update),
            )
            .await?;
        if rows.is_empty() {
            debug!(
                "Goal {} no longer holds {}; write skipped",
                update.goal_id, update.expected_current_amount
            );
        }
        Ok(rows.into_iter().next().map(Goal::from))
    }

    async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<usize> {
        let deleted: Vec<GoalRow> = self
            .client
            .delete(
                "delete goal",
                &session.access_token,
                GOALS_TABLE,
                RestQuery::new()
                    .eq("id", goal_id)
                    .eq("user_id", session.user_id()),
            )
            .await?;
        Ok(deleted.len())
    }
}
