use crate::auth::Session;
use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalProgressUpdate, NewGoal};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Lists goals newest first, for `owner` or for every user when `None`.
    async fn list_goals(&self, session: &Session, owner: Option<&str>) -> Result<Vec<Goal>>;
    async fn get_goal(&self, session: &Session, goal_id: &str) -> Result<Goal>;
    async fn insert_goal(&self, session: &Session, new_goal: NewGoal) -> Result<Goal>;
    /// Compare-and-swap on `current_amount`. Returns `None` when the stored
    /// amount no longer matches `update.expected_current_amount`.
    async fn update_goal_progress(
        &self,
        session: &Session,
        update: &GoalProgressUpdate,
    ) -> Result<Option<Goal>>;
    async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn get_goals(&self, session: &Session) -> Result<Vec<Goal>>;
    async fn create_goal(&self, session: &Session, new_goal: NewGoal) -> Result<Goal>;
    async fn deposit(&self, session: &Session, goal_id: &str, amount: Decimal) -> Result<Goal>;
    async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<()>;
}
