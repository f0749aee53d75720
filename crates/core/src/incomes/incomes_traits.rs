use crate::auth::Session;
use crate::errors::Result;
use crate::incomes::incomes_model::{Income, MonthlyIncome, NewIncome};
use async_trait::async_trait;

/// Trait for income repository operations
#[async_trait]
pub trait IncomeRepositoryTrait: Send + Sync {
    /// Lists incomes owned by `owner`, or every user's incomes when `owner` is `None`.
    async fn list_incomes(&self, session: &Session, owner: Option<&str>) -> Result<Vec<Income>>;
    async fn insert_income(&self, session: &Session, new_income: NewIncome) -> Result<Income>;
}

/// Trait for income service operations
#[async_trait]
pub trait IncomeServiceTrait: Send + Sync {
    async fn get_incomes(&self, session: &Session) -> Result<Vec<Income>>;
    async fn add_income(&self, session: &Session, new_income: NewIncome) -> Result<Income>;
    async fn get_monthly_income(&self, session: &Session) -> Result<MonthlyIncome>;
}
