use crate::auth::Session;
use crate::errors::Result;
use crate::expenses::expenses_model::{Expense, ExpenseQuery, NewExpense};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    async fn list_expenses(&self, session: &Session, query: &ExpenseQuery) -> Result<Vec<Expense>>;
    /// `new_expense.date` is always resolved by the caller.
    async fn insert_expense(&self, session: &Session, new_expense: NewExpense) -> Result<Expense>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    async fn get_expenses(
        &self,
        session: &Session,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>>;
    async fn add_expense(&self, session: &Session, new_expense: NewExpense) -> Result<Expense>;
}
