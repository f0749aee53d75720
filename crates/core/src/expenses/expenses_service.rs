use crate::auth::Session;
use crate::errors::{Result, ValidationError};
use crate::expenses::expenses_model::{Expense, ExpenseCategory, ExpenseQuery, NewExpense};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::utils::time_utils::local_date;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct ExpenseService {
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    timezone: Tz,
}

impl ExpenseService {
    pub fn new(expense_repo: Arc<dyn ExpenseRepositoryTrait>, timezone: Tz) -> Self {
        ExpenseService {
            expense_repo,
            timezone,
        }
    }

    /// Applies entry-time defaults and validates a new expense.
    fn prepare(&self, mut new_expense: NewExpense) -> Result<NewExpense> {
        if new_expense.amount <= Decimal::ZERO {
            return Err(ValidationError::non_positive("amount").into());
        }

        let category = match new_expense.category.take() {
            Some(ExpenseCategory::Custom(label)) if label.trim().is_empty() => {
                ExpenseCategory::Other
            }
            Some(category) => category,
            None => ExpenseCategory::Other,
        };
        new_expense.category = Some(category);

        new_expense.description = new_expense
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if new_expense.date.is_none() {
            new_expense.date = Some(local_date(Utc::now(), self.timezone));
        }
        Ok(new_expense)
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    async fn get_expenses(
        &self,
        session: &Session,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ValidationError::InvalidInput(format!(
                    "Start date {} is after end date {}",
                    from, to
                ))
                .into());
            }
        }
        let query = ExpenseQuery::for_user(session.user_id())
            .from_date(from)
            .to_date(to);
        self.expense_repo.list_expenses(session, &query).await
    }

    async fn add_expense(&self, session: &Session, new_expense: NewExpense) -> Result<Expense> {
        let prepared = self.prepare(new_expense)?;
        debug!(
            "Recording expense of {} for user {}",
            prepared.amount,
            session.user_id()
        );
        self.expense_repo.insert_expense(session, prepared).await
    }
}
