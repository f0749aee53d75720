use std::sync::Arc;

use async_trait::async_trait;

use budgetpal_core::auth::Session;
use budgetpal_core::expenses::{Expense, ExpenseQuery, ExpenseRepositoryTrait, NewExpense};
use budgetpal_core::Result;

use super::model::{ExpenseRow, NewExpenseRow, EXPENSES_TABLE};
use crate::client::BaasClient;
use crate::query::RestQuery;

pub struct ExpenseRepository {
    client: Arc<BaasClient>,
}

impl ExpenseRepository {
    pub fn new(client: Arc<BaasClient>) -> Self {
        ExpenseRepository { client }
    }
}

pub(crate) fn expense_filter(query: &ExpenseQuery) -> RestQuery {
    let mut rest = RestQuery::new().select("*");
    if let Some(owner) = &query.owner {
        rest = rest.eq("user_id", owner);
    }
    if let Some(from) = query.from {
        rest = rest.gte("date", from);
    }
    if let Some(to) = query.to {
        rest = rest.lte("date", to);
    }
    rest.order_desc(&["date", "id"])
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    async fn list_expenses(&self, session: &Session, query: &ExpenseQuery) -> Result<Vec<Expense>> {
        let rows: Vec<ExpenseRow> = self
            .client
            .select(
                "load expenses",
                &session.access_token,
                EXPENSES_TABLE,
                expense_filter(query),
            )
            .await?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn insert_expense(&self, session: &Session, new_expense: NewExpense) -> Result<Expense> {
        let row = NewExpenseRow::for_user(session.user_id(), new_expense)?;
        let stored: ExpenseRow = self
            .client
            .insert("add expense", &session.access_token, EXPENSES_TABLE, &row)
            .await?;
        Ok(stored.into())
    }
}
