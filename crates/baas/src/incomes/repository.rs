use std::sync::Arc;

use async_trait::async_trait;

use budgetpal_core::auth::Session;
use budgetpal_core::incomes::{Income, IncomeRepositoryTrait, NewIncome};
use budgetpal_core::Result;

use super::model::{IncomeRow, NewIncomeRow, INCOMES_TABLE};
use crate::client::BaasClient;
use crate::query::RestQuery;

pub struct IncomeRepository {
    client: Arc<BaasClient>,
}

impl IncomeRepository {
    pub fn new(client: Arc<BaasClient>) -> Self {
        IncomeRepository { client }
    }
}

#[async_trait]
impl IncomeRepositoryTrait for IncomeRepository {
    async fn list_incomes(&self, session: &Session, owner: Option<&str>) -> Result<Vec<Income>> {
        let mut query = RestQuery::new().select("*");
        if let Some(owner) = owner {
            query = query.eq("user_id", owner);
        }
        let rows: Vec<IncomeRow> = self
            .client
            .select(
                "load incomes",
                &session.access_token,
                INCOMES_TABLE,
                query.order_desc(&["created_at", "id"]),
            )
            .await?;
        Ok(rows.into_iter().map(Income::from).collect())
    }

    async fn insert_income(&self, session: &Session, new_income: NewIncome) -> Result<Income> {
        let row = NewIncomeRow::for_user(session.user_id(), new_income);
        let stored: IncomeRow = self
            .client
            .insert("add income", &session.access_token, INCOMES_TABLE, &row)
            .await?;
        Ok(stored.into())
    }
}
