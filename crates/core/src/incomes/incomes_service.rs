use crate::auth::Session;
use crate::errors::{Result, ValidationError};
use crate::incomes::income_normalizer::monthly_income;
use crate::incomes::incomes_model::{Income, IncomeFrequency, MonthlyIncome, NewIncome};
use crate::incomes::incomes_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct IncomeService {
    income_repo: Arc<dyn IncomeRepositoryTrait>,
}

impl IncomeService {
    pub fn new(income_repo: Arc<dyn IncomeRepositoryTrait>) -> Self {
        IncomeService { income_repo }
    }

    fn validate(new_income: &NewIncome) -> Result<()> {
        if new_income.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if new_income.amount <= Decimal::ZERO {
            return Err(ValidationError::non_positive("amount").into());
        }
        if let IncomeFrequency::Unrecognized(tag) = &new_income.frequency {
            return Err(ValidationError::UnsupportedFrequency(tag.clone()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl IncomeServiceTrait for IncomeService {
    async fn get_incomes(&self, session: &Session) -> Result<Vec<Income>> {
        self.income_repo
            .list_incomes(session, Some(session.user_id()))
            .await
    }

    async fn add_income(&self, session: &Session, mut new_income: NewIncome) -> Result<Income> {
        Self::validate(&new_income)?;
        new_income.title = new_income.title.trim().to_string();
        debug!(
            "Recording {} income of {} for user {}",
            new_income.frequency,
            new_income.amount,
            session.user_id()
        );
        self.income_repo.insert_income(session, new_income).await
    }

    async fn get_monthly_income(&self, session: &Session) -> Result<MonthlyIncome> {
        let incomes = self.get_incomes(session).await?;
        Ok(monthly_income(&incomes))
    }
}
