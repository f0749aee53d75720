use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use log::{debug, warn};

use super::daily_tips::daily_tip;
use super::dashboard_model::DashboardSummary;
use crate::auth::Session;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, RECENT_EXPENSES_LIMIT};
use crate::errors::Result;
use crate::expenses::{CategoryAggregation, Expense, ExpenseQuery, ExpenseRepositoryTrait};
use crate::incomes::{monthly_income, Income, IncomeRepositoryTrait};
use crate::utils::time_utils::{first_day_of_month, local_date};

/// Trait for dashboard assembly
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    async fn get_dashboard(&self, session: &Session, now: DateTime<Utc>)
        -> Result<DashboardSummary>;
}

pub struct DashboardService {
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    income_repo: Arc<dyn IncomeRepositoryTrait>,
    timezone: Tz,
}

impl DashboardService {
    pub fn new(
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        income_repo: Arc<dyn IncomeRepositoryTrait>,
        timezone: Tz,
    ) -> Self {
        DashboardService {
            expense_repo,
            income_repo,
            timezone,
        }
    }
}

/// The `limit` most recently created expenses, newest first.
pub fn most_recent_expenses(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut recent = expenses.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn get_dashboard(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary> {
        let today = local_date(now, self.timezone);
        let period_start = first_day_of_month(today);
        let query = ExpenseQuery::for_user(session.user_id()).between(period_start, today);

        let (incomes, expenses) = futures::join!(
            self.income_repo
                .list_incomes(session, Some(session.user_id())),
            self.expense_repo.list_expenses(session, &query),
        );

        let mut partial = false;
        let incomes: Vec<Income> = incomes.unwrap_or_else(|e| {
            warn!("Dashboard income fetch failed, showing no income: {}", e);
            partial = true;
            Vec::new()
        });
        let expenses: Vec<Expense> = expenses.unwrap_or_else(|e| {
            warn!("Dashboard expense fetch failed, showing no expenses: {}", e);
            partial = true;
            Vec::new()
        });

        let income = monthly_income(&incomes);
        let monthly_expenses = CategoryAggregation::from_records(&expenses).grand_total();
        let balance = income.total - monthly_expenses;
        debug!(
            "Dashboard for {}: income {}, expenses {} over {} records",
            session.user_id(),
            income.total,
            monthly_expenses,
            expenses.len()
        );

        Ok(DashboardSummary {
            period_start,
            period_end: today,
            monthly_income: income.total.round_dp(DISPLAY_DECIMAL_PRECISION),
            one_time_income: income.one_time.round_dp(DISPLAY_DECIMAL_PRECISION),
            monthly_expenses: monthly_expenses.round_dp(DISPLAY_DECIMAL_PRECISION),
            balance: balance.round_dp(DISPLAY_DECIMAL_PRECISION),
            recent_expenses: most_recent_expenses(&expenses, RECENT_EXPENSES_LIMIT),
            daily_tip: daily_tip(today.day()).to_string(),
            partial,
        })
    }
}
