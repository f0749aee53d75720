use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use log::debug;
use rust_decimal::Decimal;

use super::report_export::render_report;
use super::reports_model::{MonthlyReport, MonthlyTrendPoint, ReportDocument, ReportFormat};
use crate::auth::Session;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, REPORT_TREND_MONTHS};
use crate::errors::Result;
use crate::expenses::{CategoryAggregation, Expense, ExpenseQuery, ExpenseRepositoryTrait};
use crate::incomes::{total_monthly_income, IncomeRepositoryTrait};
use crate::utils::time_utils::{month_bounds, month_label, shift_month};

/// Trait for monthly report operations
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    async fn get_monthly_report(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<MonthlyReport>;

    async fn export_monthly_report(
        &self,
        session: &Session,
        year: i32,
        month: u32,
        format: ReportFormat,
        now: DateTime<Utc>,
    ) -> Result<ReportDocument>;
}

pub struct ReportService {
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    income_repo: Arc<dyn IncomeRepositoryTrait>,
    timezone: Tz,
}

impl ReportService {
    pub fn new(
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        income_repo: Arc<dyn IncomeRepositoryTrait>,
        timezone: Tz,
    ) -> Self {
        ReportService {
            expense_repo,
            income_repo,
            timezone,
        }
    }
}

fn expenses_in_month(expenses: &[Expense], year: i32, month: u32) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .collect()
}

fn sum_amounts(expenses: &[&Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn get_monthly_report(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<MonthlyReport> {
        let (period_start, period_end) = month_bounds(year, month)?;
        let (first_year, first_month) = shift_month(year, month, -(REPORT_TREND_MONTHS as i32 - 1));
        let (window_start, _) = month_bounds(first_year, first_month)?;

        let query = ExpenseQuery::for_user(session.user_id()).between(window_start, period_end);
        let (incomes, expenses) = futures::try_join!(
            self.income_repo
                .list_incomes(session, Some(session.user_id())),
            self.expense_repo.list_expenses(session, &query),
        )?;

        let total_income = total_monthly_income(&incomes);
        let in_period = expenses_in_month(&expenses, year, month);
        let categories = CategoryAggregation::from_records(in_period.iter().copied())
            .into_entries()
            .into_iter()
            .map(|mut line| {
                line.total = line.total.round_dp(DISPLAY_DECIMAL_PRECISION);
                line
            })
            .collect();
        let total_expenses = sum_amounts(&in_period);

        let trend = (0..REPORT_TREND_MONTHS as i32)
            .rev()
            .map(|back| {
                let (y, m) = shift_month(year, month, -back);
                MonthlyTrendPoint {
                    year: y,
                    month: m,
                    label: month_label(m).to_string(),
                    income: total_income.round_dp(DISPLAY_DECIMAL_PRECISION),
                    expenses: sum_amounts(&expenses_in_month(&expenses, y, m))
                        .round_dp(DISPLAY_DECIMAL_PRECISION),
                }
            })
            .collect();

        debug!(
            "Report {}-{:02} for {}: {} expenses in period, {} in trend window",
            year,
            month,
            session.user_id(),
            in_period.len(),
            expenses.len()
        );

        Ok(MonthlyReport {
            year,
            month,
            period_label: format!("{} {}", month_label(month), year),
            period_start,
            period_end,
            total_income: total_income.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_expenses: total_expenses.round_dp(DISPLAY_DECIMAL_PRECISION),
            net_balance: (total_income - total_expenses).round_dp(DISPLAY_DECIMAL_PRECISION),
            categories,
            trend,
        })
    }

    async fn export_monthly_report(
        &self,
        session: &Session,
        year: i32,
        month: u32,
        format: ReportFormat,
        now: DateTime<Utc>,
    ) -> Result<ReportDocument> {
        let report = self.get_monthly_report(session, year, month).await?;
        render_report(&report, format, now, self.timezone)
    }
}
