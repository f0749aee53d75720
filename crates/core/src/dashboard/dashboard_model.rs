use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expenses::Expense;

/// Single-period financial summary for the current calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Normalized monthly income over all of the user's incomes.
    pub monthly_income: Decimal,
    /// Part of `monthly_income` that comes from one-time or unrecognized incomes.
    pub one_time_income: Decimal,
    pub monthly_expenses: Decimal,
    /// `monthly_income - monthly_expenses`; may be negative.
    pub balance: Decimal,
    /// Up to five most recently created expenses in the period.
    pub recent_expenses: Vec<Expense>,
    pub daily_tip: String,
    /// Set when a fetch failed and its data was treated as empty.
    pub partial: bool,
}
