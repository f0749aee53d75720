//! Converts income amounts to monthly-equivalent figures.

use rust_decimal::Decimal;

use super::incomes_model::{Income, IncomeFrequency, MonthlyIncome};
use crate::constants::WEEKS_PER_MONTH;

/// Monthly-equivalent value of a single income.
///
/// - `monthly`: unchanged
/// - `weekly`: `amount * 4.33`
/// - `one-time` and unrecognized tags: unchanged, i.e. the full amount is
///   counted as this month's income. Because nothing scopes one-time incomes
///   to the month they were received, a windfall is counted again in every
///   month the figure is recomputed.
pub fn normalize_monthly(amount: Decimal, frequency: &IncomeFrequency) -> Decimal {
    match frequency {
        IncomeFrequency::Monthly => amount,
        IncomeFrequency::Weekly => amount * WEEKS_PER_MONTH,
        IncomeFrequency::OneTime | IncomeFrequency::Unrecognized(_) => amount,
    }
}

/// Sum of the monthly-equivalent value of every income.
pub fn total_monthly_income(incomes: &[Income]) -> Decimal {
    monthly_income(incomes).total
}

pub fn monthly_income(incomes: &[Income]) -> MonthlyIncome {
    incomes
        .iter()
        .fold(MonthlyIncome::default(), |mut acc, income| {
            let normalized = normalize_monthly(income.amount, &income.frequency);
            acc.total += normalized;
            if income.frequency.is_recurring() {
                acc.recurring += normalized;
            } else {
                acc.one_time += normalized;
            }
            acc
        })
}
