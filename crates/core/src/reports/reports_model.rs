use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, ValidationError};
use crate::expenses::CategoryTotal;

/// One month of the report's trend chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Income, expenses and category breakdown for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub period_label: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Normalized monthly income over all incomes; incomes carry no date, so
    /// this is not scoped to the report month.
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    /// Category totals in the order categories first appear in the month.
    pub categories: Vec<CategoryTotal>,
    /// Six months ending with the report month, oldest first.
    pub trend: Vec<MonthlyTrendPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text/plain; charset=utf-8",
            ReportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(ValidationError::InvalidInput(format!(
                "Unsupported report format '{}'",
                other
            ))
            .into()),
        }
    }
}

/// A rendered report ready for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}
