//! Expense domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fixed vocabulary of expense categories.
///
/// Labels outside the vocabulary are kept verbatim in `Custom` so reports
/// can bucket them separately. `Other` is only the default at entry time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Data,
    Books,
    Hangout,
    #[default]
    Other,
    Custom(String),
}

impl ExpenseCategory {
    /// Parses a stored label. Unknown labels (including the empty string) are preserved.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Food" => ExpenseCategory::Food,
            "Transport" => ExpenseCategory::Transport,
            "Data" => ExpenseCategory::Data,
            "Books" => ExpenseCategory::Books,
            "Hangout" => ExpenseCategory::Hangout,
            "Other" => ExpenseCategory::Other,
            other => ExpenseCategory::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Data => "Data",
            ExpenseCategory::Books => "Books",
            ExpenseCategory::Hangout => "Hangout",
            ExpenseCategory::Other => "Other",
            ExpenseCategory::Custom(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ExpenseCategory::Custom(_))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ExpenseCategory {
    fn from(label: &str) -> Self {
        ExpenseCategory::from_label(label)
    }
}

impl Serialize for ExpenseCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExpenseCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(ExpenseCategory::from_label(&label))
    }
}

/// Domain model representing an expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Input model for recording a new expense
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date of the expense; defaults to today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Filter for listing expenses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseQuery {
    /// `None` scans every user's rows (admin analytics).
    pub owner: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExpenseQuery {
    pub fn for_user(user_id: &str) -> Self {
        ExpenseQuery {
            owner: Some(user_id.to_string()),
            ..Default::default()
        }
    }

    pub fn platform() -> Self {
        ExpenseQuery::default()
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn from_date(mut self, from: Option<NaiveDate>) -> Self {
        self.from = from;
        self
    }

    pub fn to_date(mut self, to: Option<NaiveDate>) -> Self {
        self.to = to;
        self
    }

    /// Whether `date` passes the date bounds of this query.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}
