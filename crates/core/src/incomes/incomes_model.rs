//! Income domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How often an income is received.
///
/// Stored rows carrying any other tag are kept as `Unrecognized` and
/// normalized like a one-time income.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IncomeFrequency {
    OneTime,
    Weekly,
    Monthly,
    Unrecognized(String),
}

impl IncomeFrequency {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "one-time" => IncomeFrequency::OneTime,
            "weekly" => IncomeFrequency::Weekly,
            "monthly" => IncomeFrequency::Monthly,
            other => IncomeFrequency::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IncomeFrequency::OneTime => "one-time",
            IncomeFrequency::Weekly => "weekly",
            IncomeFrequency::Monthly => "monthly",
            IncomeFrequency::Unrecognized(tag) => tag,
        }
    }

    /// Weekly and monthly incomes recur; everything else is counted once.
    pub fn is_recurring(&self) -> bool {
        matches!(self, IncomeFrequency::Weekly | IncomeFrequency::Monthly)
    }
}

impl fmt::Display for IncomeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IncomeFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IncomeFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(IncomeFrequency::from_tag(&tag))
    }
}

/// Domain model representing an income source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: Decimal,
    pub frequency: IncomeFrequency,
    pub created_at: DateTime<Utc>,
}

/// Input model for recording a new income
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub title: String,
    pub amount: Decimal,
    pub frequency: IncomeFrequency,
}

/// Monthly-equivalent income, split by whether the source recurs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncome {
    pub total: Decimal,
    pub recurring: Decimal,
    /// Portion of `total` contributed by one-time or unrecognized entries.
    ///
    /// These are added in full every month the figure is computed.
    pub one_time: Decimal,
}
