//! Row models for the `incomes` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetpal_core::incomes::{Income, IncomeFrequency, NewIncome};

pub const INCOMES_TABLE: &str = "incomes";

#[derive(Debug, Clone, Deserialize)]
pub struct IncomeRow {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub amount: Decimal,
    /// Free-text tag; anything but `one-time`, `weekly` or `monthly` is kept as unrecognized.
    #[serde(default)]
    pub frequency: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewIncomeRow {
    pub user_id: String,
    pub title: String,
    pub amount: Decimal,
    pub frequency: String,
}

// Conversion to domain models
impl From<IncomeRow> for Income {
    fn from(row: IncomeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title.unwrap_or_default(),
            amount: row.amount,
            frequency: IncomeFrequency::from_tag(row.frequency.as_deref().unwrap_or_default()),
            created_at: row.created_at,
        }
    }
}

impl NewIncomeRow {
    pub fn for_user(user_id: &str, new_income: NewIncome) -> Self {
        NewIncomeRow {
            user_id: user_id.to_string(),
            title: new_income.title,
            amount: new_income.amount,
            frequency: new_income.frequency.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_frequency_tags() {
        let row: IncomeRow = serde_json::from_str(
            r#"{"id":"i1","user_id":"u1","title":"Tutoring","amount":10000,
                "frequency":"weekly","created_at":"2025-03-01T09:00:00+00:00"}"#,
        )
        .unwrap();
        let income = Income::from(row);
        assert_eq!(income.frequency, IncomeFrequency::Weekly);
        assert_eq!(income.amount, dec!(10000));

        let odd: IncomeRow = serde_json::from_str(
            r#"{"id":"i2","user_id":"u1","amount":5,"frequency":"daily","created_at":"2025-03-01T09:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(
            Income::from(odd).frequency,
            IncomeFrequency::Unrecognized("daily".to_string())
        );
    }

    #[test]
    fn test_new_row_uses_wire_tag() {
        let row = NewIncomeRow::for_user(
            "u1",
            NewIncome {
                title: "Gift".to_string(),
                amount: dec!(3000),
                frequency: IncomeFrequency::OneTime,
            },
        );
        assert_eq!(row.frequency, "one-time");
        assert_eq!(row.user_id, "u1");
    }
}
