//! Row models for the `expenses` table.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetpal_core::errors::{Error, Result, ValidationError};
use budgetpal_core::expenses::{Expense, ExpenseCategory, NewExpense};

pub const EXPENSES_TABLE: &str = "expenses";

#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewExpenseRow {
    pub user_id: String,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

// Conversion to domain models
impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            category: row
                .category
                .as_deref()
                .map(ExpenseCategory::from_label)
                .unwrap_or_default(),
            description: row.description,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

impl NewExpenseRow {
    pub fn for_user(user_id: &str, new_expense: NewExpense) -> Result<Self> {
        let date = new_expense
            .date
            .ok_or_else(|| Error::from(ValidationError::MissingField("date".to_string())))?;
        Ok(NewExpenseRow {
            user_id: user_id.to_string(),
            amount: new_expense.amount,
            category: new_expense.category.unwrap_or_default().as_str().to_string(),
            description: new_expense.description,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_with_unknown_category_is_kept_verbatim() {
        let row: ExpenseRow = serde_json::from_str(
            r#"{"id":"e1","user_id":"u1","amount":1500.5,"category":"Gym",
                "description":null,"date":"2025-03-04","created_at":"2025-03-04T10:15:00.123+00:00"}"#,
        )
        .unwrap();
        let expense = Expense::from(row);

        assert_eq!(expense.amount, dec!(1500.5));
        assert_eq!(expense.category, ExpenseCategory::Custom("Gym".to_string()));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    }

    #[test]
    fn test_missing_category_defaults_to_other() {
        let row: ExpenseRow = serde_json::from_str(
            r#"{"id":"e1","user_id":"u1","amount":20,"date":"2025-03-04","created_at":"2025-03-04T10:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(Expense::from(row).category, ExpenseCategory::Other);
    }

    #[test]
    fn test_new_row_requires_resolved_date() {
        let result = NewExpenseRow::for_user(
            "u1",
            NewExpense {
                amount: dec!(10),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
