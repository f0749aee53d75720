//! Row models for the `goals` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetpal_core::goals::{Goal, GoalProgressUpdate, NewGoal};

pub const GOALS_TABLE: &str = "goals";

#[derive(Debug, Clone, Deserialize)]
pub struct GoalRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Option<Decimal>,
    #[serde(default)]
    pub completed: Option<bool>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGoalRow {
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgressPatch {
    pub current_amount: Decimal,
    pub completed: bool,
}

// Conversion to domain models
impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            target_amount: row.target_amount,
            current_amount: row.current_amount.unwrap_or(Decimal::ZERO),
            completed: row.completed.unwrap_or(false),
            created_at: row.created_at,
        }
    }
}

impl NewGoalRow {
    pub fn for_user(user_id: &str, new_goal: NewGoal) -> Self {
        NewGoalRow {
            user_id: user_id.to_string(),
            title: new_goal.title,
            target_amount: new_goal.target_amount,
            current_amount: Decimal::ZERO,
            completed: false,
        }
    }
}

impl From<&GoalProgressUpdate> for GoalProgressPatch {
    fn from(update: &GoalProgressUpdate) -> Self {
        GoalProgressPatch {
            current_amount: update.current_amount,
            completed: update.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nullable_progress_columns_default() {
        let row: GoalRow = serde_json::from_str(
            r#"{"id":"g1","user_id":"u1","title":"Laptop","target_amount":350000,
                "current_amount":null,"completed":null,"created_at":"2025-01-05T08:00:00Z"}"#,
        )
        .unwrap();
        let goal = Goal::from(row);
        assert_eq!(goal.current_amount, dec!(0));
        assert!(!goal.completed);
        assert_eq!(goal.target_amount, dec!(350000));
    }

    #[test]
    fn test_patch_only_carries_progress() {
        let update = GoalProgressUpdate {
            goal_id: "g1".to_string(),
            expected_current_amount: dec!(100),
            current_amount: dec!(150),
            completed: false,
        };
        let json = serde_json::to_value(GoalProgressPatch::from(&update)).unwrap();
        assert_eq!(json, serde_json::json!({"current_amount": 150.0, "completed": false}));
    }
}
