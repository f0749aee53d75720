//! Goals domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};

/// Lifecycle of a savings goal. `Completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    Active,
    Completed,
}

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn status(&self) -> GoalStatus {
        if self.completed || self.current_amount >= self.target_amount {
            GoalStatus::Completed
        } else {
            GoalStatus::Active
        }
    }

    /// Fraction of the target reached, clamped to `[0, 1]`.
    pub fn progress_ratio(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ONE;
        }
        let ratio = self
            .current_amount
            .checked_div(self.target_amount)
            .unwrap_or(Decimal::ONE);
        ratio.clamp(Decimal::ZERO, Decimal::ONE)
    }

    /// Percentage of the target reached; overshoot is reported as 100.
    pub fn progress_percentage(&self) -> Decimal {
        self.progress_ratio() * dec!(100)
    }

    /// Amount still needed, never below zero.
    pub fn remaining(&self) -> Decimal {
        self.signed_remaining().max(Decimal::ZERO)
    }

    /// `target - current`, negative once the goal is overshot.
    pub fn signed_remaining(&self) -> Decimal {
        self.target_amount - self.current_amount
    }
}

/// Computes the goal state after depositing `amount`.
///
/// Rejects non-positive deposits. Completion never reverts once reached.
pub fn apply_deposit(goal: &Goal, amount: Decimal) -> Result<Goal> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::non_positive("deposit amount").into());
    }
    let current_amount = goal.current_amount + amount;
    Ok(Goal {
        current_amount,
        completed: goal.completed || current_amount >= goal.target_amount,
        ..goal.clone()
    })
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Decimal,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(ValidationError::non_positive("targetAmount").into());
        }
        Ok(())
    }
}

/// Request body for a deposit into a goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalDeposit {
    pub amount: Decimal,
}

/// Conditional progress write: applies only while the stored
/// `current_amount` still equals `expected_current_amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgressUpdate {
    pub goal_id: String,
    pub expected_current_amount: Decimal,
    pub current_amount: Decimal,
    pub completed: bool,
}

impl GoalProgressUpdate {
    pub fn between(observed: &Goal, updated: &Goal) -> Self {
        GoalProgressUpdate {
            goal_id: observed.id.clone(),
            expected_current_amount: observed.current_amount,
            current_amount: updated.current_amount,
            completed: updated.completed,
        }
    }
}

/// A goal with its derived display figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub status: GoalStatus,
    pub progress_percentage: Decimal,
    pub remaining: Decimal,
}

impl From<Goal> for GoalWithProgress {
    fn from(goal: Goal) -> Self {
        GoalWithProgress {
            status: goal.status(),
            progress_percentage: goal
                .progress_percentage()
                .round_dp(DISPLAY_DECIMAL_PRECISION),
            remaining: goal.remaining(),
            goal,
        }
    }
}
