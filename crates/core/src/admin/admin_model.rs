//! Admin analytics models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expenses::CategoryTotal;

/// Auxiliary tables scanned only for their `user_id` foreign keys.
///
/// Expenses, incomes and goals come from their own repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySource {
    StudySessions,
    Todos,
}

impl ActivitySource {
    pub fn table_name(&self) -> &'static str {
        match self {
            ActivitySource::StudySessions => "study_sessions",
            ActivitySource::Todos => "todos",
        }
    }
}

/// Minimal projection of any user-owned row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// First and last activity observed for one user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub user_id: String,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub record_count: usize,
}

/// Platform-wide figures for the admin dashboard.
///
/// User counts are inferred from foreign keys in activity tables, not read
/// from the auth backend's user registry: users who never recorded anything
/// are invisible here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_users: usize,
    pub new_users_this_month: usize,
    pub active_users: usize,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_goals: usize,
    pub completed_goals: usize,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub recent_users: Vec<UserActivity>,
    pub generated_at: DateTime<Utc>,
}
