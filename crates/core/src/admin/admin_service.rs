use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use log::{debug, warn};

use super::admin_model::{ActivityRecord, ActivitySource, PlatformStats, UserActivity};
use super::admin_traits::{ActivityRepositoryTrait, AdminServiceTrait};
use crate::auth::Session;
use crate::constants::{ACTIVE_USER_WINDOW_DAYS, DISPLAY_DECIMAL_PRECISION, RECENT_USERS_LIMIT};
use crate::errors::{Error, Result};
use crate::expenses::{CategoryAggregation, ExpenseQuery, ExpenseRepositoryTrait};
use crate::goals::GoalRepositoryTrait;
use crate::incomes::{total_monthly_income, IncomeRepositoryTrait};
use crate::utils::time_utils::start_of_local_month;

/// Folds activity records into per-user first/last seen timestamps.
pub fn summarize_user_activity<I>(records: I) -> Vec<UserActivity>
where
    I: IntoIterator<Item = ActivityRecord>,
{
    let mut by_user: HashMap<String, UserActivity> = HashMap::new();
    for record in records {
        by_user
            .entry(record.user_id.clone())
            .and_modify(|activity| {
                activity.first_seen = activity.first_seen.min(record.created_at);
                activity.last_seen = activity.last_seen.max(record.created_at);
                activity.record_count += 1;
            })
            .or_insert_with(|| UserActivity {
                user_id: record.user_id,
                first_seen: record.created_at,
                last_seen: record.created_at,
                record_count: 1,
            });
    }

    let mut users: Vec<UserActivity> = by_user.into_values().collect();
    users.sort_by(|a, b| {
        b.last_seen
            .cmp(&a.last_seen)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    users
}

pub struct AdminService {
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    income_repo: Arc<dyn IncomeRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    activity_repo: Arc<dyn ActivityRepositoryTrait>,
    timezone: Tz,
}

impl AdminService {
    pub fn new(
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        income_repo: Arc<dyn IncomeRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        activity_repo: Arc<dyn ActivityRepositoryTrait>,
        timezone: Tz,
    ) -> Self {
        AdminService {
            expense_repo,
            income_repo,
            goal_repo,
            activity_repo,
            timezone,
        }
    }

    /// Rows from tables owned by companion apps. A missing table counts as empty.
    async fn auxiliary_activity(
        &self,
        session: &Session,
        source: ActivitySource,
    ) -> Vec<ActivityRecord> {
        match self.activity_repo.list_activity(session, source).await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Skipping {} in user activity scan: {}",
                    source.table_name(),
                    e
                );
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl AdminServiceTrait for AdminService {
    async fn get_platform_stats(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<PlatformStats> {
        if !session.identity.is_admin() {
            return Err(Error::Forbidden(
                "Admin analytics require the admin role".to_string(),
            ));
        }

        let platform = ExpenseQuery::platform();
        let (expenses, incomes, goals) = futures::try_join!(
            self.expense_repo.list_expenses(session, &platform),
            self.income_repo.list_incomes(session, None),
            self.goal_repo.list_goals(session, None),
        )?;
        let (study_sessions, todos) = futures::join!(
            self.auxiliary_activity(session, ActivitySource::StudySessions),
            self.auxiliary_activity(session, ActivitySource::Todos),
        );
        debug!(
            "Admin scan: {} expenses, {} incomes, {} goals, {} study sessions, {} todos",
            expenses.len(),
            incomes.len(),
            goals.len(),
            study_sessions.len(),
            todos.len()
        );

        let activity = expenses
            .iter()
            .map(|e| ActivityRecord {
                user_id: e.user_id.clone(),
                created_at: e.created_at,
            })
            .chain(incomes.iter().map(|i| ActivityRecord {
                user_id: i.user_id.clone(),
                created_at: i.created_at,
            }))
            .chain(goals.iter().map(|g| ActivityRecord {
                user_id: g.user_id.clone(),
                created_at: g.created_at,
            }))
            .chain(study_sessions)
            .chain(todos);
        let users = summarize_user_activity(activity);

        let month_start = start_of_local_month(now, self.timezone);
        let active_since = now - Duration::days(ACTIVE_USER_WINDOW_DAYS);
        let new_users_this_month = users.iter().filter(|u| u.first_seen >= month_start).count();
        let active_users = users.iter().filter(|u| u.last_seen >= active_since).count();

        let categories = CategoryAggregation::from_records(&expenses);
        let total_expenses = categories.grand_total();

        Ok(PlatformStats {
            total_users: users.len(),
            new_users_this_month,
            active_users,
            total_income: total_monthly_income(&incomes).round_dp(DISPLAY_DECIMAL_PRECISION),
            total_expenses: total_expenses.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_goals: goals.len(),
            completed_goals: goals.iter().filter(|g| g.completed).count(),
            expenses_by_category: categories.sorted_by_total(),
            recent_users: users.into_iter().take(RECENT_USERS_LIMIT).collect(),
            generated_at: now,
        })
    }
}
