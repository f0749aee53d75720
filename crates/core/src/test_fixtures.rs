//! In-memory repositories and sessions shared by service tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::admin::{ActivityRecord, ActivityRepositoryTrait, ActivitySource};
use crate::auth::{Identity, Role, Session};
use crate::errors::{Error, RemoteError, Result};
use crate::expenses::{Expense, ExpenseCategory, ExpenseQuery, ExpenseRepositoryTrait, NewExpense};
use crate::goals::{Goal, GoalProgressUpdate, GoalRepositoryTrait, NewGoal};
use crate::incomes::{Income, IncomeFrequency, IncomeRepositoryTrait, NewIncome};

pub fn session(user_id: &str, role: Role) -> Session {
    Session {
        access_token: format!("token-{}", user_id),
        refresh_token: None,
        expires_at: None,
        identity: Identity {
            id: user_id.to_string(),
            email: Some(format!("{}@uni.edu", user_id)),
            role,
        },
    }
}

pub fn student(user_id: &str) -> Session {
    session(user_id, Role::Student)
}

pub fn admin(user_id: &str) -> Session {
    session(user_id, Role::Admin)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn expense(
    id: &str,
    user_id: &str,
    amount: Decimal,
    category: &str,
    on: NaiveDate,
    created_at: DateTime<Utc>,
) -> Expense {
    Expense {
        id: id.to_string(),
        user_id: user_id.to_string(),
        amount,
        category: ExpenseCategory::from_label(category),
        description: None,
        date: on,
        created_at,
    }
}

pub fn income(id: &str, user_id: &str, amount: Decimal, frequency: &str) -> Income {
    Income {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: format!("income {}", id),
        amount,
        frequency: IncomeFrequency::from_tag(frequency),
        created_at: at(2025, 1, 1, 9),
    }
}

pub fn goal(id: &str, user_id: &str, target: Decimal, current: Decimal) -> Goal {
    Goal {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: format!("goal {}", id),
        target_amount: target,
        current_amount: current,
        completed: current >= target,
        created_at: at(2025, 1, 1, 9),
    }
}

fn unavailable(operation: &str) -> Error {
    Error::Remote(RemoteError::RequestFailed {
        operation: operation.to_string(),
        message: "connection refused".to_string(),
    })
}

/// Backing store that behaves like the hosted tables, with fault injection.
#[derive(Default)]
pub struct InMemoryStore {
    pub expenses: Mutex<Vec<Expense>>,
    pub incomes: Mutex<Vec<Income>>,
    pub goals: Mutex<Vec<Goal>>,
    pub activity: Mutex<Vec<(ActivitySource, ActivityRecord)>>,
    pub fail_expenses: Mutex<bool>,
    pub fail_incomes: Mutex<bool>,
    pub failing_sources: Mutex<HashSet<ActivitySource>>,
    /// Number of upcoming progress writes that lose the race to another writer.
    pub goal_conflicts: Mutex<usize>,
    /// Amount the competing writer adds when it wins the race.
    pub competing_deposit: Mutex<Decimal>,
    pub progress_writes: Mutex<usize>,
    next_id: Mutex<usize>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_expenses(self: Arc<Self>, rows: Vec<Expense>) -> Arc<Self> {
        self.expenses.lock().unwrap().extend(rows);
        self
    }

    pub fn with_incomes(self: Arc<Self>, rows: Vec<Income>) -> Arc<Self> {
        self.incomes.lock().unwrap().extend(rows);
        self
    }

    pub fn with_goals(self: Arc<Self>, rows: Vec<Goal>) -> Arc<Self> {
        self.goals.lock().unwrap().extend(rows);
        self
    }

    pub fn with_activity(self: Arc<Self>, source: ActivitySource, rows: Vec<ActivityRecord>) -> Arc<Self> {
        self.activity
            .lock()
            .unwrap()
            .extend(rows.into_iter().map(|r| (source, r)));
        self
    }

    pub fn stored_goal(&self, goal_id: &str) -> Option<Goal> {
        self.goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{}-{}", prefix, *next)
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for InMemoryStore {
    async fn list_expenses(&self, _session: &Session, query: &ExpenseQuery) -> Result<Vec<Expense>> {
        if *self.fail_expenses.lock().unwrap() {
            return Err(unavailable("load expenses"));
        }
        let mut rows: Vec<Expense> = self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| query.owner.as_deref().map_or(true, |o| o == e.user_id))
            .filter(|e| query.contains(e.date))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn insert_expense(&self, session: &Session, new_expense: NewExpense) -> Result<Expense> {
        let expense = Expense {
            id: self.next_id("expense"),
            user_id: session.user_id().to_string(),
            amount: new_expense.amount,
            category: new_expense.category.unwrap_or_default(),
            description: new_expense.description,
            date: new_expense.date.unwrap_or_else(|| date(2025, 1, 1)),
            created_at: Utc::now(),
        };
        self.expenses.lock().unwrap().push(expense.clone());
        Ok(expense)
    }
}

#[async_trait]
impl IncomeRepositoryTrait for InMemoryStore {
    async fn list_incomes(&self, _session: &Session, owner: Option<&str>) -> Result<Vec<Income>> {
        if *self.fail_incomes.lock().unwrap() {
            return Err(unavailable("load incomes"));
        }
        Ok(self
            .incomes
            .lock()
            .unwrap()
            .iter()
            .filter(|i| owner.map_or(true, |o| o == i.user_id))
            .cloned()
            .collect())
    }

    async fn insert_income(&self, session: &Session, new_income: NewIncome) -> Result<Income> {
        let income = Income {
            id: self.next_id("income"),
            user_id: session.user_id().to_string(),
            title: new_income.title,
            amount: new_income.amount,
            frequency: new_income.frequency,
            created_at: Utc::now(),
        };
        self.incomes.lock().unwrap().push(income.clone());
        Ok(income)
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    async fn list_goals(&self, _session: &Session, owner: Option<&str>) -> Result<Vec<Goal>> {
        let mut rows: Vec<Goal> = self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| owner.map_or(true, |o| o == g.user_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_goal(&self, _session: &Session, goal_id: &str) -> Result<Goal> {
        self.stored_goal(goal_id)
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
    }

    async fn insert_goal(&self, session: &Session, new_goal: NewGoal) -> Result<Goal> {
        let goal = Goal {
            id: self.next_id("goal"),
            user_id: session.user_id().to_string(),
            title: new_goal.title,
            target_amount: new_goal.target_amount,
            current_amount: Decimal::ZERO,
            completed: false,
            created_at: Utc::now(),
        };
        self.goals.lock().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn update_goal_progress(
        &self,
        _session: &Session,
        update: &GoalProgressUpdate,
    ) -> Result<Option<Goal>> {
        *self.progress_writes.lock().unwrap() += 1;
        let mut goals = self.goals.lock().unwrap();
        let stored = goals
            .iter_mut()
            .find(|g| g.id == update.goal_id)
            .ok_or_else(|| Error::NotFound(format!("Goal {}", update.goal_id)))?;

        let mut conflicts = self.goal_conflicts.lock().unwrap();
        if *conflicts > 0 {
            *conflicts -= 1;
            stored.current_amount += *self.competing_deposit.lock().unwrap();
            stored.completed = stored.completed || stored.current_amount >= stored.target_amount;
        }

        if stored.current_amount != update.expected_current_amount {
            return Ok(None);
        }
        stored.current_amount = update.current_amount;
        stored.completed = update.completed;
        Ok(Some(stored.clone()))
    }

    async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<usize> {
        let mut goals = self.goals.lock().unwrap();
        let before = goals.len();
        goals.retain(|g| !(g.id == goal_id && g.user_id == session.user_id()));
        Ok(before - goals.len())
    }
}

#[async_trait]
impl ActivityRepositoryTrait for InMemoryStore {
    async fn list_activity(
        &self,
        _session: &Session,
        source: ActivitySource,
    ) -> Result<Vec<ActivityRecord>> {
        if self.failing_sources.lock().unwrap().contains(&source) {
            return Err(Error::Remote(RemoteError::Rejected {
                operation: format!("scan {}", source.table_name()),
                status: 404,
                message: format!("relation \"{}\" does not exist", source.table_name()),
            }));
        }
        Ok(self
            .activity
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == source)
            .map(|(_, r)| r.clone())
            .collect())
    }
}
