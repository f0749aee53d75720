//! BudgetPal BaaS - adapter for the hosted backend.
//!
//! Implements the repository and auth provider traits from `budgetpal-core`
//! on top of the backend's REST (`/rest/v1`) and auth (`/auth/v1`) endpoints.
//! Every data call carries the caller's access token so the backend's
//! row-level policies scope what the caller may read and write.

pub mod activity;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod query;

pub use activity::ActivityRepository;
pub use auth::BaasAuthProvider;
pub use client::BaasClient;
pub use config::BaasConfig;
pub use expenses::ExpenseRepository;
pub use goals::GoalRepository;
pub use incomes::IncomeRepository;
