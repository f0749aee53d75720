//! BudgetPal Core - Domain entities, services, and traits.
//!
//! This crate holds the budgeting rules (income normalization, category
//! aggregation, goal progress, reporting, admin analytics). It knows nothing
//! about HTTP or the hosted backend; repositories are traits implemented by
//! the `budgetpal-baas` crate.

pub mod admin;
pub mod auth;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod reports;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
