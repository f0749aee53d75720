//! Incomes module - domain models, monthly normalization, services, and traits.

mod income_normalizer;
mod incomes_model;
mod incomes_service;
mod incomes_traits;


pub use income_normalizer::{monthly_income, normalize_monthly, total_monthly_income};
pub use incomes_model::{Income, IncomeFrequency, MonthlyIncome, NewIncome};
pub use incomes_service::IncomeService;
pub use incomes_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
