//! Expenses module - domain models, category aggregation, services, and traits.

mod category_aggregator;
mod expenses_model;
mod expenses_service;
mod expenses_traits;


pub use category_aggregator::{
    aggregate_by_category, CategorizedAmount, CategoryAggregation, CategoryTotal,
};
pub use expenses_model::{Expense, ExpenseCategory, ExpenseQuery, NewExpense};
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
