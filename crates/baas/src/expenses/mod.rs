mod model;
mod repository;

pub use model::{ExpenseRow, NewExpenseRow, EXPENSES_TABLE};
pub use repository::ExpenseRepository;
