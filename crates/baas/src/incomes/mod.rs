mod model;
mod repository;

pub use model::{IncomeRow, NewIncomeRow, INCOMES_TABLE};
pub use repository::IncomeRepository;
