mod model;
mod repository;

pub use model::{GoalProgressPatch, GoalRow, NewGoalRow, GOALS_TABLE};
pub use repository::GoalRepository;
