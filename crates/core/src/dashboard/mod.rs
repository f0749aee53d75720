//! Dashboard module - current-month summary.

mod daily_tips;
mod dashboard_model;
mod dashboard_service;

#[cfg(test)]
mod dashboard_service_tests;

pub use daily_tips::{daily_tip, DAILY_TIPS};
pub use dashboard_model::DashboardSummary;
pub use dashboard_service::{most_recent_expenses, DashboardService, DashboardServiceTrait};
