//! Reports module - monthly reports, trend data, and text/CSV export.

mod report_export;
mod reports_model;
mod reports_service;


pub use report_export::{render_csv, render_report, render_text};
pub use reports_model::{MonthlyReport, MonthlyTrendPoint, ReportDocument, ReportFormat};
pub use reports_service::{ReportService, ReportServiceTrait};
