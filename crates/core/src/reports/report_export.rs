//! Renders monthly reports into downloadable documents.
//!
//! Every format emits, in order: report title, generation timestamp, total
//! income, total expenses, net balance, then one line per category.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::reports_model::{MonthlyReport, ReportDocument, ReportFormat};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, REPORT_TITLE};
use crate::errors::{Error, Result};

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(DISPLAY_DECIMAL_PRECISION))
}

fn timestamp(generated_at: DateTime<Utc>, tz: Tz) -> String {
    generated_at
        .with_timezone(&tz)
        .format("%Y-%m-%d %H:%M %Z")
        .to_string()
}

pub fn render_text(report: &MonthlyReport, generated_at: DateTime<Utc>, tz: Tz) -> String {
    let mut lines = vec![
        REPORT_TITLE.to_string(),
        format!("Generated on: {}", timestamp(generated_at, tz)),
        format!("Period: {}", report.period_label),
        String::new(),
        format!("Total Income: {}", money(report.total_income)),
        format!("Total Expenses: {}", money(report.total_expenses)),
        format!("Net Balance: {}", money(report.net_balance)),
        String::new(),
        "Expenses by Category".to_string(),
    ];
    if report.categories.is_empty() {
        lines.push("No expenses recorded for this month".to_string());
    }
    for line in &report.categories {
        lines.push(format!("{}: {}", line.category, money(line.total)));
    }

    let mut body = lines.join("\n");
    body.push('\n');
    body
}

pub fn render_csv(report: &MonthlyReport, generated_at: DateTime<Utc>, tz: Tz) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let csv_err = |e: csv::Error| Error::Unexpected(format!("Failed to write CSV report: {}", e));

    writer.write_record(["field", "label", "amount"]).map_err(csv_err)?;
    writer
        .write_record(["title", REPORT_TITLE, ""])
        .map_err(csv_err)?;
    writer
        .write_record(["generated_at", &timestamp(generated_at, tz), ""])
        .map_err(csv_err)?;
    writer
        .write_record(["period", &report.period_label, ""])
        .map_err(csv_err)?;
    writer
        .write_record(["total_income", "Total Income", &money(report.total_income)])
        .map_err(csv_err)?;
    writer
        .write_record([
            "total_expenses",
            "Total Expenses",
            &money(report.total_expenses),
        ])
        .map_err(csv_err)?;
    writer
        .write_record(["net_balance", "Net Balance", &money(report.net_balance)])
        .map_err(csv_err)?;
    for line in &report.categories {
        writer
            .write_record(["category", &line.category, &money(line.total)])
            .map_err(csv_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Unexpected(format!("Failed to flush CSV report: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Unexpected(e.to_string()))
}

pub fn render_report(
    report: &MonthlyReport,
    format: ReportFormat,
    generated_at: DateTime<Utc>,
    tz: Tz,
) -> Result<ReportDocument> {
    let body = match format {
        ReportFormat::Text => render_text(report, generated_at, tz),
        ReportFormat::Csv => render_csv(report, generated_at, tz)?,
    };
    Ok(ReportDocument {
        file_name: format!(
            "budgetpal-report-{}-{:02}.{}",
            report.year,
            report.month,
            format.file_extension()
        ),
        content_type: format.content_type(),
        body,
    })
}
