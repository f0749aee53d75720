use std::sync::Arc;

use crate::{
    error::ApiResult,
    extract::{ApiPath, ApiQuery},
    main_lib::AppState,
};
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use budgetpal_core::{
    auth::Session,
    reports::{MonthlyReport, ReportFormat},
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Deserialize)]
struct ExportParams {
    format: Option<String>,
}

async fn get_monthly_report(
    ApiPath((year, month)): ApiPath<(i32, u32)>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<MonthlyReport>> {
    let report = state
        .report_service
        .get_monthly_report(&session, year, month)
        .await?;
    Ok(Json(report))
}

async fn export_monthly_report(
    ApiPath((year, month)): ApiPath<(i32, u32)>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiQuery(params): ApiQuery<ExportParams>,
) -> ApiResult<impl IntoResponse> {
    let format = match params.format.as_deref() {
        Some(raw) => raw.parse::<ReportFormat>()?,
        None => ReportFormat::default(),
    };
    let document = state
        .report_service
        .export_monthly_report(&session, year, month, format, Utc::now())
        .await?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.body,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/{year}/{month}", get(get_monthly_report))
        .route("/reports/{year}/{month}/export", get(export_monthly_report))
}
