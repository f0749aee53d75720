use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Extension, Json, Router};
use budgetpal_core::{auth::Session, dashboard::DashboardSummary};
use chrono::Utc;

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state
        .dashboard_service
        .get_dashboard(&session, Utc::now())
        .await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
