use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Extension, Json, Router};
use budgetpal_core::{admin::PlatformStats, auth::Session};
use chrono::Utc;

async fn get_platform_stats(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<PlatformStats>> {
    let stats = state
        .admin_service
        .get_platform_stats(&session, Utc::now())
        .await?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/admin/analytics", get(get_platform_stats))
}
