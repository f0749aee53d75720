use std::sync::Arc;

use crate::{
    error::ApiResult,
    extract::ApiJson,
    main_lib::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use budgetpal_core::auth::{Credentials, Identity, Session};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    /// `None` while the address still has to be confirmed.
    session: Option<Session>,
    confirmation_required: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    identity: Identity,
    expires_at: Option<DateTime<Utc>>,
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<(StatusCode, Json<SignUpResponse>)> {
    let session = state.auth_service.sign_up(credentials).await?;
    let confirmation_required = session.is_none();
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            session,
            confirmation_required,
        }),
    ))
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<Json<Session>> {
    let session = state.auth_service.sign_in(credentials).await?;
    Ok(Json(session))
}

async fn sign_out(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<StatusCode> {
    state.auth_service.sign_out(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn current_session(Extension(session): Extension<Session>) -> Json<SessionResponse> {
    Json(SessionResponse {
        identity: session.identity,
        expires_at: session.expires_at,
    })
}

async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<StatusCode> {
    state.auth_service.delete_account(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Routes reachable without a session.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/session", get(current_session))
        .route("/account", delete(delete_account))
}
