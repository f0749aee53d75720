use std::sync::Arc;

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath},
    main_lib::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use budgetpal_core::{
    auth::Session,
    goals::{GoalDeposit, GoalWithProgress, NewGoal},
};

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<GoalWithProgress>>> {
    let goals = state.goal_service.get_goals(&session).await?;
    Ok(Json(goals.into_iter().map(GoalWithProgress::from).collect()))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(goal): ApiJson<NewGoal>,
) -> ApiResult<(StatusCode, Json<GoalWithProgress>)> {
    let g = state.goal_service.create_goal(&session, goal).await?;
    Ok((StatusCode::CREATED, Json(g.into())))
}

async fn deposit(
    ApiPath(id): ApiPath<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(body): ApiJson<GoalDeposit>,
) -> ApiResult<Json<GoalWithProgress>> {
    let g = state.goal_service.deposit(&session, &id, body.amount).await?;
    Ok(Json(g.into()))
}

async fn delete_goal(
    ApiPath(id): ApiPath<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&session, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", delete(delete_goal))
        .route("/goals/{id}/deposits", post(deposit))
}
