use std::sync::Arc;

use crate::{
    error::ApiResult,
    extract::ApiJson,
    main_lib::AppState,
};
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use budgetpal_core::{
    auth::Session,
    incomes::{Income, MonthlyIncome, NewIncome},
};

async fn get_incomes(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<Income>>> {
    let incomes = state.income_service.get_incomes(&session).await?;
    Ok(Json(incomes))
}

async fn add_income(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(new_income): ApiJson<NewIncome>,
) -> ApiResult<(StatusCode, Json<Income>)> {
    let income = state.income_service.add_income(&session, new_income).await?;
    Ok((StatusCode::CREATED, Json(income)))
}

async fn get_monthly_income(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<MonthlyIncome>> {
    let monthly = state.income_service.get_monthly_income(&session).await?;
    Ok(Json(monthly))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/incomes", get(get_incomes).post(add_income))
        .route("/incomes/monthly", get(get_monthly_income))
}
