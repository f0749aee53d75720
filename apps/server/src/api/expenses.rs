use std::sync::Arc;

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    main_lib::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetpal_core::{
    auth::Session,
    expenses::{Expense, NewExpense},
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
struct ExpenseRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

async fn get_expenses(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiQuery(range): ApiQuery<ExpenseRange>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = state
        .expense_service
        .get_expenses(&session, range.from, range.to)
        .await?;
    Ok(Json(expenses))
}

async fn add_expense(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    ApiJson(new_expense): ApiJson<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let expense = state
        .expense_service
        .add_expense(&session, new_expense)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/expenses", get(get_expenses).post(add_expense))
}
