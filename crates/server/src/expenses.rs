//! Expenses API endpoints.

use api_types::record::{ExpenseUpsert, ExpenseView, ExpensesResponse, RecordCreated};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CategoryKind, CategoryLookup, CategoryNames, Engine, Expense, ExpenseInput, Money};
use uuid::Uuid;

use crate::{ServerError, local_time, server::ServerState};

/// Names of the expense categories, for labelling expenses.
async fn category_names(engine: &Engine) -> Result<CategoryNames, ServerError> {
    let categories = engine.list_categories(CategoryKind::ExpenseCategory).await?;
    Ok(CategoryNames::new(&[], &categories))
}

fn map_expense(engine: &Engine, names: &CategoryNames, expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount_minor: expense.amount.minor(),
        occurred_at: local_time(engine, expense.occurred_at),
        description: expense.description,
        supplier: expense.supplier,
        expense_category: names.expense_category_label(expense.expense_category_id).to_string(),
        expense_category_id: expense.expense_category_id,
        recorded_by: expense.recorded_by.to_string(),
    }
}

fn expense_input(engine: &Engine, payload: ExpenseUpsert) -> Result<ExpenseInput, ServerError> {
    Ok(ExpenseInput {
        amount: Money::new(payload.amount_minor),
        occurred_at: engine.parse_occurred_at(&payload.occurred_at)?,
        description: payload.description,
        supplier: payload.supplier,
        expense_category_id: payload.expense_category_id,
        recorded_by: payload.recorded_by,
    })
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let names = category_names(&state.engine).await?;
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(|expense| map_expense(&state.engine, &names, expense))
        .collect();
    Ok(Json(ExpensesResponse { expenses }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.expense(id).await?;
    let names = category_names(&state.engine).await?;
    Ok(Json(map_expense(&state.engine, &names, expense)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let input = expense_input(&state.engine, payload)?;
    let expense = state.engine.create_expense(input).await?;
    Ok((StatusCode::CREATED, Json(RecordCreated { id: expense.id })))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<Json<ExpenseView>, ServerError> {
    let input = expense_input(&state.engine, payload)?;
    let expense = state.engine.update_expense(id, input).await?;
    let names = category_names(&state.engine).await?;
    Ok(Json(map_expense(&state.engine, &names, expense)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
