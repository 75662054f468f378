//! Product type and expense category endpoints.
//!
//! Both taxonomies share the same shape; each route pins the kind.

use api_types::category::{CategoriesResponse, CategoryUpsert, CategoryView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Category, CategoryInput, CategoryKind};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_category(category: Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        description: category.description,
    }
}

fn category_input(payload: CategoryUpsert) -> CategoryInput {
    CategoryInput {
        name: payload.name,
        description: payload.description,
    }
}

async fn list(
    state: &ServerState,
    kind: CategoryKind,
) -> Result<Json<CategoriesResponse>, ServerError> {
    let categories = state
        .engine
        .list_categories(kind)
        .await?
        .into_iter()
        .map(map_category)
        .collect();
    Ok(Json(CategoriesResponse { categories }))
}

async fn create(
    state: &ServerState,
    kind: CategoryKind,
    payload: CategoryUpsert,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(kind, category_input(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

async fn update(
    state: &ServerState,
    kind: CategoryKind,
    id: Uuid,
    payload: CategoryUpsert,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state
        .engine
        .update_category(kind, id, category_input(payload))
        .await?;
    Ok(Json(map_category(category)))
}

async fn delete(
    state: &ServerState,
    kind: CategoryKind,
    id: Uuid,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_product_types(
    State(state): State<ServerState>,
) -> Result<Json<CategoriesResponse>, ServerError> {
    list(&state, CategoryKind::ProductType).await
}

pub async fn create_product_type(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryUpsert>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    create(&state, CategoryKind::ProductType, payload).await
}

pub async fn update_product_type(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryUpsert>,
) -> Result<Json<CategoryView>, ServerError> {
    update(&state, CategoryKind::ProductType, id, payload).await
}

pub async fn delete_product_type(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    delete(&state, CategoryKind::ProductType, id).await
}

pub async fn list_expense_categories(
    State(state): State<ServerState>,
) -> Result<Json<CategoriesResponse>, ServerError> {
    list(&state, CategoryKind::ExpenseCategory).await
}

pub async fn create_expense_category(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryUpsert>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    create(&state, CategoryKind::ExpenseCategory, payload).await
}

pub async fn update_expense_category(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryUpsert>,
) -> Result<Json<CategoryView>, ServerError> {
    update(&state, CategoryKind::ExpenseCategory, id, payload).await
}

pub async fn delete_expense_category(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    delete(&state, CategoryKind::ExpenseCategory, id).await
}
