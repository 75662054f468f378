//! Sales API endpoints.

use api_types::record::{RecordCreated, SaleUpsert, SaleView, SalesResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CategoryKind, CategoryLookup, CategoryNames, Engine, Money, Sale, SaleInput};
use uuid::Uuid;

use crate::{ServerError, local_time, server::ServerState};

/// Names of the product types, for labelling sales.
async fn category_names(engine: &Engine) -> Result<CategoryNames, ServerError> {
    let categories = engine.list_categories(CategoryKind::ProductType).await?;
    Ok(CategoryNames::new(&categories, &[]))
}

fn map_sale(engine: &Engine, names: &CategoryNames, sale: Sale) -> SaleView {
    SaleView {
        id: sale.id,
        amount_minor: sale.amount.minor(),
        occurred_at: local_time(engine, sale.occurred_at),
        description: sale.description,
        client: sale.client,
        quantity: sale.quantity,
        product_type: names.product_type_label(sale.product_type_id).to_string(),
        product_type_id: sale.product_type_id,
        recorded_by: sale.recorded_by.to_string(),
    }
}

fn sale_input(engine: &Engine, payload: SaleUpsert) -> Result<SaleInput, ServerError> {
    Ok(SaleInput {
        amount: Money::new(payload.amount_minor),
        occurred_at: engine.parse_occurred_at(&payload.occurred_at)?,
        description: payload.description,
        client: payload.client,
        quantity: payload.quantity,
        product_type_id: payload.product_type_id,
        recorded_by: payload.recorded_by,
    })
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<SalesResponse>, ServerError> {
    let names = category_names(&state.engine).await?;
    let sales = state
        .engine
        .list_sales()
        .await?
        .into_iter()
        .map(|sale| map_sale(&state.engine, &names, sale))
        .collect();
    Ok(Json(SalesResponse { sales }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleView>, ServerError> {
    let sale = state.engine.sale(id).await?;
    let names = category_names(&state.engine).await?;
    Ok(Json(map_sale(&state.engine, &names, sale)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SaleUpsert>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let input = sale_input(&state.engine, payload)?;
    let sale = state.engine.create_sale(input).await?;
    Ok((StatusCode::CREATED, Json(RecordCreated { id: sale.id })))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaleUpsert>,
) -> Result<Json<SaleView>, ServerError> {
    let input = sale_input(&state.engine, payload)?;
    let sale = state.engine.update_sale(id, input).await?;
    let names = category_names(&state.engine).await?;
    Ok(Json(map_sale(&state.engine, &names, sale)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
