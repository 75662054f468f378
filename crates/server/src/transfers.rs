//! Transfers API endpoints.

use api_types::record::{RecordCreated, TransferUpsert, TransferView, TransfersResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Engine, Money, Transfer, TransferInput};
use uuid::Uuid;

use crate::{ServerError, local_time, server::ServerState};

fn map_transfer(engine: &Engine, transfer: Transfer) -> TransferView {
    TransferView {
        id: transfer.id,
        amount_minor: transfer.amount.minor(),
        occurred_at: local_time(engine, transfer.occurred_at),
        description: transfer.description,
        payer: transfer.payer.to_string(),
        payee: transfer.payee.to_string(),
        recorded_by: transfer.recorded_by.to_string(),
    }
}

fn transfer_input(engine: &Engine, payload: TransferUpsert) -> Result<TransferInput, ServerError> {
    let recorded_by = payload
        .recorded_by
        .unwrap_or_else(|| payload.payer.clone());
    Ok(TransferInput {
        amount: Money::new(payload.amount_minor),
        occurred_at: engine.parse_occurred_at(&payload.occurred_at)?,
        description: payload.description,
        payer: payload.payer,
        payee: payload.payee,
        recorded_by,
    })
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<TransfersResponse>, ServerError> {
    let transfers = state
        .engine
        .list_transfers()
        .await?
        .into_iter()
        .map(|transfer| map_transfer(&state.engine, transfer))
        .collect();
    Ok(Json(TransfersResponse { transfers }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransferView>, ServerError> {
    let transfer = state.engine.transfer(id).await?;
    Ok(Json(map_transfer(&state.engine, transfer)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransferUpsert>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let input = transfer_input(&state.engine, payload)?;
    let transfer = state.engine.create_transfer(input).await?;
    Ok((StatusCode::CREATED, Json(RecordCreated { id: transfer.id })))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransferUpsert>,
) -> Result<Json<TransferView>, ServerError> {
    let input = transfer_input(&state.engine, payload)?;
    let transfer = state.engine.update_transfer(id, input).await?;
    Ok(Json(map_transfer(&state.engine, transfer)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transfer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
