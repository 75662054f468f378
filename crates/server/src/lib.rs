use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, FixedOffset, Utc};
use engine::{Engine, EngineError};

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod categories;
mod expenses;
mod partners;
mod sales;
mod server;
mod transfers;
mod views;

pub mod types {
    pub mod partner {
        pub use api_types::partner::{PartnerView, PartnersResponse};
    }

    pub mod category {
        pub use api_types::category::{CategoriesResponse, CategoryUpsert, CategoryView};
    }

    pub mod record {
        pub use api_types::record::{
            ExpenseUpsert, ExpenseView, ExpensesResponse, RecordCreated, SaleUpsert, SaleView,
            SalesResponse, TransferUpsert, TransferView, TransfersResponse,
        };
    }

    pub mod dashboard {
        pub use api_types::dashboard::{DashboardResponse, SettlementView};
    }

    pub mod timeline {
        pub use api_types::timeline::{EventView, TimelineResponse};
    }
}

/// Renders a stored UTC instant in the business timezone.
pub(crate) fn local_time(engine: &Engine, at: DateTime<Utc>) -> DateTime<FixedOffset> {
    at.with_timezone(&engine.timezone()).fixed_offset()
}

pub enum ServerError {
    Engine(EngineError),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::InUse(_) => StatusCode::CONFLICT,
        EngineError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidRecord(_)
        | EngineError::UnknownPartner(_)
        | EngineError::InvalidPartners(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidDate(_)
        | EngineError::Overflow => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Unavailable(reason) => {
            tracing::warn!("data unavailable: {reason}");
            "data temporarily unavailable, retry later".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let ServerError::Engine(err) = self;
        let status = status_for_engine_error(&err);
        let error = message_for_engine_error(err);

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflicts_map_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let res = ServerError::from(EngineError::InUse("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidRecord("x".to_string()),
            EngineError::UnknownPartner("x".to_string()),
            EngineError::InvalidDate("x".to_string()),
            EngineError::Overflow,
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn engine_unavailable_maps_to_503() {
        let res = ServerError::from(EngineError::Unavailable("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn database_error_maps_to_500() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("boom".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
