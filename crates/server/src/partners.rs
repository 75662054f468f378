use api_types::partner::{PartnerView, PartnersResponse};
use axum::{Json, extract::State};

use crate::server::ServerState;

/// The two configured partners, in configured order.
pub async fn list(State(state): State<ServerState>) -> Json<PartnersResponse> {
    let partners = state
        .engine
        .partners()
        .iter()
        .map(|partner| PartnerView {
            id: partner.id.to_string(),
            name: partner.name.clone(),
        })
        .collect();
    Json(PartnersResponse { partners })
}
