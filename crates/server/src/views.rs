//! Read-only views recomputed on every request.

use std::collections::BTreeMap;

use api_types::{
    dashboard::{DashboardResponse, SettlementView},
    timeline::{self, EventView, TimelineResponse},
};
use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use engine::{Direction, Engine, EventDetails, EventKind, Money, PartnerId, Source, TimelineEvent};

use crate::{ServerError, local_time, server::ServerState};

const NO_STORE: [(header::HeaderName, &str); 2] = [
    (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
    (header::PRAGMA, "no-cache"),
];

fn minor_map<K: ToString>(sums: BTreeMap<K, Money>) -> BTreeMap<String, i64> {
    sums.into_iter()
        .map(|(key, amount)| (key.to_string(), amount.minor()))
        .collect()
}

fn source_names(sources: &[Source]) -> Vec<String> {
    sources.iter().map(|s| s.as_str().to_string()).collect()
}

pub async fn dashboard(State(state): State<ServerState>) -> Result<Response, ServerError> {
    let dashboard = state.engine.dashboard().await?;
    let partners = state.engine.partners();

    let settlement = dashboard
        .settlement
        .iter()
        .map(|s| SettlementView {
            partner: s.partner.to_string(),
            name: partners.display_name(&s.partner).to_string(),
            entitlement_minor: s.entitlement.minor(),
            obligation_minor: s.obligation.minor(),
            collected_minor: s.collected.minor(),
            paid_minor: s.paid.minor(),
            transfers_out_minor: s.transfers_out.minor(),
            transfers_in_minor: s.transfers_in.minor(),
            net_transfers_minor: s.net_transfers.minor(),
            cash_on_hand_minor: s.cash_on_hand.minor(),
            balance_minor: s.balance.minor(),
        })
        .collect();

    let body = DashboardResponse {
        total_sales_minor: dashboard.total_sales.minor(),
        total_expenses_minor: dashboard.total_expenses.minor(),
        total_balance_minor: dashboard.total_balance.minor(),
        half_share_minor: dashboard.half_share.minor(),
        degraded: dashboard.degraded(),
        unavailable: source_names(&dashboard.unavailable),
        sales_by_category: minor_map(dashboard.sales_by_category),
        expenses_by_category: minor_map(dashboard.expenses_by_category),
        sales_by_recorder: minor_map::<PartnerId>(dashboard.sales_by_recorder),
        expenses_by_recorder: minor_map::<PartnerId>(dashboard.expenses_by_recorder),
        settlement,
        sales_count: dashboard.sales_count,
        expenses_count: dashboard.expenses_count,
        transfers_count: dashboard.transfers_count,
    };

    Ok((NO_STORE, Json(body)).into_response())
}

fn map_event(engine: &Engine, event: TimelineEvent) -> EventView {
    let signed_amount_minor = event.signed_amount().minor();
    let kind = match event.kind {
        EventKind::Sale => timeline::EventKind::Sale,
        EventKind::Expense => timeline::EventKind::Expense,
        EventKind::Transfer => timeline::EventKind::Transfer,
    };
    let direction = match event.direction {
        Direction::Inflow => timeline::Direction::Inflow,
        Direction::Outflow => timeline::Direction::Outflow,
        Direction::Internal => timeline::Direction::Internal,
    };

    let mut view = EventView {
        id: event.id,
        kind,
        occurred_at: local_time(engine, event.occurred_at),
        amount_minor: event.amount.minor(),
        signed_amount_minor,
        direction,
        description: event.description,
        recorded_by: event.recorded_by.to_string(),
        client: None,
        quantity: None,
        supplier: None,
        category: None,
        payer: None,
        payee: None,
    };
    match event.details {
        EventDetails::Sale {
            client,
            quantity,
            product_type,
        } => {
            view.client = client;
            view.quantity = quantity;
            view.category = Some(product_type);
        }
        EventDetails::Expense { supplier, category } => {
            view.supplier = supplier;
            view.category = Some(category);
        }
        EventDetails::Transfer { payer, payee } => {
            view.payer = Some(payer.to_string());
            view.payee = Some(payee.to_string());
        }
    }
    view
}

pub async fn timeline(State(state): State<ServerState>) -> Result<Response, ServerError> {
    let timeline = state.engine.timeline().await?;
    let body = TimelineResponse {
        degraded: timeline.degraded(),
        unavailable: source_names(&timeline.unavailable),
        events: timeline
            .events
            .into_iter()
            .map(|event| map_event(&state.engine, event))
            .collect(),
    };
    Ok((NO_STORE, Json(body)).into_response())
}
