use axum::{
    Router,
    routing::{get, put},
};

use std::sync::Arc;

use crate::{categories, expenses, partners, sales, transfers, views};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/dashboard", get(views::dashboard))
        .route("/timeline", get(views::timeline))
        .route("/partners", get(partners::list))
        .route("/sales", get(sales::list).post(sales::create))
        .route(
            "/sales/{id}",
            get(sales::get).put(sales::update).delete(sales::delete),
        )
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route("/transfers", get(transfers::list).post(transfers::create))
        .route(
            "/transfers/{id}",
            get(transfers::get)
                .put(transfers::update)
                .delete(transfers::delete),
        )
        .route(
            "/product-types",
            get(categories::list_product_types).post(categories::create_product_type),
        )
        .route(
            "/product-types/{id}",
            put(categories::update_product_type).delete(categories::delete_product_type),
        )
        .route(
            "/expense-categories",
            get(categories::list_expense_categories).post(categories::create_expense_category),
        )
        .route(
            "/expense-categories/{id}",
            put(categories::update_expense_category).delete(categories::delete_expense_category),
        )
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
