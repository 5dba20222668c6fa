use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, routing::get};
use tower::ServiceBuilder;

use carestock_infra::{InMemoryItemStore, ItemStore, PostgresItemStore};

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the item store from environment configuration.
///
/// With `DATABASE_URL` set, connects to Postgres and ensures the schema —
/// failure here is fatal (the process must not come up without storage).
/// Without it, runs on the in-memory store (dev/test).
pub async fn build_store() -> Arc<dyn ItemStore> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url)
                .await
                .expect("failed to connect to Postgres");
            let store = PostgresItemStore::new(pool);
            store
                .ensure_schema()
                .await
                .expect("failed to ensure items schema");
            tracing::info!("using Postgres item store");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory item store");
            Arc::new(InMemoryItemStore::new())
        }
    }
}

/// Assemble the router around an explicitly injected store.
pub fn build_app(store: Arc<dyn ItemStore>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .nest("/items", routes::items::router())
        .layer(ServiceBuilder::new().layer(Extension(store)))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn banner() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "carestock inventory API",
        "endpoints": {
            "items": "/items",
            "clearAll": "DELETE /items/all",
        },
    }))
}
