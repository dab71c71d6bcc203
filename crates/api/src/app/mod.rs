//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store, invalidation bus and inventory services
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use bengkel_infra::config::AppConfig;
use bengkel_infra::record_store::{InMemoryRecordStore, RecordStore, StoreError};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Uses the in-memory record store, seeded from `config.seed_file` if set.
pub async fn build_app(config: &AppConfig) -> Result<Router, StoreError> {
    let store = match &config.seed_file {
        Some(path) => InMemoryRecordStore::from_json_file(path)?,
        None => {
            tracing::warn!("no seed file configured; starting with an empty inventory");
            InMemoryRecordStore::new()
        }
    };

    Ok(build_app_with_store(Arc::new(store), config))
}

/// Build the router on top of an existing record store.
pub fn build_app_with_store(store: Arc<dyn RecordStore>, config: &AppConfig) -> Router {
    let services = Arc::new(services::build_services(store, config));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(crate::middleware::log_requests)))
}
