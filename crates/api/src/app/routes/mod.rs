use axum::{Router, routing::get};

pub mod inventory;
pub mod system;

/// Router for all inventory endpoints plus view bookkeeping.
pub fn router() -> Router {
    Router::new()
        .route("/views", get(system::views))
        .nest("/inventory", inventory::router())
}
