use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Invalidation counts per view topic, as seen by the bus subscriber.
pub async fn views(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.views.snapshot())
}
