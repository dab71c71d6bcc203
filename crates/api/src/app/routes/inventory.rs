use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use bengkel_core::RecordId;
use bengkel_infra::services::{InventoryError, MutationOutcome};
use bengkel_inventory::{InventoryPatch, UpdateItem};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/search", get(search_items))
        .route("/items/:id", axum::routing::patch(update_item).delete(delete_item))
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.query.try_list_items().await {
        Ok(items) => (StatusCode::OK, Json(dto::ItemListResponse::from(items))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to get inventory items");
            errors::inventory_error_to_response(e)
        }
    }
}

pub async fn search_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    match services
        .query
        .try_search_items(&params.search_type, &params.term)
        .await
    {
        Ok(items) => (StatusCode::OK, Json(dto::ItemListResponse::from(items))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, search_type = %params.search_type, "failed to search inventory items");
            errors::inventory_error_to_response(e)
        }
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<InventoryPatch>, JsonRejection>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(v) => v,
        Err(e) => {
            let err = InventoryError::from(e);
            return errors::outcome_to_response(MutationOutcome::failed(&err, "invalid item id"));
        }
    };

    // Bodies serde refuses (negative stock, wrong types, missing car fields)
    // are validation failures like any other.
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            let err = InventoryError::Validation(rejection.body_text());
            tracing::warn!(item_id = %id, error = %err, "rejected inventory patch body");
            return errors::outcome_to_response(MutationOutcome::failed(&err, "invalid request body"));
        }
    };

    let outcome = services.mutation.update_item(UpdateItem::new(id, patch)).await;
    errors::outcome_to_response(outcome)
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let outcome = services.mutation.delete_item(&id).await;
    errors::outcome_to_response(outcome)
}
