use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bengkel_infra::services::{ErrorKind, InventoryError, MutationOutcome};

pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::StoreFailure => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Malformed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    let code = match err.kind() {
        ErrorKind::NotFound => "not_found",
        ErrorKind::Validation => "validation_error",
        ErrorKind::StoreFailure => "store_failure",
        ErrorKind::Malformed => "malformed_record",
    };
    json_error(status_for_kind(err.kind()), code, err.to_string())
}

/// Mutation outcomes always travel as the outcome JSON; only the status varies.
pub fn outcome_to_response(outcome: MutationOutcome) -> axum::response::Response {
    let status = match outcome.kind {
        None => StatusCode::OK,
        Some(kind) => status_for_kind(kind),
    };
    (status, axum::Json(outcome)).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
