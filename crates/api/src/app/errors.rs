//! Outcome-to-transport mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use storeflow_core::InventoryError;

use crate::app::dto::{JsonApiError, JsonApiErrorResponse};

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    match &err {
        InventoryError::InvalidArgument(_) => {
            json_api_error(StatusCode::BAD_REQUEST, "Validation error", err.to_string())
        }
        InventoryError::RemoteProductNotFound(_) => json_api_error(
            StatusCode::BAD_REQUEST,
            "Product does not exist",
            err.to_string(),
        ),
        // Distinct from not-found so callers know a later retry may succeed.
        InventoryError::UpstreamUnavailable { .. } => json_api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Products service unavailable",
            err.to_string(),
        ),
        InventoryError::InventoryNotFound(_) => json_api_error(
            StatusCode::NOT_FOUND,
            "Inventory not found",
            err.to_string(),
        ),
        InventoryError::InsufficientStock { .. } => {
            json_api_error(StatusCode::BAD_REQUEST, "Not enough stock", err.to_string())
        }
        InventoryError::StorageFailure(_) => json_api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            err.to_string(),
        ),
    }
}

pub fn json_api_error(
    status: StatusCode,
    title: &str,
    detail: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(JsonApiErrorResponse {
            errors: vec![JsonApiError {
                status: status.as_u16().to_string(),
                title: title.to_string(),
                detail: detail.into(),
            }],
        }),
    )
        .into_response()
}
