use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use carestock_core::DomainError;
use carestock_infra::StoreError;
use carestock_inventory::ItemType;

/// Map a store failure to the response envelope.
///
/// `context` is the operation-appropriate human-readable message
/// (e.g. "Failed to fetch inventory items").
pub fn store_error_to_response(err: StoreError, context: &'static str) -> axum::response::Response {
    match err {
        StoreError::Domain(e @ DomainError::Validation(_)) => {
            json_failure(StatusCode::BAD_REQUEST, "Validation failed", Some(e.to_string()))
        }
        StoreError::Domain(DomainError::NotFound) => not_found("Item not found"),
        StoreError::Domain(e) => {
            json_failure(StatusCode::BAD_REQUEST, context, Some(e.to_string()))
        }
        StoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "{context}");
            json_failure(StatusCode::INTERNAL_SERVER_ERROR, context, Some(msg))
        }
    }
}

/// `{"success": false, "message": ..., "error": ...?}`
pub fn json_failure(
    status: StatusCode,
    message: impl Into<String>,
    error: Option<String>,
) -> axum::response::Response {
    let mut body = json!({
        "success": false,
        "message": message.into(),
    });
    if let Some(error) = error {
        body["error"] = json!(error);
    }
    (status, axum::Json(body)).into_response()
}

pub fn not_found(message: impl Into<String>) -> axum::response::Response {
    json_failure(StatusCode::NOT_FOUND, message, None)
}

pub fn parse_item_type(s: &str) -> Result<ItemType, axum::response::Response> {
    ItemType::parse(s).map_err(|_| {
        json_failure(
            StatusCode::BAD_REQUEST,
            "Type must be either qty or pct",
            None,
        )
    })
}
