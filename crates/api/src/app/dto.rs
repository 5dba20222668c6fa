use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

// -------------------------
// Request DTOs
// -------------------------

/// Create body. Fields are optional here so the handler can report missing
/// ones itself instead of surfacing a deserialization error; `type` arrives
/// as a raw string and is parsed with its own field-level message.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub value: Option<f64>,
    pub notes: Option<String>,
}

/// Partial-update body: absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub value: Option<f64>,
    pub notes: Option<String>,
}

/// One entry of a bulk update: an id plus partial fields.
#[derive(Debug, Deserialize)]
pub struct BulkItemRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub value: Option<f64>,
    pub notes: Option<String>,
}

// -------------------------
// Response envelope helpers
// -------------------------

/// `{"success": true, "data": ...}`
pub fn success(status: StatusCode, data: impl Serialize) -> axum::response::Response {
    (status, Json(json!({ "success": true, "data": data }))).into_response()
}

/// `{"success": true, "message": ...}` plus any extra top-level fields.
pub fn success_message(
    message: impl Into<String>,
    extra: &[(&str, serde_json::Value)],
) -> axum::response::Response {
    let mut body = json!({ "success": true, "message": message.into() });
    for (key, value) in extra {
        body[*key] = value.clone();
    }
    (StatusCode::OK, Json(body)).into_response()
}
