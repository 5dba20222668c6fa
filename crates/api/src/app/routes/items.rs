use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get, put},
};

use carestock_core::ItemId;
use carestock_infra::{BulkOutcome, ItemStore};
use carestock_inventory::{ItemPatch, ItemType, NewItem};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/bulk", put(bulk_update_items))
        .route("/all", delete(clear_items))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

pub async fn list_items(Extension(store): Extension<Arc<dyn ItemStore>>) -> axum::response::Response {
    match store.list().await {
        Ok(items) => dto::success(StatusCode::OK, items),
        Err(e) => errors::store_error_to_response(e, "Failed to fetch inventory items"),
    }
}

pub async fn get_item(
    Extension(store): Extension<Arc<dyn ItemStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    // A malformed id is indistinguishable from a nonexistent one.
    let Ok(id) = id.parse::<ItemId>() else {
        return errors::not_found("Item not found");
    };

    match store.get(&id).await {
        Ok(Some(item)) => dto::success(StatusCode::OK, item),
        Ok(None) => errors::not_found("Item not found"),
        Err(e) => errors::store_error_to_response(e, "Failed to fetch item"),
    }
}

pub async fn create_item(
    Extension(store): Extension<Arc<dyn ItemStore>>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    let (Some(name), Some(item_type), Some(value)) = (body.name, body.item_type, body.value)
    else {
        return errors::json_failure(
            StatusCode::BAD_REQUEST,
            "Missing required fields: name, type, value",
            None,
        );
    };

    let item_type = match errors::parse_item_type(&item_type) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let draft = NewItem {
        name,
        item_type,
        value,
        notes: body.notes,
    };

    match store.create(draft).await {
        Ok(item) => dto::success(StatusCode::CREATED, item),
        Err(e) => errors::store_error_to_response(e, "Failed to create item"),
    }
}

pub async fn update_item(
    Extension(store): Extension<Arc<dyn ItemStore>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateItemRequest>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ItemId>() else {
        return errors::not_found("Item not found");
    };

    let item_type = match body.item_type.as_deref() {
        Some(s) => match errors::parse_item_type(s) {
            Ok(t) => Some(t),
            Err(resp) => return resp,
        },
        None => None,
    };

    let patch = ItemPatch {
        name: body.name,
        item_type,
        value: body.value,
        notes: body.notes,
    };

    match store.update(&id, patch).await {
        Ok(Some(item)) => dto::success(StatusCode::OK, item),
        Ok(None) => errors::not_found("Item not found"),
        Err(e) => errors::store_error_to_response(e, "Failed to update item"),
    }
}

pub async fn bulk_update_items(
    Extension(store): Extension<Arc<dyn ItemStore>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let Some(entries) = body.get("items").and_then(|v| v.as_array()) else {
        return errors::json_failure(StatusCode::BAD_REQUEST, "items must be an array", None);
    };

    let mut updates: Vec<(ItemId, ItemPatch)> = Vec::with_capacity(entries.len());
    for entry in entries {
        let req: dto::BulkItemRequest = match serde_json::from_value(entry.clone()) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "bulk update: skipping malformed entry");
                continue;
            }
        };

        let Some(raw_id) = req.id else {
            tracing::warn!("bulk update: skipping entry without id");
            continue;
        };
        let Ok(id) = raw_id.parse::<ItemId>() else {
            tracing::warn!(id = %raw_id, "bulk update: skipping entry with unparseable id");
            continue;
        };

        // A bad type string skips this entry only; entries are independent.
        let item_type = match req.item_type.as_deref() {
            Some(s) => match ItemType::parse(s) {
                Ok(t) => Some(t),
                Err(_) => {
                    tracing::warn!(id = %id, "bulk update: skipping entry with unknown type");
                    continue;
                }
            },
            None => None,
        };

        updates.push((
            id,
            ItemPatch {
                name: req.name,
                item_type,
                value: req.value,
                notes: req.notes,
            },
        ));
    }

    match store.update_many(updates).await {
        Ok(outcomes) => {
            let mut updated = Vec::new();
            for outcome in outcomes {
                match outcome {
                    BulkOutcome::Updated(item) => updated.push(item),
                    BulkOutcome::Skipped { id, reason } => {
                        tracing::warn!(id = %id, reason = ?reason, "bulk update: entry skipped");
                    }
                }
            }
            dto::success(StatusCode::OK, updated)
        }
        Err(e) => errors::store_error_to_response(e, "Failed to bulk update items"),
    }
}

pub async fn delete_item(
    Extension(store): Extension<Arc<dyn ItemStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ItemId>() else {
        return errors::not_found("Item not found");
    };

    match store.delete(&id).await {
        Ok(true) => dto::success_message("Item deleted successfully", &[]),
        Ok(false) => errors::not_found("Item not found"),
        Err(e) => errors::store_error_to_response(e, "Failed to delete item"),
    }
}

pub async fn clear_items(Extension(store): Extension<Arc<dyn ItemStore>>) -> axum::response::Response {
    match store.delete_all().await {
        Ok(count) => dto::success_message(
            format!("Deleted {count} items"),
            &[("deletedCount", serde_json::json!(count))],
        ),
        Err(e) => errors::store_error_to_response(e, "Failed to clear inventory"),
    }
}
