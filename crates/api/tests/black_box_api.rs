use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::json;

use carestock_infra::InMemoryItemStore;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, ephemeral port.
        let app = carestock_api::app::build_app(Arc::new(InMemoryItemStore::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_item(
    client: &reqwest::Client,
    base_url: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/items", base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let envelope: serde_json::Value = res.json().await.unwrap();
    assert_eq!(envelope["success"], true);
    envelope["data"].clone()
}

fn ts(value: &serde_json::Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn banner_and_health_respond() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(format!("{}/", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("inventory"));
}

#[tokio::test]
async fn create_update_lifecycle_refreshes_updated_at() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(
        &client,
        &srv.base_url,
        json!({ "name": "Wheelchairs", "type": "qty", "value": 12 }),
    )
    .await;

    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Wheelchairs");
    assert_eq!(created["type"], "qty");
    assert_eq!(created["value"], 12.0);
    let created_at = ts(&created["createdAt"]);
    assert_eq!(created_at, ts(&created["updatedAt"]));

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let res = client
        .put(format!("{}/items/{}", srv.base_url, id))
        .json(&json!({ "value": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let envelope: serde_json::Value = res.json().await.unwrap();
    let updated = &envelope["data"];
    assert_eq!(updated["value"], 10.0);
    assert_eq!(ts(&updated["createdAt"]), created_at);
    assert!(ts(&updated["updatedAt"]) > created_at);

    // The stored record reflects the update.
    let res = client
        .get(format!("{}/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["data"]["value"], 10.0);
}

#[tokio::test]
async fn create_requires_name_type_and_value() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/items", srv.base_url))
        .json(&json!({ "name": "Wheelchairs" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required fields: name, type, value");
}

#[tokio::test]
async fn create_rejects_unknown_type() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/items", srv.base_url))
        .json(&json!({ "name": "Wheelchairs", "type": "quantity", "value": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Type must be either qty or pct");
}

#[tokio::test]
async fn create_enforces_value_bounds() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Percentage above 100.
    let res = client
        .post(format!("{}/items", srv.base_url))
        .json(&json!({ "name": "Occupancy", "type": "pct", "value": 101 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("100"));

    // Negative value, regardless of type.
    let res = client
        .post(format!("{}/items", srv.base_url))
        .json(&json!({ "name": "Beds", "type": "qty", "value": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_and_malformed_ids_are_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for id in [uuid::Uuid::now_v7().to_string(), "not-a-uuid".to_string()] {
        let res = client
            .get(format!("{}/items/{}", srv.base_url, id))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Item not found");
    }
}

#[tokio::test]
async fn update_never_creates_a_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/items/{}", srv.base_url, uuid::Uuid::now_v7()))
        .json(&json!({ "value": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(format!("{}/items", srv.base_url)).send().await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn update_cannot_push_percentage_past_100() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(
        &client,
        &srv.base_url,
        json!({ "name": "Occupancy", "type": "pct", "value": 88 }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    // `type` is not part of the patch, but the merged record must still hold.
    let res = client
        .put(format!("{}/items/{}", srv.base_url, id))
        .json(&json!({ "value": 150 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["value"], 88.0);
    assert_eq!(body["data"]["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn bulk_update_skips_unknown_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(
        &client,
        &srv.base_url,
        json!({ "name": "Wheelchairs", "type": "qty", "value": 12 }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .put(format!("{}/items/bulk", srv.base_url))
        .json(&json!({
            "items": [
                { "id": id, "value": 5 },
                { "id": uuid::Uuid::now_v7().to_string(), "value": 9 },
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let updated = body["data"].as_array().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["id"].as_str().unwrap(), id);
    assert_eq!(updated[0]["value"], 5.0);
}

#[tokio::test]
async fn bulk_update_requires_an_array() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/items/bulk", srv.base_url))
        .json(&json!({ "items": "not-an-array" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "items must be an array");
}

#[tokio::test]
async fn delete_item_then_gone() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(
        &client,
        &srv.base_url,
        json!({ "name": "Walker Inventory", "type": "qty", "value": 8 }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item deleted successfully");

    let res = client
        .delete(format!("{}/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_all_reports_count_and_empties_collection() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (name, value) in [("a", 1), ("b", 2), ("c", 3)] {
        create_item(
            &client,
            &srv.base_url,
            json!({ "name": name, "type": "qty", "value": value }),
        )
        .await;
    }

    let res = client
        .delete(format!("{}/items/all", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["deletedCount"], 3);
    assert_eq!(body["message"], "Deleted 3 items");

    let res = client.get(format!("{}/items", srv.base_url)).send().await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_orders_most_recently_updated_first() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = create_item(
        &client,
        &srv.base_url,
        json!({ "name": "first", "type": "qty", "value": 1 }),
    )
    .await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_item(
        &client,
        &srv.base_url,
        json!({ "name": "second", "type": "qty", "value": 2 }),
    )
    .await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    // Touching the oldest item moves it to the front.
    let res = client
        .put(format!("{}/items/{}", srv.base_url, first["id"].as_str().unwrap()))
        .json(&json!({ "value": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(format!("{}/items", srv.base_url)).send().await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}
