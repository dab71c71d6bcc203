use std::sync::Arc;

use async_trait::async_trait;
use bengkel_core::RecordId;
use bengkel_infra::config::AppConfig;
use bengkel_infra::record_store::{InMemoryRecordStore, Record, RecordStore, StoreError};
use reqwest::StatusCode;
use serde_json::{Value as JsonValue, json};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Arc<dyn RecordStore>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = bengkel_api::app::build_app_with_store(store, &AppConfig::default());
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

/// Store whose every call fails.
struct DownStore;

#[async_trait]
impl RecordStore for DownStore {
    async fn find_many(&self) -> Result<Vec<Record>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn update(&self, _id: &RecordId, _patch: Record) -> Result<Option<Record>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _id: &RecordId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn record(value: JsonValue) -> Record {
    value.as_object().cloned().unwrap()
}

fn seeded_store() -> Arc<dyn RecordStore> {
    Arc::new(
        InMemoryRecordStore::with_records(vec![
            record(json!({
                "id": "item-1",
                "invoice": "INV-00123",
                "retailName": "Kampas Rem Depan",
                "price": 185000,
                "stock": 4,
                "createdAt": "2024-03-05T10:00:00Z",
                "compatibilityCars": [{"brand": "Toyota", "model": "Avanza", "year": "2019"}]
            })),
            record(json!({
                "id": "item-2",
                "invoice": "inv-99900",
                "retailName": "Filter Oli",
                "createdAt": "2023-08-17T08:30:00Z",
                "compatibilityCars": [{"brand": "Honda", "model": "Jazz", "year": "2015"}]
            })),
        ])
        .unwrap(),
    )
}

fn item_ids(body: &JsonValue) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

async fn views_eventually(client: &reqwest::Client, base_url: &str, topic: &str, expected: u64) -> JsonValue {
    // Invalidations reach the view tracker asynchronously; poll briefly.
    for _ in 0..50 {
        let body: JsonValue = client
            .get(format!("{}/views", base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        if body[topic].as_u64() == Some(expected) {
            return body;
        }

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    panic!("view {topic} was not invalidated {expected} time(s) within timeout");
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn(seeded_store()).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_returns_normalized_items_with_display_fields() {
    let srv = TestServer::spawn(seeded_store()).await;

    let res = reqwest::get(format!("{}/inventory/items", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(item_ids(&body), vec!["item-1", "item-2"]);

    let defaulted = &body["items"][1];
    assert_eq!(defaulted["stock"], 10);
    assert_eq!(defaulted["price"], json!(29.99));
    assert_eq!(defaulted["priceDisplay"], "Rp 29,99");
    assert_eq!(defaulted["createdAtDisplay"], "17 Agu 2023");

    assert_eq!(body["items"][0]["priceDisplay"], "Rp 185.000,00");
}

#[tokio::test]
async fn search_dispatches_on_type() {
    let srv = TestServer::spawn(seeded_store()).await;
    let client = reqwest::Client::new();

    let cases = [
        ("sku", "INV-001", vec!["item-1"]),
        ("name", "honda", vec!["item-2"]),
        ("retailName", "REM", vec!["item-1"]),
        ("bogus", "whatever", vec!["item-1", "item-2"]),
    ];

    for (search_type, term, expected) in cases {
        let res = client
            .get(format!("{}/inventory/items/search", srv.base_url))
            .query(&[("type", search_type), ("term", term)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: JsonValue = res.json().await.unwrap();
        assert_eq!(item_ids(&body), expected, "type={search_type} term={term}");
    }
}

#[tokio::test]
async fn update_then_read_back_and_invalidate_views() {
    let srv = TestServer::spawn(seeded_store()).await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/inventory/items/item-2", srv.base_url))
        .json(&json!({"stock": 2, "retailName": "Filter Oli Mesin"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["item"]["stock"], 2);
    assert_eq!(body["item"]["retailName"], "Filter Oli Mesin");

    views_eventually(&client, &srv.base_url, "/inventory/manage", 1).await;
    views_eventually(&client, &srv.base_url, "/dashboard", 1).await;

    let body: JsonValue = client
        .get(format!("{}/inventory/items/search?type=retailName&term=mesin", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(item_ids(&body), vec!["item-2"]);
}

#[tokio::test]
async fn update_unknown_item_is_404_with_outcome_body() {
    let srv = TestServer::spawn(seeded_store()).await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/inventory/items/ghost", srv.base_url))
        .json(&json!({"stock": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "error": "Item not found", "kind": "not_found"}));
}

#[tokio::test]
async fn update_with_negative_price_is_400() {
    let srv = TestServer::spawn(seeded_store()).await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/inventory/items/item-1", srv.base_url))
        .json(&json!({"price": -10}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn undeserializable_patch_bodies_are_400_with_outcome_body() {
    let srv = TestServer::spawn(seeded_store()).await;
    let client = reqwest::Client::new();
    let url = format!("{}/inventory/items/item-1", srv.base_url);

    let bodies = [
        json!({"stock": -1}),
        json!({"price": "abc"}),
        json!({"compatibilityCars": [{"brand": "Toyota"}]}),
    ];

    for patch in bodies {
        let res = client.patch(&url).json(&patch).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body={patch}");

        let body: JsonValue = res.json().await.unwrap();
        assert_eq!(body["success"], false, "body={patch}");
        assert_eq!(body["kind"], "validation", "body={patch}");
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()), "body={patch}");
    }

    let res = client
        .patch(&url)
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body["kind"], "validation");

    // Nothing was written.
    let body: JsonValue = reqwest::get(format!("{}/inventory/items", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["items"][0]["stock"], 4);
}

#[tokio::test]
async fn delete_twice() {
    let srv = TestServer::spawn(seeded_store()).await;
    let client = reqwest::Client::new();
    let url = format!("{}/inventory/items/item-1", srv.base_url);

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<JsonValue>().await.unwrap(), json!({"success": true}));

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body["error"], "Item not found");

    let body: JsonValue = client
        .get(format!("{}/inventory/items", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(item_ids(&body), vec!["item-2"]);
}

#[tokio::test]
async fn store_fault_is_reported_as_503() {
    let srv = TestServer::spawn(Arc::new(DownStore)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/inventory/items", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body["error"], "store_failure");

    let res = client
        .delete(format!("{}/inventory/items/item-1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: JsonValue = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "store_failure");
}
