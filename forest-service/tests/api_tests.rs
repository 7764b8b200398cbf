//! Integration tests for the HTTP API.
//!
//! The real router runs against the in-memory store backend, so every test
//! exercises the full request path: routing, validation, query dispatch, and
//! response shaping.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use forest_service::{router, AppState};
use forest_store::{
    Feature, FeaturePage, FeatureStore, MemoryStore, Result as StoreResult, StoreError,
};

/// Build a feature with a small polygon geometry and a forest classification.
fn polygon_feature(id: &str, forest_type: &str) -> Feature {
    let mut feature = Feature::new(id);
    feature.geometry = json!({
        "type": "Polygon",
        "coordinates": [[
            [121.443068, 24.025319],
            [121.442094, 24.028031],
            [121.443074, 24.027125],
            [121.443068, 24.025319]
        ]]
    });
    feature
        .properties
        .insert("forest_type".to_string(), json!(forest_type));
    feature
}

/// The item1..item9 sample records written by the seed tooling.
fn sample_items() -> Vec<Feature> {
    (1..=9)
        .map(|n| {
            let mut feature = Feature::new(format!("item{n}"));
            feature
                .properties
                .insert("productName".to_string(), json!("Widget"));
            feature
                .properties
                .insert("productModel".to_string(), json!(format!("Model {n}")));
            feature
        })
        .collect()
}

fn server_with(features: Vec<Feature>) -> TestServer {
    let store = MemoryStore::with_features(features);
    let state = Arc::new(AppState {
        store: Arc::new(store),
    });
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_root_greeting() {
    let server = server_with(vec![]);

    let response = server.get("/").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert!(json["message"].as_str().is_some());
}

#[tokio::test]
async fn test_items_empty_collection() {
    let server = server_with(vec![]);

    let response = server.get("/items").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["type"], "FeatureCollection");
    assert_eq!(json["data"]["features"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_items_is_idempotent() {
    let server = server_with(vec![
        polygon_feature("item1", "C3A09"),
        polygon_feature("item2", "B1X00"),
    ]);

    let first: Value = server.get("/items").await.json();
    let second: Value = server.get("/items").await.json();

    assert_eq!(first, second);
    assert_eq!(first["data"]["features"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_items_caps_at_1000() {
    let features: Vec<Feature> = (0..1050)
        .map(|n| polygon_feature(&format!("item{n:04}"), "C3A09"))
        .collect();
    let server = server_with(features);

    let response = server.get("/items").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["features"].as_array().unwrap().len(), 1000);
}

#[tokio::test]
async fn test_item_by_id_found() {
    let server = server_with(sample_items());

    let response = server.get("/item/item5").await;

    response.assert_status_ok();
    let json: Value = response.json();
    let features = json["data"]["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["id"], "item5");
    assert_eq!(features[0]["properties"]["productModel"], "Model 5");
}

#[tokio::test]
async fn test_item_by_id_absent_is_404() {
    let server = server_with(sample_items());

    let response = server.get("/item/item99").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("item99"));
}

#[tokio::test]
async fn test_forest_type_two_page_scenario() {
    // Exactly two matches, page size two: the full first page carries a
    // token, the follow-up page is empty with a null token.
    let server = server_with(vec![
        polygon_feature("item1", "C3A09"),
        polygon_feature("item2", "C3A09"),
        polygon_feature("item3", "B1X00"),
    ]);

    let response = server.get("/items/forest_type/C3A09?limit=2").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["features"].as_array().unwrap().len(), 2);
    let token = json["continuation_token"].as_str().unwrap().to_string();

    let response = server
        .get(&format!(
            "/items/forest_type/C3A09?limit=2&continuation_token={token}"
        ))
        .await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["features"].as_array().unwrap().len(), 0);
    assert!(json["continuation_token"].is_null());
}

#[tokio::test]
async fn test_forest_type_empty_result_is_success() {
    let server = server_with(vec![polygon_feature("item1", "B1X00")]);

    let response = server.get("/items/forest_type/C3A09").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["features"].as_array().unwrap().len(), 0);
    assert!(json["continuation_token"].is_null());
}

#[tokio::test]
async fn test_forest_type_pagination_set_equality() {
    // Concatenating all pages must yield the same id set as one unpaged
    // query, for a fixed filter and snapshot.
    let mut features: Vec<Feature> = (0..25)
        .map(|n| polygon_feature(&format!("item{n:02}"), "C3A09"))
        .collect();
    features.extend((0..5).map(|n| polygon_feature(&format!("other{n}"), "B1X00")));
    let server = server_with(features);

    let mut paged_ids: Vec<String> = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let url = match &token {
            Some(t) => format!("/items/forest_type/C3A09?limit=4&continuation_token={t}"),
            None => "/items/forest_type/C3A09?limit=4".to_string(),
        };
        let json: Value = server.get(&url).await.json();
        for feature in json["data"]["features"].as_array().unwrap() {
            paged_ids.push(feature["id"].as_str().unwrap().to_string());
        }
        match json["continuation_token"].as_str() {
            Some(t) => token = Some(t.to_string()),
            None => break,
        }
    }

    let unpaged: Value = server.get("/items/forest_type/C3A09?limit=2000").await.json();
    let mut unpaged_ids: Vec<String> = unpaged["data"]["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap().to_string())
        .collect();

    paged_ids.sort();
    paged_ids.dedup();
    unpaged_ids.sort();

    assert_eq!(paged_ids, unpaged_ids);
    assert_eq!(paged_ids.len(), 25);
}

#[tokio::test]
async fn test_forest_type_default_limit_applies() {
    let server = server_with(vec![polygon_feature("item1", "C3A09")]);

    // No limit parameter: the default (1000) is within range.
    let response = server.get("/items/forest_type/C3A09").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["data"]["features"].as_array().unwrap().len(), 1);
}

/// Store backend that fails every call, to prove validation short-circuits
/// before the database is touched.
struct UnreachableStore;

#[async_trait]
impl FeatureStore for UnreachableStore {
    async fn list_features(&self, _cap: u32) -> StoreResult<Vec<Feature>> {
        Err(StoreError::Internal("store must not be called".to_string()))
    }

    async fn find_feature(&self, _id: &str) -> StoreResult<Option<Feature>> {
        Err(StoreError::Internal("store must not be called".to_string()))
    }

    async fn features_by_type(
        &self,
        _forest_type: &str,
        _limit: u32,
        _continuation_token: Option<&str>,
    ) -> StoreResult<FeaturePage> {
        Err(StoreError::Internal("store must not be called".to_string()))
    }

    async fn insert_features(&self, _features: &[Feature]) -> StoreResult<u64> {
        Err(StoreError::Internal("store must not be called".to_string()))
    }

    async fn upsert_feature(&self, _feature: &Feature) -> StoreResult<()> {
        Err(StoreError::Internal("store must not be called".to_string()))
    }
}

#[tokio::test]
async fn test_limit_over_ceiling_rejected_before_store_call() {
    let state = Arc::new(AppState {
        store: Arc::new(UnreachableStore),
    });
    let server = TestServer::new(router(state)).unwrap();

    // A store call would turn this into a 500; 400 proves the request was
    // rejected first.
    let response = server.get("/items/forest_type/C3A09?limit=2001").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("2000"));

    // limit=0 would mean "unbounded" downstream and is rejected the same way.
    let response = server.get("/items/forest_type/C3A09?limit=0").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_limit_at_ceiling_accepted() {
    let server = server_with(vec![polygon_feature("item1", "C3A09")]);

    let response = server.get("/items/forest_type/C3A09?limit=2000").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_store_failure_is_opaque_500() {
    let state = Arc::new(AppState {
        store: Arc::new(UnreachableStore),
    });
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/items").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    // Internal detail must not leak to the caller.
    assert_eq!(json["error"], "failed to query items");
}
