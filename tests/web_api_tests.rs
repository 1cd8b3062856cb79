//! Integration tests for the tileforms Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tileforms::config::Config;
use tileforms::models::Tile;
use tileforms::services::tiles::mock_tiles;
use tileforms::web::{create_router, AppState};

mod fixtures;
use fixtures::*;

/// Creates a test AppState serving the mock tiles.
fn create_test_state() -> AppState {
    AppState::new(mock_tiles().expect("mock tiles"), &Config::default())
}

/// Helper to send a request with an optional JSON body.
async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(serde_json::to_vec(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send_json(app, "GET", uri, None).await
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

// ============================================================================
// Tile Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_tiles() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/tiles").await;

    assert_eq!(status, StatusCode::OK);
    let tiles = json["tiles"].as_array().unwrap();
    let ids: Vec<&str> = tiles.iter().map(|t| t["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["profile", "sales_q1", "location"]);
    assert_eq!(tiles[0]["items"][8]["type"], "aadhaar");
}

#[tokio::test]
async fn test_get_tile_success() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/tiles/location").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Location Info");
    assert_eq!(json["layout"], "single-column");
}

#[tokio::test]
async fn test_get_tile_not_found() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/tiles/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_get_tile_invalid_id_rejected() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/tiles/bad%20id").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid tile id");
}

// ============================================================================
// Form Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_get_form_triple() {
    let app = create_router(create_test_state());

    let (status, json) = get_json(&app, "/api/tiles/sales_q1/form").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["schema"]["type"], "object");
    assert_eq!(json["schema"]["properties"]["growth_2"]["title"], "Growth");
    assert_eq!(json["uischema"]["type"], "VerticalLayout");
    assert_eq!(json["data"]["units_sold_1"], 450);
    assert_eq!(json["editors"]["revenue_0"], "number");
    assert_eq!(json["editors"]["growth_2"], "text");
}

#[tokio::test]
async fn test_get_form_not_found() {
    let app = create_router(create_test_state());

    let (status, _) = get_json(&app, "/api/tiles/missing/form").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_form_success_updates_state() {
    let app = create_router(create_test_state());

    let (_, form) = get_json(&app, "/api/tiles/sales_q1/form").await;
    let mut data = form["data"].clone();
    data["growth_2"] = json!("+20%");
    data["returns_5"] = json!(9);

    let (status, json) = send_json(&app, "PUT", "/api/tiles/sales_q1/form", Some(data)).await;

    assert_eq!(status, StatusCode::OK);
    let tile: Tile = serde_json::from_value(json).unwrap();
    assert_eq!(tile.items[2].value.to_string(), "+20%");
    assert_eq!(tile.items[5].value.to_string(), "9");

    // Subsequent reads see the saved tile
    let (_, json) = get_json(&app, "/api/tiles/sales_q1").await;
    assert_eq!(json["items"][2]["value"], "+20%");
    let (_, form) = get_json(&app, "/api/tiles/sales_q1/form").await;
    assert_eq!(form["data"]["returns_5"], 9);
}

#[tokio::test]
async fn test_save_form_invalid_national_id() {
    let app = create_router(create_test_state());

    let (_, form) = get_json(&app, "/api/tiles/profile/form").await;
    let mut data = form["data"].clone();
    data["aadhaar_number_8"] = json!("12345");
    data["first_name_0"] = json!("Alicia");

    let (status, json) = send_json(&app, "PUT", "/api/tiles/profile/form", Some(data)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["key"], "aadhaar_number_8");
    assert_eq!(
        errors[0]["message"],
        "Aadhaar must be exactly 12 digits (0-9 only)"
    );

    // Nothing was saved
    let (_, json) = get_json(&app, "/api/tiles/profile").await;
    assert_eq!(json["items"][0]["value"], "Alice");
}

#[tokio::test]
async fn test_save_form_partial_data_keeps_values() {
    let app = create_router(create_test_state());

    let data = json!({ "city_0": "Gotham", "unknown_9": "ignored" });
    let (status, json) = send_json(&app, "PUT", "/api/tiles/location/form", Some(data)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"][0]["value"], "Gotham");
    assert_eq!(json["items"][1]["value"], "NY");
    assert_eq!(json["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_save_form_persists_to_file() {
    let (path, _temp) = create_temp_tiles_file(&[test_tile_all_kinds()]);
    let mut config = Config::default();
    config.source.tiles_file = Some(path.clone());
    let state = AppState::load(&config).await.unwrap();
    let app = create_router(state);

    let data = json!({ "full_name_0": "Ada King" });
    let (status, _) = send_json(&app, "PUT", "/api/tiles/person/form", Some(data)).await;

    assert_eq!(status, StatusCode::OK);
    let tiles = read_tiles_file(&path);
    assert_eq!(tiles[0].items[0].value.to_string(), "Ada King");
}

#[tokio::test]
async fn test_save_form_unwritable_file_reports_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut config = Config::default();
    config.source.tiles_file = Some(temp_dir.path().join("missing_dir").join("tiles.json"));
    let app = create_router(AppState::new(mock_tiles().unwrap(), &config));

    let data = json!({ "city_0": "Gotham" });
    let (status, json) = send_json(&app, "PUT", "/api/tiles/location/form", Some(data)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to persist tiles");
    assert!(json["details"].is_string());

    // The in-memory tile is unchanged
    let (_, json) = get_json(&app, "/api/tiles/location").await;
    assert_eq!(json["items"][0]["value"], "Metropolis");
}

#[tokio::test]
async fn test_save_form_numeric_national_id_rejected() {
    let app = create_router(create_test_state());

    let data = json!({ "aadhaar_number_8": 654_089_963_711_u64 });
    let (status, json) = send_json(&app, "PUT", "/api/tiles/profile/form", Some(data)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"][0]["key"], "aadhaar_number_8");

    let (_, json) = get_json(&app, "/api/tiles/profile").await;
    assert_eq!(json["items"][8]["value"], "654089963711");
}

// ============================================================================
// Validation Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_validate_national_id_endpoint() {
    let app = create_router(create_test_state());

    let (status, json) = send_json(
        &app,
        "POST",
        "/api/validate/national-id",
        Some(json!({ "value": "654089963711" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);
    assert_eq!(json["errors"], json!([]));

    let (status, json) = send_json(
        &app,
        "POST",
        "/api/validate/national-id",
        Some(json!({ "value": "65408996371" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0], "Aadhaar must be exactly 12 digits (0-9 only)");
}
