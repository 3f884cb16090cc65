//! Router tests driving the full HTTP stack against the bundled seed data.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::Router;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::{AppState, create_router};
use crate::locator::{Locator, LocatorConfig};
use crate::store::MemoryStore;

fn app() -> Router {
    let store = MemoryStore::from_seed_file("data/stations.json").unwrap();
    let locator = Locator::new(Arc::new(store), LocatorConfig::default());
    create_router(AppState::new(locator))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

fn review(station_id: u32, email: &str) -> Value {
    json!({
        "station_id": station_id,
        "name": "Meera Nair",
        "email": email,
        "rating": 4,
        "review_text": "Air pump works and the staff are polite."
    })
}

#[tokio::test]
async fn health_check() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn city_search_finds_seeded_station() {
    let (status, body) = get(app(), "/get_stations?city=Delhi").await;
    assert_eq!(status, StatusCode::OK);

    let stations = body.as_array().unwrap();
    assert!(stations.iter().any(|s| s["name"] == "Delhi Fuel Co"));
    assert!(stations.iter().all(|s| s["distance"].is_null()));
}

#[tokio::test]
async fn legacy_php_paths_are_served() {
    let (status, body) = get(app(), "/get_stations.php?city=Delhi").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().is_some_and(|a| !a.is_empty()));
}

#[tokio::test]
async fn location_search_reports_distances() {
    let (status, body) = get(app(), "/get_stations?lat=28.6139&lon=77.2090").await;
    assert_eq!(status, StatusCode::OK);

    let distances: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["distance"].as_f64().unwrap())
        .collect();
    assert!(!distances.is_empty());
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert!(distances.iter().all(|&d| d < 100.0));
}

#[tokio::test]
async fn invalid_coordinates_rejected() {
    let (status, body) = get(app(), "/get_stations?lat=abc&lon=77.2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "Invalid coordinates provided");
}

#[tokio::test]
async fn default_listing_without_parameters() {
    let (status, body) = get(app(), "/get_stations").await;
    assert_eq!(status, StatusCode::OK);

    let cities = ["New Delhi", "Gurugram", "Noida", "Faridabad"];
    let stations = body.as_array().unwrap();
    assert!(!stations.is_empty());
    assert!(stations.len() <= 20);
    assert!(
        stations
            .iter()
            .all(|s| cities.contains(&s["city"].as_str().unwrap()))
    );
}

#[tokio::test]
async fn station_details_success() {
    let (status, body) = get(app(), "/get_station_details?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["id"], 1);
    assert!(body["data"]["establishment_date_formatted"].is_string());
}

#[tokio::test]
async fn station_details_not_found() {
    let (status, body) = get(app(), "/get_station_details?id=99999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn station_details_requires_numeric_id() {
    let (status, body) = get(app(), "/get_station_details?id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Station ID is required and must be a valid number."
    );

    let (status, body) = get(app(), "/get_station_details").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn reviews_listing() {
    let (status, body) = get(app(), "/get_reviews").await;
    assert_eq!(status, StatusCode::OK);

    let reviews = body.as_array().unwrap();
    assert!(!reviews.is_empty());
    assert!(reviews.len() <= 15);
    assert!(reviews[0]["station_name"].is_string());
    assert!(reviews[0]["created_at"].is_string());
}

#[tokio::test]
async fn submit_review_then_duplicate() {
    let app = app();

    let (status, body) = post_json(
        app.clone(),
        "/submit_review",
        &review(2, "meera@example.com"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        "Thank you! Your review has been submitted successfully."
    );
    assert!(body["review_id"].is_u64());

    let (status, body) = post_json(
        app.clone(),
        "/submit_review",
        &review(2, "Meera@Example.com"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "You have already reviewed this station");
}

#[tokio::test]
async fn submitted_review_is_escaped_in_listing() {
    let app = app();
    let mut body = review(3, "escape@example.com");
    body["review_text"] = json!("<b>Best</b> pumps & fast service");

    let (status, _) = post_json(app.clone(), "/submit_review", &body).await;
    assert_eq!(status, StatusCode::OK);

    let (_, reviews) = get(app, "/get_reviews").await;
    let texts: Vec<&str> = reviews
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["review_text"].as_str())
        .collect();
    assert!(texts.contains(&"&lt;b&gt;Best&lt;/b&gt; pumps &amp; fast service"));
}

#[tokio::test]
async fn submit_review_validation_errors() {
    let mut body = review(1, "v@example.com");
    body["rating"] = json!(6);
    let (status, response) = post_json(app(), "/submit_review", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Rating must be between 1 and 5");

    let mut body = review(1, "v@example.com");
    body.as_object_mut().unwrap().remove("review_text");
    let (status, response) = post_json(app(), "/submit_review", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["message"],
        "Field 'review_text' is required and cannot be empty"
    );

    let (status, response) = post_json(
        app(),
        "/submit_review",
        &review(99999, "v@example.com"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Station not found");
}

#[tokio::test]
async fn submit_review_rejects_malformed_body() {
    let request = Request::post("/submit_review")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON data received");
}

#[tokio::test]
async fn submit_review_requires_post() {
    let (status, body) = get(app(), "/submit_review").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Only POST method is allowed.");
}

#[tokio::test]
async fn cors_preflight_allowed() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/submit_review")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn repeated_query_parameters_keep_last_value() {
    let (status, body) = get(app(), "/get_stations?city=Gurugram&city=Delhi").await;
    assert_eq!(status, StatusCode::OK);
    let stations = body.as_array().unwrap();
    assert!(stations.iter().any(|s| s["name"] == "Delhi Fuel Co"));

    let (status, body) = get(app(), "/get_stations?lat=1&lat=28.6139&lon=77.2090").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().iter().all(|s| s["distance"].is_number()));

    let (status, body) = get(app(), "/get_station_details?id=99999&id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["id"], 1);
}

#[tokio::test]
async fn get_endpoints_reject_other_methods_with_json() {
    let request = Request::post("/get_stations").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "Only GET method is allowed.");

    let request = Request::post("/get_station_details.php?id=1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], "error");

    let request = Request::delete("/get_reviews").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], true);
    assert_eq!(body["reviews"], json!([]));
}
