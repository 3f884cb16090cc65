//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, header},
    routing::{MethodRouter, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::locator::{LocatorError, ReviewSubmission, StationQuery};

use super::dto::*;
use super::error::{AppError, Endpoint};
use super::state::AppState;

/// Create the application router.
///
/// Every endpoint is also reachable with a `.php` suffix.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let endpoints: [(&str, MethodRouter<AppState>); 4] = [
        (
            "/get_stations",
            get(get_stations).fallback(|| method_not_allowed(Endpoint::Stations)),
        ),
        (
            "/get_station_details",
            get(get_station_details).fallback(|| method_not_allowed(Endpoint::StationDetails)),
        ),
        (
            "/get_reviews",
            get(get_reviews).fallback(|| method_not_allowed(Endpoint::Reviews)),
        ),
        (
            "/submit_review",
            post(submit_review).fallback(|| method_not_allowed(Endpoint::SubmitReview)),
        ),
    ];

    let mut router = Router::new().route("/health", get(health));
    for (path, handler) in endpoints {
        router = router
            .route(&format!("{path}.php"), handler.clone())
            .route(path, handler);
    }

    router
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by text, by location, or list the default cities.
async fn get_stations(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    let fail = |e| AppError::new(Endpoint::Stations, e, state.expose_errors);

    let params = StationSearchParams::from_pairs(query_pairs(query).map_err(fail)?);

    let query = StationQuery::from_params(
        params.city.as_deref(),
        params.lat.as_deref(),
        params.lon.as_deref(),
    )
    .map_err(fail)?;

    let matches = state.locator.search(&query).await.map_err(fail)?;

    Ok(Json(matches.iter().map(StationResult::from_match).collect()))
}

/// Full details of one station.
async fn get_station_details(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<StationDetailsResponse>, AppError> {
    let fail = |e| AppError::new(Endpoint::StationDetails, e, state.expose_errors);

    let params = StationDetailsParams::from_pairs(query_pairs(query).map_err(fail)?);
    let station = state
        .locator
        .station_details(params.id.as_deref())
        .await
        .map_err(fail)?;

    Ok(Json(StationDetailsResponse {
        status: "success",
        data: StationDetails::from_station(&station),
    }))
}

/// Most recent reviews across all stations.
async fn get_reviews(State(state): State<AppState>) -> Result<Json<Vec<ReviewResult>>, AppError> {
    let reviews = state
        .locator
        .recent_reviews()
        .await
        .map_err(|e| AppError::new(Endpoint::Reviews, e, state.expose_errors))?;

    Ok(Json(reviews.iter().map(ReviewResult::from_review).collect()))
}

/// Submit a review for a station.
async fn submit_review(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmitReviewResponse>, AppError> {
    let fail = |e| AppError::new(Endpoint::SubmitReview, e, state.expose_errors);

    // Parse JSON manually so the body can be logged on failure
    let submission = ReviewSubmission::from_json(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "unparseable review body");
        fail(e)
    })?;

    let id = state
        .locator
        .submit_review(&submission)
        .await
        .map_err(fail)?;

    Ok(Json(SubmitReviewResponse::success(id)))
}

/// Decoded query pairs, or an input error if the query string is malformed.
fn query_pairs(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Vec<(String, String)>, LocatorError> {
    match query {
        Ok(Query(pairs)) => Ok(pairs),
        Err(rejection) => {
            debug!(%rejection, "unparseable query string");
            Err(LocatorError::InvalidInput("Invalid query string".to_string()))
        }
    }
}

async fn method_not_allowed(endpoint: Endpoint) -> AppError {
    AppError::method_not_allowed(endpoint)
}
