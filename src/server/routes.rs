//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::{Bounds, GeoPoint};
use crate::error::Error;
use crate::land::transport::Transport;
use crate::placement::{PlacementEngine, PlacementRequest, PlacementResult};
use crate::random::get_source;
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router<T: Transport + 'static>(state: Arc<AppState<T>>) -> Router {
    Router::new()
        .route("/api/place", post(place_handler::<T>))
        .route("/api/status", get(status_handler::<T>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Place request body
///
/// Omitted count and spacing fall back to the configured defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBody {
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub existing_points: Vec<GeoPoint>,
    pub count: Option<usize>,
    pub min_distance_meters: Option<f64>,
    /// Seed for reproducible sampling
    pub seed: Option<u64>,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidBounds(_) => "INVALID_BOUNDS",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidDistance(_) => "INVALID_DISTANCE",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Place trees
///
/// POST /api/place
async fn place_handler<T: Transport>(
    State(state): State<Arc<AppState<T>>>,
    Json(body): Json<PlaceBody>,
) -> Result<Json<PlacementResult>, ApiError> {
    let request = PlacementRequest::new(
        body.bounds,
        body.count.unwrap_or(state.config.placement.count),
        body.min_distance_meters
            .unwrap_or(state.config.placement.min_distance_meters),
    )
    .with_existing(body.existing_points);

    let rng = get_source(body.seed);
    let engine = PlacementEngine::new(&state.classifier, rng.as_ref());
    let result = engine.place(&request).await.map_err(ApiError::from)?;

    Ok(Json(result))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    pub classification_zoom: u8,
    pub cached_tiles: usize,
    pub pixel_sampling: bool,
}

/// Server status
///
/// GET /api/status
async fn status_handler<T: Transport>(State(state): State<Arc<AppState<T>>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        classification_zoom: state.classifier.zoom(),
        cached_tiles: state.cached_tiles(),
        pixel_sampling: state.classifier.pixel_sampling(),
    })
}
