//! ==============================================================================
//! api.rs - http surface
//! ==============================================================================
//!
//! routes:
//!     GET /                   dashboard page (polls the two read endpoints)
//!     GET /api/sensor-data    ingest one reading from query parameters
//!     GET /api/readings       retained history, oldest first   (CORS: *)
//!     GET /api/latest         newest reading or `{}`           (CORS: *)
//!     anything else           404
//!
//! every request runs as its own task. the only shared state is the history
//! (behind its own lock) and the log handle (a channel sender).
//!
//! ==============================================================================

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{Method, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Local;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{IngestResponse, Reading};
use crate::error::ApiError;
use crate::ingest;
use crate::AppState;

const DASHBOARD_HTML: &str = include_str!("dashboard.html");

pub fn router(state: AppState) -> Router {
    // the dashboard may be hosted elsewhere, so the read side is open to any origin
    let read_api: Router<AppState> = Router::new()
        .route("/api/readings", get(readings_handler))
        .route("/api/latest", get(latest_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        );

    Router::new()
        .route("/", get(dashboard_handler))
        .route("/api/sensor-data", get(ingest_handler))
        .merge(read_api)
        .fallback(not_found)
        .with_state(state)
}

async fn dashboard_handler() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /api/sensor-data?voltage=V&pressure_kpa=P&water_depth_m=D&volume_liters=L
///
/// all-or-nothing: a rejected request leaves the history untouched.
async fn ingest_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let received_at = Local::now();
    let Query(params) = query.map_err(|e| ApiError::MalformedQuery(e.body_text()))?;
    let reading = ingest::parse_reading(&params, received_at)?;

    state.history.append(reading).await;
    // lock already released; the sink never sees the history guard
    state.sink.forward(reading);

    if state.show_sensor_data {
        tracing::info!("[{}] Received: {}", reading.timestamp.to_rfc3339(), reading);
    }

    Ok(Json(IngestResponse::accepted(reading)))
}

async fn readings_handler(State(state): State<AppState>) -> Json<Vec<Reading>> {
    Json(state.history.snapshot().await)
}

/// newest reading, or `{}` so pollers can treat "no data yet" uniformly
async fn latest_handler(State(state): State<AppState>) -> Response {
    match state.history.latest().await {
        Some(reading) => Json(reading).into_response(),
        None => Json(serde_json::json!({})).into_response(),
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
