use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// failures reported to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    /// an ingest parameter is present but is not a finite number
    #[error("Invalid parameters: {name}={value:?} is not a number")]
    InvalidParameter { name: &'static str, value: String },

    /// the query string itself could not be decoded
    #[error("Invalid parameters: {0}")]
    MalformedQuery(String),

    #[error("Endpoint not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter { .. } | Self::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // only client errors reach the console, successful requests stay quiet
        tracing::warn!(status = status.as_u16(), "{}", self);
        let body = serde_json::json!({ "status": "error", "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// failures writing the append-only log; never surfaced to clients
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("log file i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("log record serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}
