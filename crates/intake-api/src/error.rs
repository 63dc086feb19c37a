//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::Error;
use serde_json::json;
use thiserror::Error as ThisError;

/// An error returned by an API handler — the engine taxonomy plus request
/// decoding problems.
#[derive(Debug, ThisError)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Engine(#[from] Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      // Aggregate wrappers are classified by their underlying failure.
      ApiError::Engine(e) => {
        let status = match e.root_cause() {
          Error::NotFound { .. } => StatusCode::NOT_FOUND,
          Error::Validation(_) => StatusCode::BAD_REQUEST,
          Error::Referential { .. } => StatusCode::CONFLICT,
          Error::DeadlineExceeded => StatusCode::REQUEST_TIMEOUT,
          Error::Storage(_)
          | Error::PartialWrite { .. }
          | Error::Aggregate { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
