//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Error bodies are `{"message": "..."}` across the board, which is what the
//! web client expects. 500 responses carry the error's display string as-is;
//! that leaks internals and is a known hardening gap.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Unauthorized")]
  Unauthorized,

  #[error("{0}")]
  Forbidden(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("{0}")]
  Internal(String),
}

impl Error {
  /// Wrap a storage-backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

impl From<eduaudit_core::Error> for Error {
  fn from(e: eduaudit_core::Error) -> Self {
    // Core errors surface at the API boundary as validation failures.
    Error::BadRequest(e.to_string())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::Forbidden(_) => StatusCode::FORBIDDEN,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Store(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "message": self.to_string() }))).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
