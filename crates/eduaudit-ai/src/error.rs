//! Error types for `eduaudit-ai`.
//!
//! These never escape the crate's public operations — every operation falls
//! back to a canned payload — but they are logged, so the messages matter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
  #[error("no API key configured")]
  NoApiKey,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("API returned {status}: {body}")]
  Api { status: u16, body: String },

  #[error("completion had no content")]
  EmptyCompletion,

  #[error("completion was not the expected JSON: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = AiError> = std::result::Result<T, E>;
