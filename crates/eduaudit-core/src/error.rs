//! Error types for `eduaudit-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Validation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
