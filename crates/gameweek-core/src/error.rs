//! Error types for `gameweek-core`.

use thiserror::Error;

/// Domain-level reasons a write is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("team not found: {0}")]
  TeamNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
