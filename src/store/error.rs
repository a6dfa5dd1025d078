//! Error type for cart store operations.

use crate::remote::RemoteError;
use thiserror::Error;

/// The single failure kind surfaced by [`CartStore`](super::CartStore) operations.
///
/// Network, validation, not-found and server failures are not distinguished at this
/// layer. The message is exactly what ends up in [`CartState::error`](super::CartState::error).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("{0}")]
    RemoteOperationFailed(String),
}

impl CartError {
    pub fn message(&self) -> &str {
        match self {
            CartError::RemoteOperationFailed(msg) => msg,
        }
    }
}

impl From<RemoteError> for CartError {
    fn from(e: RemoteError) -> Self {
        CartError::RemoteOperationFailed(e.to_string())
    }
}
