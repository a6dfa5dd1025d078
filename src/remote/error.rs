//! # Remote Errors
//!
//! Failures reported across the remote cart service boundary. The local store does
//! not distinguish between these kinds; it collapses them into
//! [`CartError::RemoteOperationFailed`](crate::store::CartError::RemoteOperationFailed).

use crate::model::CartItemId;

/// Errors that can occur while talking to the remote cart store.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RemoteError {
    #[error("Cart service closed")]
    ServiceClosed,
    #[error("Cart service dropped response channel")]
    ServiceDropped,
    #[error("Cart item not found: {0}")]
    NotFound(CartItemId),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Server error: {0}")]
    Server(String),
}
