//! # Cart Store
//!
//! The process-local synchronization layer over the remote cart.
//!
//! # Main Components
//!
//! - [`CartStore`] - Owns the state and exposes the five cart operations plus `clear_error`
//! - [`CartState`] - Read-only view: items, loading flag, last error, derived total
//! - [`reduce`] - The only function that writes [`CartState`]
//! - [`OperationHandle`] - Per-call status for spawned operations
//! - [`CartError`] - The single failure kind surfaced to callers

pub mod cart_store;
pub mod error;
pub mod operation;
pub mod reducer;
pub mod state;

pub use cart_store::CartStore;
pub use error::CartError;
pub use operation::{OpStatus, OperationHandle};
pub use reducer::{reduce, CartAction, Operation, Transition};
pub use state::{compute_total, CartState};
