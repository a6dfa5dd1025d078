//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`StorefrontSystem`] - Spawns the remote cart actor and wires a [`CartStore`](crate::store::CartStore) to it
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod storefront;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use storefront::StorefrontSystem;
