//! # Remote Cart Service
//!
//! Everything on the far side of the synchronization boundary.
//!
//! - [`RemoteCartService`] - The async contract the local store consumes
//! - [`RemoteError`] - Failures reported by the remote side
//! - [`CartActor`] - In-memory authoritative cart running in its own task
//! - [`CartServiceClient`] - Cloneable handle that implements [`RemoteCartService`]
//!   over the actor's channel
//!
//! # Testing
//!
//! See [`mock`] for a scripted service and raw-channel helpers.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod service;

pub use actor::CartActor;
pub use client::CartServiceClient;
pub use error::RemoteError;
pub use message::{CartRequest, Response};
pub use service::RemoteCartService;
