//! # Cart Sync
//!
//! > **A local, observable cart kept consistent with an authoritative remote cart.**
//!
//! A storefront shows a cart badge, a cart page and "Add to Cart" buttons, all reading the
//! same cart. This crate is the state engine behind them: an in-memory mirror of the remote
//! cart that stays correct across asynchronous, overlapping and failing requests, while
//! exposing a derived item count and a loading/error status to any number of observers.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Confirm, then apply
//! No optimistic updates. Every operation calls the remote store first and only touches
//! the local item list once that call succeeds. A failed call records its message in
//! `error` and leaves the items exactly as they were, so there is never anything to roll back.
//!
//! ### One write path
//! State changes are [`Transition`](store::Transition)s fed to one pure
//! [`reduce`](store::reduce) function. The item total is re-derived by a single
//! [`compute_total`](store::compute_total) call after every item mutation. It is never
//! maintained by hand.
//!
//! ### Explicit instances
//! A [`CartStore`](store::CartStore) is a value you construct and inject, not a global.
//! Tests build as many independent stores as they like.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Concurrency Model
//! Operations are not queued. Each one runs its own `Pending → remote call → settled`
//! cycle and applies its settlement atomically. Races between operations on the same line
//! resolve to whichever settles last; that is accepted behaviour, not a bug.
//!
//! ### 2. Observability
//! Observers subscribe to a `tokio::sync::watch` channel and see every transition.
//! Everything is traced with `tracing`; see [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`store`])
//! - **Role**: The cart state container, its reducer and per-call operation handles.
//! - **Key items**: [`CartStore`](store::CartStore), [`CartState`](store::CartState),
//!   [`OperationHandle`](store::OperationHandle).
//!
//! ### 2. The Boundary ([`remote`])
//! - **Role**: The [`RemoteCartService`](remote::RemoteCartService) contract, plus an
//!   in-memory authoritative cart ([`CartActor`](remote::CartActor)) and test mocks.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! - **Role**: Spins up the remote cart and wires a store to it.
//! - **Key items**: [`StorefrontSystem`](lifecycle::StorefrontSystem),
//!   [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 4. The Data ([`model`], [`config`])
//! - **Role**: Cart lines with type-safe ids and non-zero quantities; runtime settings.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the scripted storefront session with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod config;
pub mod lifecycle;
pub mod model;
pub mod remote;
pub mod store;
