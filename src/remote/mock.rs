//! # Mock Cart Service & Testing Guide
//!
//! Utilities for testing the [`CartStore`](crate::store::CartStore) without a real remote
//! cart.
//!
//! ## When to use which
//!
//! | Tool | Use Case |
//! |------|----------|
//! | [`MockCartService`] | Scripted responses in call order, with `verify()` at the end |
//! | [`create_mock_client`] + `expect_*` | Full control over *when* each call settles (races) |
//! | [`CartActor`](super::CartActor) | Real authoritative state, end-to-end flows |
//!
//! ## Pattern 0: Scripted responses
//!
//! ```rust
//! use cart_sync::model::{CartItem, Quantity};
//! use cart_sync::remote::mock::MockCartService;
//! use cart_sync::store::CartStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockCartService::new();
//!     mock.expect_get_cart_items()
//!         .return_ok(vec![CartItem::new(1, 10, Quantity::new(2).unwrap())]);
//!
//!     let store = CartStore::new(mock.client());
//!     store.fetch_cart_items().await.unwrap();
//!     assert_eq!(store.snapshot().total_count(), 2);
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 1: Controlled settlement order
//!
//! Create the client with [`create_mock_client`], start operations in background tasks,
//! then pull each request off the receiver with [`expect_update`], [`expect_remove`], …
//! and answer the responders in whatever order the test needs.

use super::client::CartServiceClient;
use super::error::RemoteError;
use super::message::{CartRequest, Response};
use crate::model::{CartItem, CartItemId, CartItemUpdate, NewCartItem};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock service.
enum Expectation {
    List {
        response: Result<Vec<CartItem>, RemoteError>,
    },
    Add {
        response: Result<CartItem, RemoteError>,
    },
    Update {
        id: CartItemId,
        response: Result<CartItem, RemoteError>,
    },
    Remove {
        id: CartItemId,
        response: Result<(), RemoteError>,
    },
    Clear {
        response: Result<(), RemoteError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A mock remote cart with expectation tracking for fluent testing.
///
/// Requests are answered strictly in the order the expectations were registered.
/// A request that does not match the next expectation panics the background task,
/// which the caller then observes as a dropped response.
pub struct MockCartService {
    client: CartServiceClient,
    expectations: Expectations,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockCartService {
    /// Creates a new mock service with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CartRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("expectation queue poisoned")
                    .pop_front();

                match (request, expectation) {
                    (CartRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (CartRequest::Add { respond_to, .. }, Some(Expectation::Add { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CartRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "update for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        CartRequest::Remove { id, respond_to },
                        Some(Expectation::Remove { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "remove for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (CartRequest::Clear { respond_to }, Some(Expectation::Clear { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: CartServiceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CartServiceClient {
        self.client.clone()
    }

    /// Expects a `get_cart_items` call.
    pub fn expect_get_cart_items(&mut self) -> ExpectationBuilder<Vec<CartItem>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `add_to_cart` call.
    pub fn expect_add_to_cart(&mut self) -> ExpectationBuilder<CartItem> {
        self.builder(|response| Expectation::Add { response })
    }

    /// Expects an `update_cart_item` call for `id`.
    pub fn expect_update(&mut self, id: CartItemId) -> ExpectationBuilder<CartItem> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `remove_from_cart` call for `id`.
    pub fn expect_remove(&mut self, id: CartItemId) -> ExpectationBuilder<()> {
        self.builder(move |response| Expectation::Remove { id, response })
    }

    /// Expects a `clear_cart` call.
    pub fn expect_clear(&mut self) -> ExpectationBuilder<()> {
        self.builder(|response| Expectation::Clear { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("expectation queue poisoned")
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<T>(
        &self,
        make: impl FnOnce(Result<T, RemoteError>) -> Expectation + Send + 'static,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }
}

impl Default for MockCartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that records the response for one expected call.
pub struct ExpectationBuilder<T> {
    expectations: Expectations,
    make: Box<dyn FnOnce(Result<T, RemoteError>) -> Expectation + Send>,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RemoteError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, RemoteError>) {
        let expectation = (self.make)(response);
        self.expectations
            .lock()
            .expect("expectation queue poisoned")
            .push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the remote store: it receives each [`CartRequest`] and decides when
/// (and with what) to answer, which makes settlement order deterministic.
pub fn create_mock_client(buffer_size: usize) -> (CartServiceClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartServiceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<Response<Vec<CartItem>>> {
    match receiver.recv().await {
        Some(CartRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Add request
pub async fn expect_add(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(NewCartItem, Response<CartItem>)> {
    match receiver.recv().await {
        Some(CartRequest::Add { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(CartItemId, CartItemUpdate, Response<CartItem>)> {
    match receiver.recv().await {
        Some(CartRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Remove request
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(CartItemId, Response<()>)> {
    match receiver.recv().await {
        Some(CartRequest::Remove { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Clear request
pub async fn expect_clear(receiver: &mut mpsc::Receiver<CartRequest>) -> Option<Response<()>> {
    match receiver.recv().await {
        Some(CartRequest::Clear { respond_to }) => Some(respond_to),
        _ => None,
    }
}
