//! # Cart Store
//!
//! The local, observable mirror of the remote cart.
//!
//! ## Operation Lifecycle
//!
//! Every remote-calling operation runs the same three phases:
//!
//! ```text
//!  caller ──► Pending ──────────► remote call ──────────► Fulfilled(action) │ Rejected(msg)
//!             loading = true       (suspends here)         loading cleared once nothing
//!             error   = None                               else is in flight
//! ```
//!
//! Each phase is one atomic [`reduce`] over the shared [`CartState`], so observers never
//! see a half-applied settlement. An operation whose future is dropped before the remote
//! call resolves (a timeout, a `select!`) settles as `Cancelled`: `loading` is released
//! and nothing else changes. Operations are not queued: overlapping calls settle
//! independently and `error` reflects whichever settled last.
//!
//! ## Accepted Races
//!
//! Item effects from different operations do not commute. A remove racing a quantity
//! update on the same id ends with whichever settles last. Callers that need ordering
//! must await one operation before issuing the next.

use super::error::CartError;
use super::operation::OperationHandle;
use super::reducer::{reduce, CartAction, Operation, Transition};
use super::state::CartState;
use crate::config::{AddPolicy, CartConfig};
use crate::model::{CartItem, CartItemId, CartItemUpdate, NewCartItem, Quantity};
use crate::remote::{RemoteCartService, RemoteError};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Single authoritative in-memory mirror of the remote cart.
///
/// Construct one per session and hand it (usually behind an `Arc`) to whatever owns the
/// UI tree. Independent instances share nothing.
pub struct CartStore<S> {
    service: S,
    state: watch::Sender<CartState>,
    add_policy: AddPolicy,
}

impl<S: RemoteCartService> CartStore<S> {
    /// Creates an empty store. No remote call is made until the first fetch.
    pub fn new(service: S) -> Self {
        Self::with_config(service, &CartConfig::default())
    }

    pub fn with_config(service: S, config: &CartConfig) -> Self {
        let (state, _) = watch::channel(CartState::default());
        Self {
            service,
            state,
            add_policy: config.add_policy,
        }
    }

    /// A read-only copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes. The receiver sees every transition.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Replaces `items` with the authoritative list.
    #[instrument(skip(self))]
    pub async fn fetch_cart_items(&self) -> Result<Vec<CartItem>, CartError> {
        self.run(Operation::Fetch, self.service.get_cart_items(), |items| {
            CartAction::Fetched(items.clone())
        })
        .await
    }

    /// Adds a product and incorporates the result according to the configured
    /// [`AddPolicy`]. When this resolves `Ok`, `total_count` already counts the item.
    #[instrument(skip(self))]
    pub async fn add_item_to_cart(&self, item: NewCartItem) -> Result<CartItem, CartError> {
        match self.add_policy {
            AddPolicy::MergeReturned => {
                self.run(Operation::Add, self.service.add_to_cart(item), |added| {
                    CartAction::Added(added.clone())
                })
                .await
            }
            AddPolicy::Refetch => {
                // The add stays pending until the reload settles, so `loading` never drops
                // while the new line is still uncounted.
                let pending = self.begin(Operation::Add);
                let added = match self.service.add_to_cart(item).await {
                    Ok(added) => added,
                    Err(e) => return Err(pending.reject(e)),
                };
                let reloaded = self.fetch_cart_items().await;
                pending.fulfil(CartAction::Acknowledged);
                reloaded?;
                Ok(added)
            }
        }
    }

    /// Sets the quantity of line `id`. If the line is not held locally the item list is
    /// left alone; the drift surfaces on the next fetch.
    #[instrument(skip(self))]
    pub async fn update_cart_item_quantity(
        &self,
        id: CartItemId,
        quantity: Quantity,
    ) -> Result<CartItem, CartError> {
        let call = self
            .service
            .update_cart_item(id, CartItemUpdate { quantity });
        self.run(Operation::UpdateQuantity, call, |updated| {
            CartAction::Updated(updated.clone())
        })
        .await
    }

    /// Removes line `id`. Removing a line that is not held locally is a no-op.
    #[instrument(skip(self))]
    pub async fn remove_item_from_cart(&self, id: CartItemId) -> Result<CartItemId, CartError> {
        self.run(Operation::Remove, self.service.remove_from_cart(id), |_| {
            CartAction::Removed(id)
        })
        .await
        .map(|()| id)
    }

    /// Empties the cart, whatever the remote response body.
    #[instrument(skip(self))]
    pub async fn clear_all_cart(&self) -> Result<(), CartError> {
        self.run(Operation::Clear, self.service.clear_cart(), |_| {
            CartAction::Cleared
        })
        .await
    }

    /// Drops the last error. Items, loading and total are untouched.
    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.set_error(None));
    }

    async fn run<T, F>(
        &self,
        op: Operation,
        call: F,
        on_success: impl FnOnce(&T) -> CartAction,
    ) -> Result<T, CartError>
    where
        F: Future<Output = Result<T, RemoteError>>,
    {
        let pending = self.begin(op);

        match call.await {
            Ok(value) => {
                pending.fulfil(on_success(&value));
                Ok(value)
            }
            Err(e) => Err(pending.reject(e)),
        }
    }

    fn begin(&self, op: Operation) -> PendingOp<'_> {
        dispatch(&self.state, Transition::Pending);
        debug!(%op, "Pending");
        PendingOp {
            state: &self.state,
            op,
            settled: false,
        }
    }
}

fn dispatch(state: &watch::Sender<CartState>, transition: Transition) {
    state.send_modify(|state| reduce(state, transition));
}

/// An operation between `Pending` and its settlement.
///
/// Dropping it unsettled dispatches `Cancelled`, so `loading` cannot stay stuck when the
/// caller abandons the operation's future mid-call.
struct PendingOp<'a> {
    state: &'a watch::Sender<CartState>,
    op: Operation,
    settled: bool,
}

impl PendingOp<'_> {
    fn fulfil(mut self, action: CartAction) {
        self.settled = true;
        dispatch(self.state, Transition::Fulfilled(action));
        let total_count = self.state.borrow().total_count();
        info!(op = %self.op, total_count, "Fulfilled");
    }

    fn reject(mut self, e: RemoteError) -> CartError {
        self.settled = true;
        let err = CartError::from(e);
        warn!(op = %self.op, error = %err, "Rejected");
        dispatch(self.state, Transition::Rejected(err.message().to_string()));
        err
    }
}

impl Drop for PendingOp<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(op = %self.op, "Cancelled before settling");
            dispatch(self.state, Transition::Cancelled);
        }
    }
}

impl<S: RemoteCartService + 'static> CartStore<S> {
    pub fn spawn_fetch(self: &Arc<Self>) -> OperationHandle<Vec<CartItem>> {
        let store = Arc::clone(self);
        OperationHandle::spawn(async move { store.fetch_cart_items().await })
    }

    pub fn spawn_add(self: &Arc<Self>, item: NewCartItem) -> OperationHandle<CartItem> {
        let store = Arc::clone(self);
        OperationHandle::spawn(async move { store.add_item_to_cart(item).await })
    }

    pub fn spawn_update(
        self: &Arc<Self>,
        id: CartItemId,
        quantity: Quantity,
    ) -> OperationHandle<CartItem> {
        let store = Arc::clone(self);
        OperationHandle::spawn(async move { store.update_cart_item_quantity(id, quantity).await })
    }

    pub fn spawn_remove(self: &Arc<Self>, id: CartItemId) -> OperationHandle<CartItemId> {
        let store = Arc::clone(self);
        OperationHandle::spawn(async move { store.remove_item_from_cart(id).await })
    }

    pub fn spawn_clear(self: &Arc<Self>) -> OperationHandle<()> {
        let store = Arc::clone(self);
        OperationHandle::spawn(async move { store.clear_all_cart().await })
    }
}
