//! # RemoteCartService Trait
//!
//! The contract the local store consumes. Transport is an implementation detail: the
//! crate ships [`CartServiceClient`](super::CartServiceClient), which talks to an
//! in-process [`CartActor`](super::CartActor), but an HTTP or RPC adapter only has to
//! implement these five calls.
//!
//! No retry, batching or caching happens at this boundary.

use super::error::RemoteError;
use crate::model::{CartItem, CartItemId, CartItemUpdate, NewCartItem};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RemoteCartService: Send + Sync {
    /// Fetch every line of the authoritative cart.
    async fn get_cart_items(&self) -> Result<Vec<CartItem>, RemoteError>;

    /// Add a product. Returns the created or merged line.
    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, RemoteError>;

    /// Change the quantity of an existing line. Returns the updated line.
    async fn update_cart_item(
        &self,
        id: CartItemId,
        update: CartItemUpdate,
    ) -> Result<CartItem, RemoteError>;

    async fn remove_from_cart(&self, id: CartItemId) -> Result<(), RemoteError>;

    async fn clear_cart(&self) -> Result<(), RemoteError>;
}

#[async_trait]
impl<S: RemoteCartService + ?Sized> RemoteCartService for Arc<S> {
    async fn get_cart_items(&self) -> Result<Vec<CartItem>, RemoteError> {
        (**self).get_cart_items().await
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, RemoteError> {
        (**self).add_to_cart(item).await
    }

    async fn update_cart_item(
        &self,
        id: CartItemId,
        update: CartItemUpdate,
    ) -> Result<CartItem, RemoteError> {
        (**self).update_cart_item(id, update).await
    }

    async fn remove_from_cart(&self, id: CartItemId) -> Result<(), RemoteError> {
        (**self).remove_from_cart(id).await
    }

    async fn clear_cart(&self) -> Result<(), RemoteError> {
        (**self).clear_cart().await
    }
}
