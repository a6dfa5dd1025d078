//! # In-Memory Cart Store
//!
//! This module defines the `CartActor`, a reference implementation of the authoritative
//! remote cart. It owns the cart lines and processes requests sequentially, which gives
//! it exclusive access to its state without any locking.

use super::client::CartServiceClient;
use super::error::RemoteError;
use super::message::CartRequest;
use crate::config::CartConfig;
use crate::model::{CartItem, CartItemId, CartItemUpdate, NewCartItem, Quantity};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The authoritative cart, run as its own Tokio task.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `CartActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Use**: Hand the client to a [`CartStore`](crate::store::CartStore).
///
/// # Operations
///
/// * **List**: returns every line in insertion order.
/// * **Add**: merges by product. If a line for the product exists its quantity grows;
///   otherwise a new line is created with the next id. Returns the resulting line.
/// * **Update**: replaces the quantity of an existing line, or fails with `NotFound`.
/// * **Remove**: removes the line if present. Removing an unknown id succeeds.
/// * **Clear**: empties the cart.
///
/// Quantities above `max_quantity_per_item` are rejected with a validation error.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    items: Vec<CartItem>,
    next_id: u64,
    max_quantity: u32,
    latency: Option<Duration>,
}

impl CartActor {
    /// Creates a new `CartActor` and its associated `CartServiceClient`.
    ///
    /// The channel capacity, quantity ceiling and simulated latency come from `config`.
    pub fn new(config: &CartConfig) -> (Self, CartServiceClient) {
        let (sender, receiver) = mpsc::channel(config.channel_buffer);
        let actor = Self {
            receiver,
            items: Vec::new(),
            next_id: 1,
            max_quantity: config.max_quantity_per_item,
            latency: config.latency,
        };
        (actor, CartServiceClient::new(sender))
    }

    /// Seeds the cart. Ids handed out afterwards continue past the largest seeded id.
    pub fn with_items(mut self, items: Vec<CartItem>) -> Self {
        let highest = items.iter().map(|item| item.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest.saturating_add(1));
        self.items = items;
        self
    }

    /// Runs the actor's event loop, processing requests until every client is dropped.
    pub async fn run(mut self) {
        info!(size = self.items.len(), "Cart actor started");

        while let Some(msg) = self.receiver.recv().await {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }

            match msg {
                CartRequest::List { respond_to } => {
                    debug!(size = self.items.len(), "List");
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                CartRequest::Add { item, respond_to } => {
                    debug!(?item, "Add");
                    let result = self.add(item);
                    if let Err(e) = &result {
                        warn!(error = %e, "Add failed");
                    }
                    let _ = respond_to.send(result);
                }
                CartRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(%id, ?update, "Update");
                    let result = self.update(id, update);
                    if let Err(e) = &result {
                        warn!(%id, error = %e, "Update failed");
                    }
                    let _ = respond_to.send(result);
                }
                CartRequest::Remove { id, respond_to } => {
                    let before = self.items.len();
                    self.items.retain(|item| item.id != id);
                    let found = self.items.len() != before;
                    info!(%id, found, size = self.items.len(), "Removed");
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Clear { respond_to } => {
                    self.items.clear();
                    info!("Cleared");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(size = self.items.len(), "Shutdown");
    }

    fn add(&mut self, new_item: NewCartItem) -> Result<CartItem, RemoteError> {
        let max_quantity = self.max_quantity;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == new_item.product_id)
        {
            let merged = existing
                .quantity
                .checked_add(new_item.quantity)
                .filter(|q| q.get() <= max_quantity)
                .ok_or_else(|| exceeds_max(max_quantity))?;
            existing.quantity = merged;
            info!(id = %existing.id, product_id = %existing.product_id, quantity = %merged, "Merged");
            return Ok(existing.clone());
        }

        check_max(new_item.quantity, max_quantity)?;
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| RemoteError::Server("cart item ids exhausted".to_string()))?;
        let item = CartItem::new(self.next_id, new_item.product_id, new_item.quantity);
        self.next_id = next_id;
        self.items.push(item.clone());
        info!(id = %item.id, product_id = %item.product_id, size = self.items.len(), "Created");
        Ok(item)
    }

    fn update(&mut self, id: CartItemId, update: CartItemUpdate) -> Result<CartItem, RemoteError> {
        check_max(update.quantity, self.max_quantity)?;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(RemoteError::NotFound(id))?;
        item.quantity = update.quantity;
        info!(%id, quantity = %item.quantity, "Updated");
        Ok(item.clone())
    }
}

fn check_max(quantity: Quantity, max_quantity: u32) -> Result<(), RemoteError> {
    if quantity.get() > max_quantity {
        return Err(exceeds_max(max_quantity));
    }
    Ok(())
}

fn exceeds_max(max_quantity: u32) -> RemoteError {
    RemoteError::Validation(format!("quantity exceeds maximum of {max_quantity} per item"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RemoteCartService;

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn spawn_actor(config: &CartConfig) -> CartServiceClient {
        let (actor, client) = CartActor::new(config);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_cart_actor_full_lifecycle() {
        let client = spawn_actor(&CartConfig::default());

        // 1. Add two products
        let first = client.add_to_cart(NewCartItem::new(10, qty(1))).await.unwrap();
        let second = client.add_to_cart(NewCartItem::new(20, qty(2))).await.unwrap();
        assert_eq!(first.id, CartItemId(1));
        assert_eq!(second.id, CartItemId(2));

        // 2. Adding the same product again merges into the existing line
        let merged = client.add_to_cart(NewCartItem::new(10, qty(3))).await.unwrap();
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, qty(4));

        // 3. Update
        let updated = client
            .update_cart_item(second.id, CartItemUpdate { quantity: qty(5) })
            .await
            .unwrap();
        assert_eq!(updated.quantity, qty(5));

        // 4. List keeps insertion order
        let items = client.get_cart_items().await.unwrap();
        assert_eq!(
            items,
            vec![CartItem::new(1, 10, qty(4)), CartItem::new(2, 20, qty(5))]
        );

        // 5. Remove, then clear
        client.remove_from_cart(first.id).await.unwrap();
        assert_eq!(client.get_cart_items().await.unwrap().len(), 1);
        client.clear_cart().await.unwrap();
        assert!(client.get_cart_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_id_succeeds() {
        let client = spawn_actor(&CartConfig::default());
        assert_eq!(client.remove_from_cart(CartItemId(42)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let client = spawn_actor(&CartConfig::default());
        let result = client
            .update_cart_item(CartItemId(7), CartItemUpdate { quantity: qty(3) })
            .await;
        assert_eq!(result, Err(RemoteError::NotFound(CartItemId(7))));
    }

    #[tokio::test]
    async fn test_quantity_ceiling_is_enforced() {
        let config = CartConfig {
            max_quantity_per_item: 5,
            ..CartConfig::default()
        };
        let client = spawn_actor(&config);

        let created = client.add_to_cart(NewCartItem::new(1, qty(4))).await.unwrap();

        let merge = client.add_to_cart(NewCartItem::new(1, qty(2))).await;
        assert!(matches!(merge, Err(RemoteError::Validation(_))));

        let update = client
            .update_cart_item(created.id, CartItemUpdate { quantity: qty(6) })
            .await;
        assert!(matches!(update, Err(RemoteError::Validation(_))));

        // Rejected writes leave the line untouched
        let items = client.get_cart_items().await.unwrap();
        assert_eq!(items, vec![CartItem::new(1, 1, qty(4))]);
    }

    #[tokio::test]
    async fn test_seeded_items_continue_id_sequence() {
        let (actor, client) = CartActor::new(&CartConfig::default());
        let actor = actor.with_items(vec![CartItem::new(7, 1, qty(3))]);
        tokio::spawn(actor.run());

        let added = client.add_to_cart(NewCartItem::new(2, qty(1))).await.unwrap();
        assert_eq!(added.id, CartItemId(8));
    }

    #[tokio::test]
    async fn test_exhausted_id_space_rejects_new_lines() {
        let (actor, client) = CartActor::new(&CartConfig::default());
        let actor = actor.with_items(vec![CartItem::new(u64::MAX, 1, qty(1))]);
        tokio::spawn(actor.run());

        // No id is left for a new line
        let added = client.add_to_cart(NewCartItem::new(2, qty(1))).await;
        assert!(matches!(added, Err(RemoteError::Server(_))));

        // Existing lines still merge
        let merged = client.add_to_cart(NewCartItem::new(1, qty(1))).await.unwrap();
        assert_eq!(merged.id, CartItemId(u64::MAX));
        assert_eq!(merged.quantity, qty(2));
        assert_eq!(client.get_cart_items().await.unwrap().len(), 1);
    }
}
