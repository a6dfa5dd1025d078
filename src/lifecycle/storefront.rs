use crate::config::CartConfig;
use crate::model::CartItem;
use crate::remote::{CartActor, CartServiceClient};
use crate::store::CartStore;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for a storefront session.
///
/// `StorefrontSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the remote cart actor
/// - **Dependency Wiring**: Building the [`CartStore`] on top of the actor's client
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new(&CartConfig::default());
///
/// system.cart.fetch_cart_items().await?;
/// system.cart.add_item_to_cart(NewCartItem::new(101, Quantity::ONE)).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    /// The session's cart store, shared with every observer.
    pub cart: Arc<CartStore<CartServiceClient>>,

    /// Task handle for the cart actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl StorefrontSystem {
    /// Creates the system with an empty remote cart.
    pub fn new(config: &CartConfig) -> Self {
        Self::with_items(config, Vec::new())
    }

    /// Creates the system with the remote cart seeded with `items`.
    ///
    /// The local store still starts empty; it learns about the seeded lines on its
    /// first fetch.
    pub fn with_items(config: &CartConfig, items: Vec<CartItem>) -> Self {
        let (actor, client) = CartActor::new(config);
        let handle = tokio::spawn(actor.with_items(items).run());
        let cart = Arc::new(CartStore::with_config(client, config));

        Self { cart, handle }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the store drops the last client, which closes the actor's channel and
    /// ends its loop. Any other `Arc` clones of the store must be dropped first, or the
    /// actor keeps running.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.cart);

        if let Err(e) = self.handle.await {
            error!("Cart actor task failed: {:?}", e);
            return Err(format!("Cart actor task failed: {:?}", e));
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
