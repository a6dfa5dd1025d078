//! # Storefront Session
//!
//! Runs a scripted shopping session against the in-memory remote cart:
//! 1.  Loading the cart from a seeded remote store.
//! 2.  Adding products and changing quantities.
//! 3.  A failing write, surfaced both to the caller and in the shared error slot.
//! 4.  Two overlapping operations issued without waiting.
//!
//! Configure with `CART_*` variables (see [`cart_sync::config`]) and `RUST_LOG`.

use cart_sync::config::CartConfig;
use cart_sync::lifecycle::{setup_tracing, StorefrontSystem};
use cart_sync::model::{CartItem, CartItemId, NewCartItem, Quantity};
use cart_sync::store::CartState;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting storefront session");

    let seeded = vec![CartItem::new(1, 101, Quantity::ONE)];
    let system = StorefrontSystem::with_items(&config, seeded);
    let cart = system.cart.clone();

    // Badge observer: re-renders on every transition.
    let mut updates = cart.subscribe();
    let badge = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            render_badge(&state);
        }
    });

    let span = tracing::info_span!("initial_load");
    async {
        cart.fetch_cart_items().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("shopping");
    async {
        let qty = |n| Quantity::new(n).ok_or_else(|| "quantity must be positive".to_string());

        cart.add_item_to_cart(NewCartItem::new(202, qty(2)?))
            .await
            .map_err(|e| e.to_string())?;
        cart.add_item_to_cart(NewCartItem::new(101, Quantity::ONE))
            .await
            .map_err(|e| e.to_string())?;
        cart.update_cart_item_quantity(CartItemId(2), qty(3)?)
            .await
            .map_err(|e| e.to_string())?;

        // Over the per-item ceiling: the caller and the error slot both see it.
        if let Some(over) = config.max_quantity_per_item.checked_add(1) {
            if let Err(e) = cart
                .update_cart_item_quantity(CartItemId(1), qty(over)?)
                .await
            {
                error!(error = %e, "Quantity change rejected");
            }
            cart.clear_error();
        }

        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("overlapping_operations");
    async {
        let update = cart.spawn_update(CartItemId(1), Quantity::ONE);
        let remove = cart.spawn_remove(CartItemId(2));
        info!(update = ?update.status(), remove = ?remove.status(), "Issued without waiting");

        let updated = update.settled().await;
        let removed = remove.settled().await;
        info!(?updated, ?removed, "Both settled");
    }
    .instrument(span)
    .await;

    let state = cart.snapshot();
    info!(
        items = state.items().len(),
        total_count = state.total_count(),
        "Final cart"
    );

    cart.clear_all_cart().await.map_err(|e| e.to_string())?;

    drop(cart);
    system.shutdown().await?;
    badge.await.map_err(|e| e.to_string())?;

    info!("Session completed successfully");
    Ok(())
}

fn render_badge(state: &CartState) {
    match (state.loading(), state.error()) {
        (_, Some(message)) => info!(total_count = state.total_count(), error = message, "Badge"),
        (true, None) => info!(total_count = state.total_count(), "Badge (syncing)"),
        (false, None) => info!(total_count = state.total_count(), "Badge"),
    }
}
