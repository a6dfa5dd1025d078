//! # Observability & Tracing
//!
//! Structured logging for the cart system, driven by the `RUST_LOG` environment variable.
//!
//! ```bash
//! # Settlements and remote writes
//! RUST_LOG=info cargo run
//!
//! # Pending transitions and full request payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the store
//! RUST_LOG=cart_sync::store=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store operations**: one span per call (`fetch_cart_items`, `add_item_to_cart`, …)
//!   with `Pending`, `Fulfilled` (and the resulting `total_count`) or `Rejected` events
//! - **Remote client**: one span per request sent to the cart service
//! - **Cart actor**: startup, every write with the affected id, and shutdown with the final size
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Cart actor started size=0
//! INFO add_item_to_cart{item=NewCartItem { product_id: ProductId(101), quantity: Quantity(2) }}: Created id=item_1 product_id=product_101 size=1
//! INFO add_item_to_cart{item=NewCartItem { product_id: ProductId(101), quantity: Quantity(2) }}: Fulfilled op=add total_count=2
//! WARN update_cart_item_quantity{id=CartItemId(1) quantity=Quantity(500)}: Rejected op=update_quantity error=Validation failed: quantity exceeds maximum of 99 per item
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
