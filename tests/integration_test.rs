use cart_sync::config::{AddPolicy, CartConfig};
use cart_sync::lifecycle::StorefrontSystem;
use cart_sync::model::{CartItem, CartItemId, NewCartItem, Quantity};
use cart_sync::store::compute_total;

fn qty(n: u32) -> Quantity {
    Quantity::new(n).unwrap()
}

/// Full end-to-end test against the real in-memory remote cart.
#[tokio::test]
async fn test_full_storefront_integration() {
    let system = StorefrontSystem::with_items(
        &CartConfig::default(),
        vec![CartItem::new(1, 101, qty(1))],
    );
    let cart = &system.cart;

    // The store starts empty: nothing is loaded until the first fetch
    assert!(cart.snapshot().items().is_empty());

    cart.fetch_cart_items().await.expect("Failed to fetch cart");
    assert_eq!(cart.snapshot().total_count(), 1);

    // Add a new product: counted as soon as the call resolves
    let added = cart
        .add_item_to_cart(NewCartItem::new(202, qty(2)))
        .await
        .expect("Failed to add item");
    assert_eq!(added.id, CartItemId(2));
    assert_eq!(cart.snapshot().total_count(), 3);

    // Add an existing product: the remote merges, the store mirrors the merged line
    let merged = cart
        .add_item_to_cart(NewCartItem::new(101, qty(2)))
        .await
        .expect("Failed to add item");
    assert_eq!(merged.id, CartItemId(1));
    assert_eq!(merged.quantity, qty(3));
    let state = cart.snapshot();
    assert_eq!(state.items().len(), 2);
    assert_eq!(state.total_count(), 5);

    // Update quantity
    cart.update_cart_item_quantity(CartItemId(2), qty(4))
        .await
        .expect("Failed to update quantity");
    assert_eq!(cart.snapshot().total_count(), 7);

    // Local mirror agrees with the authoritative cart
    let remote = cart.fetch_cart_items().await.expect("Failed to fetch cart");
    assert_eq!(cart.snapshot().items(), remote.as_slice());

    // Remove and clear
    cart.remove_item_from_cart(CartItemId(1))
        .await
        .expect("Failed to remove item");
    assert_eq!(cart.snapshot().total_count(), 4);

    cart.clear_all_cart().await.expect("Failed to clear cart");
    let state = cart.snapshot();
    assert!(state.items().is_empty());
    assert_eq!(state.total_count(), 0);
    assert!(!state.loading());
    assert_eq!(state.error(), None);

    system.shutdown().await.expect("Failed to shutdown system");
}

/// A rejected write reaches the caller and the error slot with the same message.
#[tokio::test]
async fn test_rejected_write_is_reported_on_both_channels() {
    let config = CartConfig {
        max_quantity_per_item: 5,
        ..CartConfig::default()
    };
    let system = StorefrontSystem::new(&config);
    let cart = &system.cart;

    cart.add_item_to_cart(NewCartItem::new(1, qty(2))).await.unwrap();

    let err = cart
        .update_cart_item_quantity(CartItemId(1), qty(6))
        .await
        .expect_err("Quantity above the ceiling should fail");

    let state = cart.snapshot();
    assert_eq!(state.error(), Some(err.message()));
    assert_eq!(state.items(), &[CartItem::new(1, 1, qty(2))]);
    assert_eq!(state.total_count(), 2);
    assert!(!state.loading());

    // Unknown ids are rejected by the remote as not found
    let err = cart
        .update_cart_item_quantity(CartItemId(9), qty(1))
        .await
        .expect_err("Unknown id should fail");
    assert_eq!(err.message(), "Cart item not found: item_9");

    system.shutdown().await.expect("Failed to shutdown system");
}

/// The refetch policy produces the same local state as merging.
#[tokio::test]
async fn test_refetch_add_policy_end_to_end() {
    let config = CartConfig {
        add_policy: AddPolicy::Refetch,
        ..CartConfig::default()
    };
    let system = StorefrontSystem::with_items(&config, vec![CartItem::new(4, 40, qty(2))]);
    let cart = &system.cart;

    // The refetch also loads lines the store had never seen
    cart.add_item_to_cart(NewCartItem::new(50, qty(1))).await.unwrap();

    let state = cart.snapshot();
    assert_eq!(
        state.items(),
        &[CartItem::new(4, 40, qty(2)), CartItem::new(5, 50, qty(1))]
    );
    assert_eq!(state.total_count(), 3);

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Many concurrent adds from independent callers: the total stays derived from the items.
#[tokio::test]
async fn test_concurrent_adds() {
    let system = StorefrontSystem::new(&CartConfig::default());

    let handles: Vec<_> = (0..10u64)
        .map(|i| system.cart.spawn_add(NewCartItem::new(i % 3, qty(1))))
        .collect();

    for handle in handles {
        handle.settled().await.expect("Add failed");
    }

    let state = system.cart.snapshot();
    assert_eq!(state.items().len(), 3);
    assert_eq!(state.total_count(), compute_total(state.items()));

    // Every add reached the remote store
    let remote = system.cart.fetch_cart_items().await.unwrap();
    assert_eq!(compute_total(&remote), 10);
    assert_eq!(system.cart.snapshot().total_count(), 10);
    assert!(!system.cart.snapshot().loading());

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Independent stores do not share state.
#[tokio::test]
async fn test_independent_instances() {
    let first = StorefrontSystem::new(&CartConfig::default());
    let second = StorefrontSystem::new(&CartConfig::default());

    first
        .cart
        .add_item_to_cart(NewCartItem::new(1, qty(3)))
        .await
        .unwrap();

    assert_eq!(first.cart.snapshot().total_count(), 3);
    assert_eq!(second.cart.snapshot().total_count(), 0);
    assert!(second.cart.fetch_cart_items().await.unwrap().is_empty());

    first.shutdown().await.unwrap();
    second.shutdown().await.unwrap();
}
