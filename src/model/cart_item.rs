/// One line in the cart: a product reference plus a quantity.
///
/// # Wire Shape
/// Items travel to and from the remote cart store with camelCase field names
/// (`id`, `productId`, `quantity`). The core never embeds product data; `product_id`
/// is a foreign key only.
use serde::{Deserialize, Serialize};

use std::fmt::Display;
use std::num::NonZeroU32;

/// Type-safe identifier for cart lines, assigned by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(pub u64);

impl From<u64> for CartItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A strictly positive item quantity.
///
/// A line with quantity zero must not exist (it is removed, not zeroed), so zero is
/// unrepresentable here. Deserializing `0` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.get()).map(Self)
    }
}

impl From<NonZeroU32> for Quantity {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl CartItem {
    /// Creates a new CartItem instance.
    ///
    /// # Arguments
    /// * `id` - Line identifier (assigned by the remote store)
    /// * `product_id` - The product this line refers to
    /// * `quantity` - Number of units, at least one
    pub fn new(id: impl Into<CartItemId>, product_id: impl Into<ProductId>, quantity: Quantity) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Payload for adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl NewCartItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: Quantity) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// Payload for changing the quantity of an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_rejects_zero() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(Quantity::new(3).map(Quantity::get), Some(3));
        assert_eq!(Quantity::ONE.get(), 1);
    }

    #[test]
    fn test_quantity_checked_add_overflows_to_none() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert!(max.checked_add(Quantity::ONE).is_none());
        assert_eq!(Quantity::ONE.checked_add(Quantity::ONE).unwrap().get(), 2);
    }

    #[test]
    fn test_cart_item_uses_camel_case_on_the_wire() {
        let item = CartItem::new(7, 1, Quantity::new(3).unwrap());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "productId": 1, "quantity": 3 }));
    }

    #[test]
    fn test_zero_quantity_payload_does_not_deserialize() {
        let result: Result<CartItem, _> =
            serde_json::from_str(r#"{ "id": 1, "productId": 2, "quantity": 0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ids_display_with_prefix() {
        assert_eq!(CartItemId(4).to_string(), "item_4");
        assert_eq!(ProductId(9).to_string(), "product_9");
    }
}
