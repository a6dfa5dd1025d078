//! # Cart State
//!
//! The observable state of a [`CartStore`](super::CartStore). Fields are private: the
//! only write path is the reducer, and observers read through the getters.

use crate::model::CartItem;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    loading: bool,
    error: Option<String>,
    total_count: u64,
    #[serde(skip)]
    in_flight: usize,
}

impl CartState {
    /// Lines of the cart, unique by id, in the order last reported.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// `true` while at least one operation has not settled.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed operation, if it has not been cleared since.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sum of quantities over [`items`](Self::items).
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub(super) fn begin(&mut self) {
        self.in_flight += 1;
        self.loading = true;
        self.error = None;
    }

    pub(super) fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    pub(super) fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    /// Applies `f` to the item list and re-derives `total_count`.
    pub(super) fn mutate_items(&mut self, f: impl FnOnce(&mut Vec<CartItem>)) {
        f(&mut self.items);
        self.total_count = compute_total(&self.items);
    }
}

/// Sum of `quantity` across `items`.
pub fn compute_total(items: &[CartItem]) -> u64 {
    items
        .iter()
        .map(|item| u64::from(item.quantity.get()))
        .sum()
}
