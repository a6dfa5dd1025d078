//! Pure data structures shared by the remote cart service and the local store.

pub mod cart_item;

pub use cart_item::*;
