//! # Reducer
//!
//! Every change to a [`CartState`] is a [`Transition`] applied by [`reduce`]. Operations
//! emit `Pending` before their remote call and exactly one of `Fulfilled`, `Rejected` or
//! `Cancelled` when it settles. Item effects are only ever applied on `Fulfilled`;
//! nothing is applied speculatively, so nothing needs rolling back.

use super::state::CartState;
use crate::model::{CartItem, CartItemId};
use std::collections::HashSet;
use std::fmt::Display;

/// Which store operation a transition belongs to. Used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Add,
    UpdateQuantity,
    Remove,
    Clear,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Fetch => "fetch",
            Operation::Add => "add",
            Operation::UpdateQuantity => "update_quantity",
            Operation::Remove => "remove",
            Operation::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// The effect of a successful remote call on the local item list.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Full replace with the authoritative list.
    Fetched(Vec<CartItem>),
    /// Insert the returned line, or overwrite the line with the same id. The remote store
    /// returns the cumulative merged line, so incrementing would count the add twice.
    Added(CartItem),
    /// Overwrite the line with the same id; no-op if it is not held locally.
    Updated(CartItem),
    Removed(CartItemId),
    Cleared,
    /// The write succeeded but carries no local effect.
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Pending,
    Fulfilled(CartAction),
    Rejected(String),
    /// The caller dropped the operation before the remote call resolved. Its outcome is
    /// unknown, so items and error are left alone.
    Cancelled,
}

pub fn reduce(state: &mut CartState, transition: Transition) {
    match transition {
        Transition::Pending => state.begin(),
        Transition::Fulfilled(action) => {
            state.settle();
            apply(state, action);
        }
        Transition::Rejected(message) => {
            state.settle();
            state.set_error(Some(message));
        }
        Transition::Cancelled => state.settle(),
    }
}

fn apply(state: &mut CartState, action: CartAction) {
    match action {
        CartAction::Fetched(fetched) => state.mutate_items(|items| {
            let mut seen = HashSet::with_capacity(fetched.len());
            *items = fetched
                .into_iter()
                .filter(|item| seen.insert(item.id))
                .collect();
        }),
        CartAction::Added(added) => state.mutate_items(|items| {
            match items.iter_mut().find(|item| item.id == added.id) {
                Some(existing) => *existing = added,
                None => items.push(added),
            }
        }),
        CartAction::Updated(updated) => state.mutate_items(|items| {
            if let Some(existing) = items.iter_mut().find(|item| item.id == updated.id) {
                *existing = updated;
            }
        }),
        CartAction::Removed(id) => state.mutate_items(|items| items.retain(|item| item.id != id)),
        CartAction::Cleared => state.mutate_items(Vec::clear),
        CartAction::Acknowledged => {}
    }
}
