//! # Cart Messages
//!
//! The request type sent from a [`CartServiceClient`](super::CartServiceClient) to the
//! [`CartActor`](super::CartActor). Each variant carries a one-shot responder, so every
//! request is a single logical round trip.

use super::error::RemoteError;
use crate::model::{CartItem, CartItemId, CartItemUpdate, NewCartItem};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the cart actor.
pub type Response<T> = oneshot::Sender<Result<T, RemoteError>>;

/// One request per remote capability.
#[derive(Debug)]
pub enum CartRequest {
    List {
        respond_to: Response<Vec<CartItem>>,
    },
    Add {
        item: NewCartItem,
        respond_to: Response<CartItem>,
    },
    Update {
        id: CartItemId,
        update: CartItemUpdate,
        respond_to: Response<CartItem>,
    },
    Remove {
        id: CartItemId,
        respond_to: Response<()>,
    },
    Clear {
        respond_to: Response<()>,
    },
}
