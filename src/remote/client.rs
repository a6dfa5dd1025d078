//! # Cart Service Client
//!
//! This module defines the client half of the in-process remote cart store.

use super::error::RemoteError;
use super::message::{CartRequest, Response};
use super::service::RemoteCartService;
use crate::model::{CartItem, CartItemId, CartItemUpdate, NewCartItem};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// ## CartServiceClient
///
/// Forwards the five cart capabilities to a [`CartActor`](super::CartActor) over a Tokio
/// mpsc channel and awaits each answer on a oneshot channel.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Closed actor** – surfaces as [`RemoteError::ServiceClosed`].
/// * **Dropped responder** – surfaces as [`RemoteError::ServiceDropped`].
#[derive(Clone)]
pub struct CartServiceClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartServiceClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    async fn call<T>(
        &self,
        build: impl FnOnce(Response<T>) -> CartRequest,
    ) -> Result<T, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| RemoteError::ServiceClosed)?;
        response.await.map_err(|_| RemoteError::ServiceDropped)?
    }
}

#[async_trait]
impl RemoteCartService for CartServiceClient {
    #[instrument(skip(self))]
    async fn get_cart_items(&self) -> Result<Vec<CartItem>, RemoteError> {
        debug!("Sending request");
        self.call(|respond_to| CartRequest::List { respond_to }).await
    }

    #[instrument(skip(self))]
    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, RemoteError> {
        debug!("Sending request");
        self.call(|respond_to| CartRequest::Add { item, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn update_cart_item(
        &self,
        id: CartItemId,
        update: CartItemUpdate,
    ) -> Result<CartItem, RemoteError> {
        debug!("Sending request");
        self.call(|respond_to| CartRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn remove_from_cart(&self, id: CartItemId) -> Result<(), RemoteError> {
        debug!("Sending request");
        self.call(|respond_to| CartRequest::Remove { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<(), RemoteError> {
        debug!("Sending request");
        self.call(|respond_to| CartRequest::Clear { respond_to }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quantity;
    use crate::remote::mock::{create_mock_client, expect_add, expect_remove};

    #[tokio::test]
    async fn test_add_to_cart_round_trip() {
        let (client, mut receiver) = create_mock_client(10);

        let add_task = tokio::spawn(async move {
            client
                .add_to_cart(NewCartItem::new(5, Quantity::new(2).unwrap()))
                .await
        });

        let (item, responder) = expect_add(&mut receiver)
            .await
            .expect("Expected Add request");
        assert_eq!(item.product_id.0, 5);
        assert_eq!(item.quantity.get(), 2);

        responder
            .send(Ok(CartItem::new(1, 5, item.quantity)))
            .unwrap();

        let added = add_task.await.unwrap().unwrap();
        assert_eq!(added.id, CartItemId(1));
    }

    #[tokio::test]
    async fn test_remote_error_is_forwarded() {
        let (client, mut receiver) = create_mock_client(10);

        let remove_task = tokio::spawn(async move { client.remove_from_cart(CartItemId(3)).await });

        let (id, responder) = expect_remove(&mut receiver)
            .await
            .expect("Expected Remove request");
        responder
            .send(Err(RemoteError::Server("disk full".into())))
            .unwrap();

        assert_eq!(id, CartItemId(3));
        assert_eq!(
            remove_task.await.unwrap(),
            Err(RemoteError::Server("disk full".into()))
        );
    }

    #[tokio::test]
    async fn test_dropped_responder_maps_to_service_dropped() {
        let (client, mut receiver) = create_mock_client(10);

        let clear_task = tokio::spawn(async move { client.clear_cart().await });

        // Drop the request (and its responder) without answering.
        drop(receiver.recv().await);

        assert_eq!(clear_task.await.unwrap(), Err(RemoteError::ServiceDropped));
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_service_closed() {
        let (client, receiver) = create_mock_client(10);
        drop(receiver);

        assert_eq!(
            client.get_cart_items().await,
            Err(RemoteError::ServiceClosed)
        );
    }
}
