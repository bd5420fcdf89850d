//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_update`] to answer the
//! requests the code under test sends, without a running actor.

use crate::actor_framework::{Entity, Precondition, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreatePayload, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::UpdatePayload, Precondition, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, payload, precondition, respond_to }) => {
            Some((id, payload, precondition, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<bool>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::clients::ProductClient;
    use crate::domain::{Product, ProductIn};
    use crate::product_actor::ProductError;

    #[tokio::test]
    async fn create_forwards_payload() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let create_task = tokio::spawn(async move {
            client.create_product(ProductIn::new("Banana", 10.0)).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Banana");
        let product = Product::from_create(1, payload);
        responder.send(Ok(product.clone())).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok(product));
    }

    #[tokio::test]
    async fn update_forwards_expected_version_and_maps_conflict() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let update_task = tokio::spawn(async move {
            client.update_product(1, ProductIn::new("X", 9.9), Precondition::Version(999)).await
        });

        let (id, payload, precondition, responder) =
            expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, 1);
        assert_eq!(payload.name, "X");
        assert_eq!(precondition, Precondition::Version(999));
        responder
            .send(Err(FrameworkError::VersionConflict { expected: precondition, actual: 1 }))
            .unwrap();

        assert_eq!(
            update_task.await.unwrap(),
            Err(ProductError::VersionMismatch { expected: Precondition::Version(999), actual: 1 })
        );
    }

    #[tokio::test]
    async fn update_maps_missing_item_to_product_id() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let update_task = tokio::spawn(async move {
            client.update_product(9999, ProductIn::new("Nada", 1.0), Precondition::Unconditional).await
        });

        let (_, _, precondition, responder) =
            expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(precondition, Precondition::Unconditional);
        responder
            .send(Err(FrameworkError::NotFound("product 9999".into())))
            .unwrap();

        assert_eq!(update_task.await.unwrap(), Err(ProductError::NotFound(9999)));
    }

    #[tokio::test]
    async fn dropped_responder_is_a_communication_error() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let get_task = tokio::spawn(async move { client.get_product(1).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 1);
        drop(responder);

        assert_eq!(
            get_task.await.unwrap(),
            Err(ProductError::ActorCommunicationError("Actor dropped".into()))
        );
    }

    #[tokio::test]
    async fn delete_reports_store_answer() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let delete_task = tokio::spawn(async move { client.delete_product(5).await });

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        assert_eq!(id, 5);
        responder.send(Ok(false)).unwrap();

        assert_eq!(delete_task.await.unwrap(), Ok(false));
    }
}
