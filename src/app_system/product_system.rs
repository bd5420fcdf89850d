use tracing::{info, error};
use crate::clients::ProductClient;
use crate::actor_framework::ResourceActor;
use crate::domain::Product;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Owns the product store actor and hands out clients to it.
///
/// Must be created from inside a tokio runtime.
pub struct ProductSystem {
    pub product_client: ProductClient,
    handle: tokio::task::JoinHandle<()>,
}

impl ProductSystem {
    pub fn new(mailbox_capacity: usize) -> Self {
        // Sequence starts at 0; the first product gets id 1. Never rewound.
        let product_seq = Arc::new(AtomicU64::new(0));
        let next_product_id = move || product_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(mailbox_capacity, next_product_id);
        let product_client = ProductClient::new(product_resource_client);
        let handle = tokio::spawn(product_actor.run());

        info!(mailbox_capacity, "Product system started");

        Self {
            product_client,
            handle,
        }
    }

    /// Drops the system's client and waits for the actor to drain.
    ///
    /// Clones handed out earlier (e.g. to the HTTP router) must be dropped
    /// first, otherwise the actor keeps running.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.product_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
