use tracing::{debug, instrument};
use crate::actor_framework::{Precondition, ResourceClient};
use crate::domain::{Product, ProductIn};
use crate::product_actor::ProductError;

/// Client for interacting with the product store actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.list().await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: u64) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.inner.get(id).await.map_err(ProductError::from)
    }

    #[instrument(fields(product_name = %input.name), skip(self, input))]
    pub async fn create_product(&self, input: ProductIn) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(input).await.map_err(ProductError::from)
    }

    /// Replaces the product if `precondition` admits its current version.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: u64,
        input: ProductIn,
        precondition: Precondition,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, input, precondition)
            .await
            .map_err(|e| ProductError::for_product(id, e))
    }

    /// Returns `false` when there was nothing to delete.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: u64) -> Result<bool, ProductError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(ProductError::from)
    }
}
