use crate::actor_framework::Entity;
use crate::domain::{Product, ProductIn};

impl Entity for Product {
    type Id = u64;
    type CreatePayload = ProductIn;
    type UpdatePayload = ProductIn;

    const KIND: &'static str = "product";

    fn id(&self) -> u64 {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Creates a new Product at version 1.
    ///
    /// # Arguments
    /// * `id` - Identifier drawn from the store's sequence
    /// * `payload` - Validated name, price and optional description
    fn from_create(id: u64, payload: ProductIn) -> Self {
        Self {
            id,
            name: payload.name,
            price: payload.price,
            description: payload.description,
            version: 1,
        }
    }

    /// Replaces name, price and description. A missing description clears it.
    fn on_update(&mut self, payload: ProductIn) {
        self.name = payload.name;
        self.price = payload.price;
        self.description = payload.description;
    }

    fn validate_create(payload: &ProductIn) -> Result<(), String> {
        payload.validate().map_err(|e| e.to_string())
    }

    fn validate_update(payload: &ProductIn) -> Result<(), String> {
        payload.validate().map_err(|e| e.to_string())
    }
}
