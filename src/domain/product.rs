use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents a sellable item held by the product store.
///
/// `id` and `version` are owned by the store: callers never choose them.
/// Field order here is the serialized order, which the ETag is computed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub version: u64,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductIn {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Reasons a `ProductIn` is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("price must be greater than 0, got {0}")]
    NonPositivePrice(f64),
}

impl ProductIn {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            description: None,
        }
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the invariants every stored product must satisfy.
    ///
    /// NaN and infinite prices are refused along with zero and negatives.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(ValidationError::NonPositivePrice(self.price));
        }
        Ok(())
    }
}

/// Response envelope for listing products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    pub data: Vec<Product>,
    pub count: usize,
}

impl From<Vec<Product>> for ProductList {
    fn from(data: Vec<Product>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}
