use crate::actor_framework::{FrameworkError, Precondition};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(u64),
    #[error("version mismatch: expected {expected}, current {actual}")]
    VersionMismatch { expected: Precondition, actual: u64 },
    #[error("Invalid product: {0}")]
    Invalid(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::VersionConflict { expected, actual } => {
                ProductError::VersionMismatch { expected, actual }
            }
            FrameworkError::Rejected(reason) => ProductError::Invalid(reason),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductError {
    /// Like `From`, but keeps the product id when the store reports it missing.
    pub fn for_product(id: u64, err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(_) => ProductError::NotFound(id),
            other => other.into(),
        }
    }
}
