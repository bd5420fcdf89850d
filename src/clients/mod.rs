//! Typed clients over the store actors' mailboxes.

pub mod product_client;

pub use product_client::ProductClient;
