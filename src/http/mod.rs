//! HTTP boundary: routes, conditional headers, and status mapping.

pub mod error;
pub mod routes;

pub use routes::router;
