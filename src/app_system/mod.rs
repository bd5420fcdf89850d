//! System orchestration, startup, and shutdown logic.

pub mod product_system;
pub mod telemetry;

pub use product_system::*;
pub use telemetry::*;
