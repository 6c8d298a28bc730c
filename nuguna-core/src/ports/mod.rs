//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod backend;
mod inference;
mod warehouse;

pub use backend::QueryBackend;
pub use inference::InferenceClient;
pub use warehouse::WarehouseClient;
