//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Hugging Face inference API for InferenceClient
//! - Fixture JSON file, DuckDB file and local fallback chain for QueryBackend
//! - Warehouse backend over HTTP or canned WarehouseClient implementations

pub mod duckdb;
pub mod fixture;
pub mod huggingface;
pub mod local;
pub mod warehouse;

#[cfg(test)]
pub mod mock_server;
