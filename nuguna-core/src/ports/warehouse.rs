//! Analytical warehouse client port

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::ResultSet;

/// Remote warehouse query client
///
/// Mirrors the warehouse SDK shape: a query yields a list of result
/// batches and callers use the first one as the row sequence.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    async fn query(&self, sql: &str) -> Result<Vec<ResultSet>>;
}
