//! Query backend port

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::ResultSet;

/// A target that can run a SQL string and return rows
///
/// Implementations report every failure as `Error::ExecutionFailed`.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Backend name for logs (e.g., "fixture", "duckdb", "warehouse")
    fn name(&self) -> &str;

    /// Execute a resolved SQL string
    async fn execute(&self, sql: &str) -> Result<ResultSet>;
}
