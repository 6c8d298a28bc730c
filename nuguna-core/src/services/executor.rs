//! Query executor - resolves the SQL and dispatches to the configured backend

use std::sync::Arc;

use tracing::{info, warn};

use super::default_query::FALLBACK_QUERY;
use crate::config::Environment;
use crate::domain::result::Result;
use crate::domain::{ResultSet, SqlQuery};
use crate::ports::QueryBackend;

/// Generated SQL the local store cannot run; swapped for the plain fallback query.
// FIXME: this matches only the exact text "function" and looks like a leftover
// from an early model that returned that word. Not extended to other outputs.
const LOCAL_UNSUPPORTED_SQL: &str = "function";

pub struct QueryExecutor {
    environment: Environment,
    backend: Arc<dyn QueryBackend>,
}

impl QueryExecutor {
    pub fn new(environment: Environment, backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            environment,
            backend,
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Run the query and return its rows in backend order
    pub async fn execute(&self, query: SqlQuery) -> Result<ResultSet> {
        let mut sql = query.resolve();

        if self.environment.is_local() && sql == LOCAL_UNSUPPORTED_SQL {
            warn!(sql = %sql, "Generated SQL is not executable locally, using fallback query");
            sql = FALLBACK_QUERY.to_string();
        }

        info!(backend = self.backend.name(), sql = %sql, "Executing SQL query");
        let rows = self.backend.execute(&sql).await?;
        info!(rows = rows.len(), "Query executed");
        Ok(rows)
    }
}
