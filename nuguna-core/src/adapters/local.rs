//! Local-mode backend: fixture file first, embedded store second

use async_trait::async_trait;
use tracing::{info, warn};

use super::duckdb::DuckDbBackend;
use super::fixture::FixtureBackend;
use crate::domain::result::Result;
use crate::domain::ResultSet;
use crate::ports::QueryBackend;

/// The fixture file is checked on every call, so dropping a file in place
/// (or removing it) takes effect without a restart.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    fixture: FixtureBackend,
    store: DuckDbBackend,
}

impl LocalBackend {
    pub fn new(fixture: FixtureBackend, store: DuckDbBackend) -> Self {
        Self { fixture, store }
    }
}

#[async_trait]
impl QueryBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn execute(&self, sql: &str) -> Result<ResultSet> {
        info!("Local environment detected, executing query with test data");
        match self.fixture.load().await {
            Ok(rows) => Ok(rows),
            Err(e) => {
                warn!(
                    error = %e,
                    store = %self.store.path().display(),
                    "Failed to load fixture data, executing query against embedded store"
                );
                self.store.execute(sql).await
            }
        }
    }
}
