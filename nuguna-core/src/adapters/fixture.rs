//! Fixture file backend
//!
//! Serves a JSON array of row objects from disk, ignoring the SQL.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::domain::result::{Error, Result};
use crate::domain::row::rows_from_json;
use crate::domain::ResultSet;
use crate::ports::QueryBackend;

const BACKEND_NAME: &str = "fixture";

#[derive(Debug, Clone)]
pub struct FixtureBackend {
    path: PathBuf,
}

impl FixtureBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the fixture file; absent, unreadable or malformed files are errors
    pub async fn load(&self) -> Result<ResultSet> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::execution(
                BACKEND_NAME,
                format!("test data file not readable at {}: {}", self.path.display(), e),
            )
        })?;

        let value: JsonValue = serde_json::from_str(&content).map_err(|e| {
            Error::execution(
                BACKEND_NAME,
                format!("invalid JSON in {}: {}", self.path.display(), e),
            )
        })?;

        let rows = rows_from_json(value).ok_or_else(|| {
            Error::execution(
                BACKEND_NAME,
                format!("{} must contain a JSON array of objects", self.path.display()),
            )
        })?;

        info!(path = %self.path.display(), rows = rows.len(), "Loaded test data from fixture file");
        Ok(rows)
    }
}

#[async_trait]
impl QueryBackend for FixtureBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn execute(&self, _sql: &str) -> Result<ResultSet> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_serves_file_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("testData.json");
        std::fs::write(
            &path,
            r#"[{"source_medium": "Naver", "visitor_count": 42}, {"source_medium": "Kakao", "visitor_count": 7}]"#,
        )
        .unwrap();

        let rows = FixtureBackend::new(&path)
            .execute("SELECT anything")
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["source_medium"], "Naver");
        assert_eq!(rows[1]["visitor_count"], 7);
    }

    #[tokio::test]
    async fn test_missing_file_is_execution_failed() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FixtureBackend::new(temp_dir.path().join("missing.json"));

        let err = backend.load().await.unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { ref backend, .. } if backend == "fixture"));
    }

    #[tokio::test]
    async fn test_non_array_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("testData.json");
        std::fs::write(&path, r#"{"rows": []}"#).unwrap();

        assert!(FixtureBackend::new(&path).load().await.is_err());
    }
}
