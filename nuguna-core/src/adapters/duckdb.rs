//! DuckDB embedded store backend
//!
//! Used in local mode when no fixture file is available. A connection is
//! opened for each query and closed when the query returns; nothing is
//! pooled between requests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use duckdb::{params, Connection};
use serde_json::{json, Value as JsonValue};

use crate::domain::result::{Error, Result};
use crate::domain::{ResultRow, ResultSet};
use crate::ports::QueryBackend;

const BACKEND_NAME: &str = "duckdb";

/// Sample report rows written by `seed_sample_data`: (source_medium, visitor_count, user_id)
pub const SAMPLE_ROWS: [(&str, i32, &str); 3] = [
    ("Google", 1200, "user1"),
    ("Facebook", 900, "user2"),
    ("Email", 750, "user3"),
];

fn db_error(e: duckdb::Error) -> Error {
    Error::execution(BACKEND_NAME, e)
}

/// DuckDB-file query backend
#[derive(Debug, Clone)]
pub struct DuckDbBackend {
    db_path: PathBuf,
}

impl DuckDbBackend {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn open_connection(&self) -> Result<Connection> {
        // Extension autoloading stays off so a cached extension can never be
        // pulled in behind our back.
        let config = duckdb::Config::default()
            .enable_autoload_extension(false)
            .map_err(db_error)?;
        Connection::open_with_flags(&self.db_path, config).map_err(|e| {
            Error::execution(
                BACKEND_NAME,
                format!("connection error for {}: {}", self.db_path.display(), e),
            )
        })
    }

    /// Execute a query synchronously and collect rows as column maps
    pub fn query_rows(&self, sql: &str) -> Result<ResultSet> {
        let conn = self.open_connection()?;
        let mut stmt = conn.prepare(sql).map_err(db_error)?;
        let mut result_rows = stmt.query([]).map_err(db_error)?;

        // Collect values first; column names are read once the rows are dropped
        let mut values: Vec<Vec<JsonValue>> = Vec::new();
        let mut column_count = 0;

        while let Some(row) = result_rows.next().map_err(db_error)? {
            if values.is_empty() {
                column_count = row.as_ref().column_count();
            }
            values.push((0..column_count).map(|i| column_value(row, i)).collect());
        }

        drop(result_rows);

        let columns: Vec<String> = (0..column_count)
            .map(|i| {
                stmt.column_name(i)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|_| format!("col{}", i))
            })
            .collect();

        Ok(values
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect::<ResultRow>())
            .collect())
    }

    /// Recreate `source_report` and fill it with `SAMPLE_ROWS`
    pub fn seed_sample_data(&self) -> Result<usize> {
        let conn = self.open_connection()?;
        conn.execute_batch(
            "DROP TABLE IF EXISTS source_report;
             CREATE TABLE source_report (
                 source_medium TEXT,
                 visitor_count INTEGER,
                 user_id TEXT
             );",
        )
        .map_err(db_error)?;

        let mut insert = conn
            .prepare(
                "INSERT INTO source_report (source_medium, visitor_count, user_id) VALUES (?, ?, ?)",
            )
            .map_err(db_error)?;
        for (source_medium, visitor_count, user_id) in SAMPLE_ROWS {
            insert
                .execute(params![source_medium, visitor_count, user_id])
                .map_err(db_error)?;
        }

        Ok(SAMPLE_ROWS.len())
    }
}

#[async_trait]
impl QueryBackend for DuckDbBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn execute(&self, sql: &str) -> Result<ResultSet> {
        let backend = self.clone();
        let sql = sql.to_string();
        tokio::task::spawn_blocking(move || backend.query_rows(&sql))
            .await
            .map_err(|e| Error::execution(BACKEND_NAME, e))?
    }
}

/// Convert a DuckDB cell to JSON
fn column_value(row: &duckdb::Row, idx: usize) -> JsonValue {
    use duckdb::types::ValueRef;

    match row.get_ref(idx) {
        Ok(ValueRef::Null) => JsonValue::Null,
        Ok(ValueRef::Boolean(b)) => JsonValue::Bool(b),
        Ok(ValueRef::TinyInt(i)) => json!(i),
        Ok(ValueRef::SmallInt(i)) => json!(i),
        Ok(ValueRef::Int(i)) => json!(i),
        Ok(ValueRef::BigInt(i)) => json!(i),
        // SUM over INTEGER yields HUGEINT
        Ok(ValueRef::HugeInt(i)) => i64::try_from(i)
            .map(|v| json!(v))
            .unwrap_or_else(|_| JsonValue::String(i.to_string())),
        Ok(ValueRef::UTinyInt(i)) => json!(i),
        Ok(ValueRef::USmallInt(i)) => json!(i),
        Ok(ValueRef::UInt(i)) => json!(i),
        Ok(ValueRef::UBigInt(i)) => json!(i),
        Ok(ValueRef::Float(f)) => json!(f),
        Ok(ValueRef::Double(f)) => json!(f),
        Ok(ValueRef::Decimal(d)) => {
            let s = d.to_string();
            match s.parse::<f64>() {
                Ok(f) => json!(f),
                Err(_) => JsonValue::String(s),
            }
        }
        Ok(ValueRef::Text(bytes)) => JsonValue::String(String::from_utf8_lossy(bytes).into_owned()),
        Ok(ValueRef::Blob(bytes)) => JsonValue::String(format!("<blob {} bytes>", bytes.len())),
        Ok(other) => JsonValue::String(format!("{:?}", other)),
        Err(_) => JsonValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_backend(temp_dir: &TempDir) -> DuckDbBackend {
        let backend = DuckDbBackend::new(temp_dir.path().join("test.db"));
        backend.seed_sample_data().unwrap();
        backend
    }

    #[test]
    fn test_seed_and_select_all() {
        let temp_dir = TempDir::new().unwrap();
        let backend = seeded_backend(&temp_dir);

        let rows = backend
            .query_rows("SELECT * FROM source_report ORDER BY visitor_count DESC")
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["source_medium"], "Google");
        assert_eq!(rows[0]["visitor_count"], 1200);
        assert_eq!(rows[0]["user_id"], "user1");
        let columns: Vec<&String> = rows[0].keys().collect();
        assert_eq!(columns, ["source_medium", "visitor_count", "user_id"]);
    }

    #[test]
    fn test_sum_is_reported_as_number() {
        let temp_dir = TempDir::new().unwrap();
        let backend = seeded_backend(&temp_dir);

        let rows = backend
            .query_rows("SELECT SUM(visitor_count) AS visitor_count FROM source_report")
            .unwrap();

        assert_eq!(rows[0]["visitor_count"], 2850);
    }

    #[test]
    fn test_seed_is_repeatable() {
        let temp_dir = TempDir::new().unwrap();
        let backend = seeded_backend(&temp_dir);
        assert_eq!(backend.seed_sample_data().unwrap(), 3);

        let rows = backend.query_rows("SELECT * FROM source_report").unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_empty_result() {
        let temp_dir = TempDir::new().unwrap();
        let backend = seeded_backend(&temp_dir);

        let rows = backend
            .query_rows("SELECT * FROM source_report WHERE visitor_count > 100000")
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_driver_error_is_execution_failed() {
        let temp_dir = TempDir::new().unwrap();
        let backend = DuckDbBackend::new(temp_dir.path().join("empty.db"));

        let err = backend
            .execute("SELECT * FROM source_report")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { ref backend, .. } if backend == "duckdb"));
    }
}
