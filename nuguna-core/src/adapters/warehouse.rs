//! Remote analytical warehouse backend and clients

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tracing::{info, warn};

use crate::domain::result::{Error, Result};
use crate::domain::row::rows_from_json;
use crate::domain::{ResultRow, ResultSet};
use crate::ports::{QueryBackend, WarehouseClient};

const BACKEND_NAME: &str = "warehouse";

/// Production backend; uses the first result batch of each query
pub struct WarehouseBackend {
    client: Arc<dyn WarehouseClient>,
}

impl WarehouseBackend {
    pub fn new(client: Arc<dyn WarehouseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueryBackend for WarehouseBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn execute(&self, sql: &str) -> Result<ResultSet> {
        let batches = self.client.query(sql).await.map_err(|e| match e {
            Error::ExecutionFailed { .. } => e,
            other => Error::execution(BACKEND_NAME, other),
        })?;
        info!(batches = batches.len(), "Executed query on warehouse");
        Ok(batches.into_iter().next().unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
struct WarehouseRequest<'a> {
    query: &'a str,
}

/// Warehouse client speaking a JSON query API
///
/// POSTs `{ "query": sql }` and expects `[[row, ...], ...]`.
#[derive(Debug, Clone)]
pub struct HttpWarehouseClient {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpWarehouseClient {
    pub fn new(url: &str, token: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
            token: token.map(|t| t.to_string()),
        })
    }
}

#[async_trait]
impl WarehouseClient for HttpWarehouseClient {
    async fn query(&self, sql: &str) -> Result<Vec<ResultSet>> {
        let mut request = self.client.post(&self.url).json(&WarehouseRequest { query: sql });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::execution(BACKEND_NAME, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::execution(
                BACKEND_NAME,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body: JsonValue = response
            .json()
            .await
            .map_err(|e| Error::execution(BACKEND_NAME, format!("invalid response body: {}", e)))?;

        match body {
            JsonValue::Array(batches) => batches
                .into_iter()
                .map(|batch| {
                    rows_from_json(batch).ok_or_else(|| {
                        Error::execution(BACKEND_NAME, "each result batch must be an array of objects")
                    })
                })
                .collect(),
            _ => Err(Error::execution(
                BACKEND_NAME,
                "expected an array of result batches",
            )),
        }
    }
}

/// Canned warehouse used when no warehouse URL is configured
#[derive(Debug, Clone, Default)]
pub struct SampleWarehouseClient;

impl SampleWarehouseClient {
    pub fn new() -> Self {
        warn!("No warehouse URL configured, production queries will return sample rows");
        Self
    }

    fn sample_rows() -> ResultSet {
        [("Google", 1200), ("Facebook", 900)]
            .into_iter()
            .map(|(source_medium, visitor_count)| {
                let mut row = ResultRow::new();
                row.insert("source_medium".to_string(), json!(source_medium));
                row.insert("visitor_count".to_string(), json!(visitor_count));
                row
            })
            .collect()
    }
}

#[async_trait]
impl WarehouseClient for SampleWarehouseClient {
    async fn query(&self, sql: &str) -> Result<Vec<ResultSet>> {
        info!(sql, "Executing SQL query on sample warehouse");
        Ok(vec![Self::sample_rows()])
    }
}
