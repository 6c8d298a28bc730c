//! Remote inference port - translation and text-to-SQL models

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::Endpoint;

/// Client for hosted inference models
///
/// One call is one HTTP attempt against one endpoint. Fallback and retry
/// policy live in the services, never in implementations.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Translate `text` to English using the model at `endpoint`
    async fn translate(&self, endpoint: &Endpoint, text: &str) -> Result<String>;

    /// Ask the model at `endpoint` to complete `prompt` with a SQL statement
    async fn generate_sql(&self, endpoint: &Endpoint, prompt: &str) -> Result<String>;
}
