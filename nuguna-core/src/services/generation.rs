//! Text-to-SQL stage with 503 retry and rule-based fallback

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::default_query::default_query;
use crate::domain::result::{Error, Result};
use crate::domain::{Endpoint, Question, SqlQuery};
use crate::ports::InferenceClient;

/// Instruction prepended to the translated question
pub const PROMPT_PREFIX: &str = "Convert the following question to SQL: ";

pub struct SqlGenerationService {
    client: Arc<dyn InferenceClient>,
    endpoint: Endpoint,
    max_retries: u32,
    retry_delay: Duration,
}

impl SqlGenerationService {
    pub fn new(
        client: Arc<dyn InferenceClient>,
        endpoint: Endpoint,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            client,
            endpoint,
            max_retries,
            retry_delay,
        }
    }

    /// Produce SQL for the question. Never fails: when the model gives no
    /// answer the rule-based query for the original question is returned
    /// as a deferred value.
    pub async fn generate(&self, question: &Question, translated: &str) -> SqlQuery {
        match self.generate_with_retry(translated).await {
            Ok(sql) => {
                info!(endpoint = %self.endpoint, sql = %sql, "Generated SQL query");
                SqlQuery::literal(sql)
            }
            Err(e) => {
                error!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Failed to generate SQL, falling back to default query"
                );
                let original = question.as_str().to_string();
                SqlQuery::deferred(move || default_query(&original))
            }
        }
    }

    async fn generate_with_retry(&self, translated: &str) -> Result<String> {
        let prompt = format!("{}{}", PROMPT_PREFIX, translated);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.generate_sql(&self.endpoint, &prompt).await {
                Ok(sql) => return Ok(sql),
                Err(e) if e.is_service_unavailable() => {
                    if attempt >= self.max_retries {
                        return Err(Error::GenerationExhausted { attempts: attempt });
                    }
                    warn!(
                        endpoint = %self.endpoint,
                        attempt,
                        max_retries = self.max_retries,
                        "Text-to-SQL model unavailable, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
