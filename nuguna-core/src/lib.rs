//! Nuguna Core - natural-language analytics question answering
//!
//! Korean questions about acquisition-channel metrics are translated to
//! English, turned into SQL by a text-to-SQL model, executed against a
//! backend and answered in Korean. The crate follows hexagonal architecture:
//!
//! - **domain**: Core values (Question, SqlQuery, result rows, errors)
//! - **ports**: Trait definitions for external dependencies (InferenceClient, QueryBackend, WarehouseClient)
//! - **services**: Pipeline stages and orchestration
//! - **adapters**: Concrete implementations (Hugging Face, DuckDB, fixture file, warehouse)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use tracing::info;

use adapters::duckdb::DuckDbBackend;
use adapters::fixture::FixtureBackend;
use adapters::huggingface::HuggingFaceClient;
use adapters::local::LocalBackend;
use adapters::warehouse::{HttpWarehouseClient, SampleWarehouseClient, WarehouseBackend};
use config::Config;
use ports::{InferenceClient, QueryBackend, WarehouseClient};
use services::*;

// Re-export commonly used types at crate root
pub use config::Environment;
pub use domain::result::{Error, Result};
pub use domain::{Endpoint, Question, ResultRow, ResultSet, SqlQuery};
pub use services::{ApiRequest, ApiResponse};

/// Main context for Nuguna operations
///
/// Built once from a `Config`; the backend is chosen here and never
/// re-selected per request.
pub struct NugunaContext {
    pub config: Config,
    pub answer_service: Arc<AnswerService>,
    pub handler: RequestHandler,
}

impl NugunaContext {
    /// Create a context with the adapters the configuration selects
    pub fn new(config: Config) -> Result<Self> {
        let inference: Option<Arc<dyn InferenceClient>> = match &config.api_key {
            Some(key) => Some(Arc::new(HuggingFaceClient::new(Some(key))?)),
            None => None,
        };
        let backend = build_backend(&config)?;
        Ok(Self::from_parts(config, inference, backend))
    }

    /// Create a context over caller-provided adapters
    pub fn from_parts(
        config: Config,
        inference: Option<Arc<dyn InferenceClient>>,
        backend: Arc<dyn QueryBackend>,
    ) -> Self {
        info!(
            environment = ?config.environment,
            backend = backend.name(),
            inference = inference.is_some(),
            "Initialising pipeline"
        );

        let stages = inference.map(|client| InferenceStages {
            translation: TranslationService::new(Arc::clone(&client), config.translation.clone()),
            generation: SqlGenerationService::new(
                client,
                config.text_to_sql.clone(),
                config.max_retries,
                config.retry_delay,
            ),
        });
        let executor = QueryExecutor::new(config.environment, backend);
        let answer_service = Arc::new(AnswerService::new(
            stages,
            executor,
            ResponseFormatter::default(),
        ));
        let handler = RequestHandler::new(Arc::clone(&answer_service));

        Self {
            config,
            answer_service,
            handler,
        }
    }
}

fn build_backend(config: &Config) -> Result<Arc<dyn QueryBackend>> {
    if config.environment.is_local() {
        return Ok(Arc::new(LocalBackend::new(
            FixtureBackend::new(&config.fixture_path),
            DuckDbBackend::new(&config.store_path),
        )));
    }

    let client: Arc<dyn WarehouseClient> = match &config.warehouse.url {
        Some(url) => Arc::new(HttpWarehouseClient::new(
            url,
            config.warehouse.token.as_deref(),
        )?),
        None => Arc::new(SampleWarehouseClient::new()),
    };
    Ok(Arc::new(WarehouseBackend::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::SettingsFile;

    fn local_config(temp_dir: &tempfile::TempDir) -> Config {
        let settings = SettingsFile {
            fixture_path: Some(temp_dir.path().join("testData.json")),
            store_path: Some(temp_dir.path().join("test.db")),
            ..Default::default()
        };
        Config::resolve(settings, |key| {
            (key == config::ENVIRONMENT_ENV).then(|| "local".to_string())
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_local_context_without_key_answers_from_store() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let context = NugunaContext::new(local_config(&temp_dir)).unwrap();
        DuckDbBackend::new(&context.config.store_path)
            .seed_sample_data()
            .unwrap();

        let answer = context
            .answer_service
            .answer(&Question::new("방문자 수").unwrap())
            .await;

        assert_eq!(
            answer,
            "유입 채널별 방문자 수는 다음과 같습니다:\n\
             1. Google - 방문자 수: 1200명\n\
             2. Facebook - 방문자 수: 900명\n\
             3. Email - 방문자 수: 750명"
        );
    }

    #[tokio::test]
    async fn test_production_without_url_uses_sample_warehouse() {
        let config = Config::resolve(SettingsFile::default(), |key| {
            (key == config::API_KEY_ENV).then(|| "hf_test".to_string())
        })
        .unwrap();

        let backend = build_backend(&config).unwrap();
        assert_eq!(backend.name(), "warehouse");
        assert_eq!(backend.execute("SELECT 1").await.unwrap().len(), 2);
    }
}
