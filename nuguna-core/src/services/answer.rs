//! Question answering pipeline
//!
//! Translation, SQL generation, execution and formatting run in sequence for
//! each question. Losing the remote models degrades to the rule-based query;
//! any other error surfaces here once and is replaced by a fixed apology.
//! Callers always receive a string.

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::default_query::default_query;
use super::executor::QueryExecutor;
use super::formatter::ResponseFormatter;
use super::generation::SqlGenerationService;
use super::translation::TranslationService;
use crate::domain::result::Result;
use crate::domain::{Question, SqlQuery};

/// Returned in place of an answer whenever a stage fails
pub const APOLOGY: &str = "죄송합니다. 질문을 처리하는 중 오류가 발생했습니다.";

/// The two remote model stages, present only when a credential is configured
pub struct InferenceStages {
    pub translation: TranslationService,
    pub generation: SqlGenerationService,
}

pub struct AnswerService {
    inference: Option<InferenceStages>,
    executor: QueryExecutor,
    formatter: ResponseFormatter,
}

impl AnswerService {
    pub fn new(
        inference: Option<InferenceStages>,
        executor: QueryExecutor,
        formatter: ResponseFormatter,
    ) -> Self {
        Self {
            inference,
            executor,
            formatter,
        }
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    /// Answer a question in Korean. Never fails.
    pub async fn answer(&self, question: &Question) -> String {
        let span = info_span!("answer", request_id = %Uuid::new_v4());
        async {
            info!(question = %question, "Answering question");
            match self.try_answer(question).await {
                Ok(answer) => answer,
                Err(e) => {
                    error!(question = %question, error = %e, "Error processing question");
                    APOLOGY.to_string()
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run translation and generation only, yielding the SQL that would be executed.
    ///
    /// Falls back to the rule-based query for the original question when no
    /// credential is configured or every translation endpoint has failed.
    pub async fn generate_query(&self, question: &Question) -> SqlQuery {
        let Some(stages) = &self.inference else {
            warn!("No inference API key configured, skipping translation and SQL generation");
            return default_for(question);
        };

        match stages.translation.translate(question).await {
            Ok(translated) => stages.generation.generate(question, &translated).await,
            Err(e) => {
                error!(
                    question = %question,
                    error = %e,
                    "Translation unavailable, skipping SQL generation and using default query"
                );
                default_for(question)
            }
        }
    }

    async fn try_answer(&self, question: &Question) -> Result<String> {
        let query = self.generate_query(question).await;
        let rows = self.executor.execute(query).await?;
        Ok(self.formatter.format(&rows))
    }
}

fn default_for(question: &Question) -> SqlQuery {
    let original = question.as_str().to_string();
    SqlQuery::deferred(move || default_query(&original))
}
