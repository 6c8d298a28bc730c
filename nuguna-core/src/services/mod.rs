//! Service layer - pipeline stages and their orchestration
//!
//! Each stage is a small service over the port traits. `AnswerService`
//! chains them and `RequestHandler` wraps the chain in the API envelope.

mod answer;
pub mod default_query;
mod executor;
pub mod formatter;
mod generation;
mod handler;
mod translation;

pub use answer::{AnswerService, InferenceStages, APOLOGY};
pub use default_query::default_query;
pub use executor::QueryExecutor;
pub use formatter::{ReportRenderer, ResponseFormatter};
pub use generation::{SqlGenerationService, PROMPT_PREFIX};
pub use handler::{ApiRequest, ApiResponse, RequestHandler};
pub use translation::TranslationService;
