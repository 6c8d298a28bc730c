//! API-gateway style request handler

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use super::answer::AnswerService;
use crate::domain::result::{Error, Result};
use crate::domain::Question;

const TEXT_PARAMETER: &str = "text";

/// Inbound event; only the query string is read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl ApiRequest {
    /// Request carrying `?text=<question>`
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            query_string_parameters: Some(HashMap::from([(
                TEXT_PARAMETER.to_string(),
                text.into(),
            )])),
        }
    }

    fn text(&self) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get(TEXT_PARAMETER)
            .map(String::as_str)
    }
}

/// Outbound response; `body` is itself a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    fn message(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!({ "message": message }).to_string(),
        }
    }

    fn internal_error() -> Self {
        Self::message(500, "Internal Server Error")
    }
}

#[derive(Serialize)]
struct AnswerBody<'a> {
    answer: &'a str,
}

pub struct RequestHandler {
    answers: Arc<AnswerService>,
}

impl RequestHandler {
    pub fn new(answers: Arc<AnswerService>) -> Self {
        Self { answers }
    }

    pub async fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let question = match request.text().map(Question::new) {
            Some(Ok(question)) => question,
            Some(Err(_)) | None => {
                warn!("Question text is missing");
                return ApiResponse::message(400, &Error::MissingParameter.to_string());
            }
        };

        let answer = self.answers.answer(&question).await;
        match answer_body(&answer) {
            Ok(body) => ApiResponse {
                status_code: 200,
                body,
            },
            Err(e) => {
                error!(error = %e, "Failed to build response");
                ApiResponse::internal_error()
            }
        }
    }
}

fn answer_body(answer: &str) -> Result<String> {
    Ok(serde_json::to_string(&AnswerBody { answer })?)
}
