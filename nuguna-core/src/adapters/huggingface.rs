//! Hugging Face inference API client
//!
//! Both translation and text-to-SQL models accept `{ "inputs": "..." }` and
//! answer with a JSON array whose first element carries the output field
//! (`translation_text` or `generated_text`).

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::Endpoint;
use crate::ports::InferenceClient;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Inference API client carrying the static bearer credential
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_key: Option<String>,
}

impl HuggingFaceClient {
    /// Create a client. Without a key, requests are sent unauthenticated.
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.map(|k| k.to_string()),
        })
    }

    async fn post(&self, endpoint: &Endpoint, inputs: &str) -> Result<JsonValue> {
        let mut request = self
            .client
            .post(&endpoint.url)
            .json(&InferenceRequest { inputs });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_request_error(endpoint, e))?;

        self.check_response_status(endpoint, &response)?;

        response.json::<JsonValue>().await.map_err(|e| {
            Error::unexpected_shape(&endpoint.name, format!("body is not JSON: {}", e))
        })
    }

    /// Map request errors to network errors naming the endpoint
    fn map_request_error(&self, endpoint: &Endpoint, error: reqwest::Error) -> Error {
        let message = if error.is_timeout() {
            "connection timed out".to_string()
        } else if error.is_connect() {
            format!("unable to connect to {}", endpoint.url)
        } else {
            error.to_string()
        };
        Error::Network {
            endpoint: endpoint.name.clone(),
            message,
        }
    }

    fn check_response_status(&self, endpoint: &Endpoint, response: &Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Http {
                endpoint: endpoint.name.clone(),
                status: status.as_u16(),
            })
        }
    }
}

/// `body[0][field]` when it is a string
fn first_string_field<'a>(body: &'a JsonValue, field: &str) -> Option<&'a str> {
    body.as_array()?.first()?.get(field)?.as_str()
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn translate(&self, endpoint: &Endpoint, text: &str) -> Result<String> {
        let body = self.post(endpoint, text).await?;
        match first_string_field(&body, "translation_text") {
            Some(translated) if !translated.is_empty() => Ok(translated.to_string()),
            _ => Err(Error::unexpected_shape(
                &endpoint.name,
                "expected [{\"translation_text\": string}]",
            )),
        }
    }

    async fn generate_sql(&self, endpoint: &Endpoint, prompt: &str) -> Result<String> {
        let body = self.post(endpoint, prompt).await?;
        first_string_field(&body, "generated_text")
            .map(|sql| sql.trim().to_string())
            .ok_or_else(|| {
                Error::unexpected_shape(&endpoint.name, "expected [{\"generated_text\": string}]")
            })
    }
}
