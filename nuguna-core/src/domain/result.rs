//! Result and error types for the core library

use thiserror::Error;

/// HTTP status the inference endpoints return while a model is loading.
/// It is the only status the generation stage retries on.
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Question text is required")]
    MissingParameter,

    #[error("Translation failed on all {attempts} endpoint(s)")]
    TranslationFailed { attempts: usize },

    #[error("Text-to-SQL generation failed after {attempts} attempt(s)")]
    GenerationExhausted { attempts: u32 },

    #[error("{backend} query execution error: {message}")]
    ExecutionFailed { backend: String, message: String },

    #[error("Unexpected response structure from {endpoint}: {detail}")]
    UnexpectedResponseShape { endpoint: String, detail: String },

    #[error("{endpoint} responded with HTTP {status}")]
    Http { endpoint: String, status: u16 },

    #[error("Request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an execution error for the named backend
    pub fn execution(backend: impl Into<String>, message: impl ToString) -> Self {
        Self::ExecutionFailed {
            backend: backend.into(),
            message: message.to_string(),
        }
    }

    /// Create an unexpected response shape error
    pub fn unexpected_shape(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for an HTTP 503 from a remote endpoint
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Error::Http { status, .. } if *status == SERVICE_UNAVAILABLE)
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_503_is_service_unavailable() {
        let unavailable = Error::Http {
            endpoint: "codet5-base".to_string(),
            status: 503,
        };
        assert!(unavailable.is_service_unavailable());

        let not_found = Error::Http {
            endpoint: "codet5-base".to_string(),
            status: 404,
        };
        assert!(!not_found.is_service_unavailable());

        let network = Error::Network {
            endpoint: "codet5-base".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(!network.is_service_unavailable());
    }

    #[test]
    fn test_execution_error_message() {
        let err = Error::execution("duckdb", "no such table: source_report");
        assert_eq!(
            err.to_string(),
            "duckdb query execution error: no such table: source_report"
        );
    }
}
