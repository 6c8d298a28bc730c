use std::fmt;

use serde::{Deserialize, Serialize};

/// A remote inference endpoint (translation or text-to-SQL model)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Short identity used in logs, e.g. "Helsinki-NLP/opus-mt-ko-en"
    pub name: String,
    pub url: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Endpoint for a model hosted on the Hugging Face inference API
    pub fn hugging_face(model: &str) -> Self {
        Self::new(model, format!("{}/{}", HUGGING_FACE_INFERENCE_URL, model))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

const HUGGING_FACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
