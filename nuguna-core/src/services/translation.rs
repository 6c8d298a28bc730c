//! Translation stage - Korean question to English text

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::TranslationEndpoints;
use crate::domain::result::{Error, Result};
use crate::domain::{Endpoint, Question};
use crate::ports::InferenceClient;

/// Tries the primary endpoint, then each fallback once, in declaration order
pub struct TranslationService {
    client: Arc<dyn InferenceClient>,
    primary: Endpoint,
    fallbacks: Vec<Endpoint>,
}

impl TranslationService {
    pub fn new(client: Arc<dyn InferenceClient>, endpoints: TranslationEndpoints) -> Self {
        Self {
            client,
            primary: endpoints.primary,
            fallbacks: endpoints.fallbacks,
        }
    }

    /// Translate the question, failing only when every endpoint has failed
    pub async fn translate(&self, question: &Question) -> Result<String> {
        match self.client.translate(&self.primary, question.as_str()).await {
            Ok(translated) => {
                info!(endpoint = %self.primary, translated = %translated, "Translated question to English");
                return Ok(translated);
            }
            Err(e) => {
                warn!(
                    endpoint = %self.primary,
                    error = %e,
                    "Primary translation model failed. Attempting with fallback models"
                );
            }
        }

        for endpoint in &self.fallbacks {
            match self.client.translate(endpoint, question.as_str()).await {
                Ok(translated) => {
                    info!(endpoint = %endpoint, translated = %translated, "Translated question to English");
                    return Ok(translated);
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Translation failed with fallback model");
                }
            }
        }

        let attempts = 1 + self.fallbacks.len();
        error!(attempts, "Translation failed using all models");
        Err(Error::TranslationFailed { attempts })
    }
}
