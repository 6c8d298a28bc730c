//! Configuration management
//!
//! Configuration is resolved once at startup and never re-read by the
//! pipeline. An optional JSON settings file can override the defaults:
//! ```json
//! {
//!   "translation": { "primary": { "name": "...", "url": "..." }, "fallbacks": [] },
//!   "textToSql": { "name": "...", "url": "..." },
//!   "maxRetries": 3,
//!   "retryDelayMs": 1000,
//!   "fixturePath": "data/testData.json",
//!   "storePath": "test.db"
//! }
//! ```
//! Environment variables are applied on top of the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::Endpoint;

/// Selects local vs. production backends
pub const ENVIRONMENT_ENV: &str = "NUGUNA_ENV";
/// Bearer credential for the inference endpoints
pub const API_KEY_ENV: &str = "HUGGING_FACE_API_KEY";
pub const WAREHOUSE_URL_ENV: &str = "NUGUNA_WAREHOUSE_URL";
pub const WAREHOUSE_TOKEN_ENV: &str = "NUGUNA_WAREHOUSE_TOKEN";

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY_MS: u64 = 1000;

const DEFAULT_FIXTURE_PATH: &str = "data/testData.json";
const DEFAULT_STORE_PATH: &str = "test.db";

/// Where queries are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Fixture file, falling back to the embedded store
    Local,
    /// Remote analytical warehouse
    Production,
}

impl Environment {
    /// Only the exact value "local" selects local mode
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("local") => Environment::Local,
            _ => Environment::Production,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Local)
    }
}

/// Raw settings file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsFile {
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub translation: Option<TranslationEndpoints>,
    #[serde(default)]
    pub text_to_sql: Option<Endpoint>,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub warehouse_url: Option<String>,
}

/// Primary translation endpoint plus ordered fallbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEndpoints {
    pub primary: Endpoint,
    #[serde(default)]
    pub fallbacks: Vec<Endpoint>,
}

impl Default for TranslationEndpoints {
    fn default() -> Self {
        Self {
            primary: Endpoint::hugging_face("Helsinki-NLP/opus-mt-ko-en"),
            fallbacks: vec![
                Endpoint::hugging_face("Helsinki-NLP/opus-mt-mul-en"),
                Endpoint::hugging_face("facebook/nllb-200-3.3B"),
            ],
        }
    }
}

/// Remote warehouse connection settings
#[derive(Debug, Clone, Default)]
pub struct WarehouseSettings {
    /// When unset, production mode serves canned sample rows
    pub url: Option<String>,
    pub token: Option<String>,
}

/// Resolved, immutable configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub api_key: Option<String>,
    pub translation: TranslationEndpoints,
    pub text_to_sql: Endpoint,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub fixture_path: PathBuf,
    pub store_path: PathBuf,
    pub warehouse: WarehouseSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            api_key: None,
            translation: TranslationEndpoints::default(),
            text_to_sql: Endpoint::hugging_face("Salesforce/codet5-base"),
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            warehouse: WarehouseSettings::default(),
        }
    }
}

impl Config {
    /// Load config from an optional settings file and the process environment
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        let raw = match settings_path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            Some(path) => {
                return Err(Error::config(format!(
                    "Settings file not found: {}",
                    path.display()
                )))
            }
            None => SettingsFile::default(),
        };

        Self::resolve(raw, |key| std::env::var(key).ok())
    }

    /// Merge settings with environment values and validate the result
    pub fn resolve<F>(raw: SettingsFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let environment = match env(ENVIRONMENT_ENV) {
            Some(flag) => Environment::from_flag(Some(flag.as_str())),
            None => raw.environment.unwrap_or(defaults.environment),
        };

        let config = Self {
            environment,
            api_key: env(API_KEY_ENV).filter(|k| !k.is_empty()),
            translation: raw.translation.unwrap_or(defaults.translation),
            text_to_sql: raw.text_to_sql.unwrap_or(defaults.text_to_sql),
            max_retries: raw.max_retries.unwrap_or(defaults.max_retries),
            retry_delay: raw
                .retry_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_delay),
            fixture_path: raw.fixture_path.unwrap_or(defaults.fixture_path),
            store_path: raw.store_path.unwrap_or(defaults.store_path),
            warehouse: WarehouseSettings {
                url: env(WAREHOUSE_URL_ENV).or(raw.warehouse_url),
                token: env(WAREHOUSE_TOKEN_ENV),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_none() && !self.environment.is_local() {
            return Err(Error::config(format!(
                "API key is missing. Please set {}.",
                API_KEY_ENV
            )));
        }

        if self.max_retries == 0 {
            return Err(Error::config("maxRetries must be at least 1"));
        }

        let endpoints = std::iter::once(&self.translation.primary)
            .chain(self.translation.fallbacks.iter())
            .chain(std::iter::once(&self.text_to_sql));
        for endpoint in endpoints {
            validate_url(&endpoint.url)
                .map_err(|e| Error::config(format!("Endpoint {}: {}", endpoint.name, e)))?;
        }

        if let Some(url) = &self.warehouse.url {
            validate_url(url).map_err(|e| Error::config(format!("Warehouse URL: {}", e)))?;
        }

        Ok(())
    }
}

fn validate_url(raw: &str) -> std::result::Result<(), String> {
    let parsed = Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
