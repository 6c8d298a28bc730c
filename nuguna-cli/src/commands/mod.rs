//! CLI command implementations

pub mod ask;
pub mod generate;
pub mod invoke;
pub mod query;
pub mod seed;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nuguna_core::config::Config;
use nuguna_core::NugunaContext;
use tracing::debug;

/// Settings file picked up from the working directory when `--config` is absent
const DEFAULT_SETTINGS_FILE: &str = "nuguna.json";

/// Resolve the settings file: explicit path, else `nuguna.json` if it exists
fn settings_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
            default.exists().then_some(default)
        }
    }
}

/// Load configuration from the settings file and environment
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = settings_path(explicit);
    debug!(settings = ?path, "Loading configuration");
    Config::load(path.as_deref()).context("Failed to load configuration")
}

/// Build the pipeline context
pub fn get_context(explicit: Option<&Path>) -> Result<NugunaContext> {
    let config = load_config(explicit)?;
    NugunaContext::new(config).context("Failed to initialize nuguna context")
}

/// Read all of stdin when it is piped, `None` on an interactive terminal
pub fn read_piped_stdin(what: &str) -> Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .with_context(|| format!("Failed to read {} from stdin", what))?;
    Ok(Some(buffer))
}
