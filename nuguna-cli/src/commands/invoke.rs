//! Invoke command - run the request handler on a stored gateway event

use std::path::Path;

use anyhow::{Context, Result};
use nuguna_core::ApiRequest;

use super::get_context;
use crate::output;

pub async fn run(config: Option<&Path>, event: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(event)
        .with_context(|| format!("Failed to read event file: {:?}", event))?;
    let request: ApiRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Event file is not a valid request: {:?}", event))?;

    let ctx = get_context(config)?;
    let response = ctx.handler.handle(&request).await;

    output::status_code(response.status_code);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
