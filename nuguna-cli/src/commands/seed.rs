//! Seed command - populate the embedded store with sample report rows

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nuguna_core::adapters::duckdb::DuckDbBackend;

use super::load_config;
use crate::output;

pub fn run(config: Option<&Path>, path: Option<PathBuf>) -> Result<()> {
    let store_path = match path {
        Some(path) => path,
        None => load_config(config)?.store_path,
    };

    let store = DuckDbBackend::new(&store_path);
    let inserted = store
        .seed_sample_data()
        .with_context(|| format!("Failed to seed store: {:?}", store_path))?;

    output::success(&format!(
        "Seeded source_report with {} rows in {}",
        inserted,
        store_path.display()
    ));

    Ok(())
}
