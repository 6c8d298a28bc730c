//! Generate command - translate and generate SQL without executing it

use std::path::Path;

use anyhow::{Context, Result};
use nuguna_core::Question;

use super::get_context;
use crate::output;

pub async fn run(config: Option<&Path>, question: &str) -> Result<()> {
    let question = Question::new(question).context("Invalid question")?;

    let ctx = get_context(config)?;
    let query = ctx.answer_service.generate_query(&question).await;

    if query.is_deferred() {
        output::warning("Model produced no SQL, showing the default query");
    }
    println!("{}", query.resolve());

    Ok(())
}
