//! Ask command - answer a Korean question end to end

use std::path::Path;

use anyhow::{Context, Result};
use nuguna_core::Question;
use serde_json::json;

use super::{get_context, read_piped_stdin};
use crate::output;

pub async fn run(config: Option<&Path>, question: Option<String>, json: bool) -> Result<()> {
    let text = match question {
        Some(text) => text,
        None => read_piped_stdin("question")?.ok_or_else(|| {
            anyhow::anyhow!("No question provided. Use positional argument or pipe from stdin.")
        })?,
    };
    let question = Question::new(text.trim()).context("Invalid question")?;

    let ctx = get_context(config)?;
    let answer = ctx.answer_service.answer(&question).await;

    if json {
        let body = json!({ "question": question.as_str(), "answer": answer });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        output::answer(&answer);
    }

    Ok(())
}
