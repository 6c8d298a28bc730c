//! Query command - execute SQL against the configured backend

use std::path::Path;

use anyhow::{Context, Result};
use nuguna_core::domain::row::value_to_string;
use nuguna_core::{ResultSet, SqlQuery};

use super::{get_context, read_piped_stdin};
use crate::output;

pub async fn run(config: Option<&Path>, sql: Option<&str>, file: Option<&Path>, format: &str) -> Result<()> {
    // Get SQL from: argument, file, or stdin
    let sql_content = if let Some(sql) = sql {
        sql.to_string()
    } else if let Some(file_path) = file {
        std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read SQL file: {:?}", file_path))?
    } else if let Some(piped) = read_piped_stdin("SQL")? {
        piped
    } else {
        anyhow::bail!("No SQL query provided. Use positional argument, --file, or pipe from stdin.");
    };

    let ctx = get_context(config)?;
    let executor = ctx.answer_service.executor();
    let rows = executor
        .execute(SqlQuery::literal(sql_content.trim()))
        .await
        .with_context(|| format!("Query failed on {} backend", executor.backend_name()))?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "csv" => print_csv(&rows),
        _ => print_table(&rows),
    }

    Ok(())
}

/// Column names in first-row order
fn columns(rows: &ResultSet) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

fn print_table(rows: &ResultSet) {
    let columns = columns(rows);
    let mut table = output::create_table();
    table.set_header(&columns);

    for row in rows {
        let values: Vec<String> = columns
            .iter()
            .map(|c| row.get(c).map(value_to_string).unwrap_or_default())
            .collect();
        table.add_row(values);
    }

    println!("{}", table);
    println!();
    println!("{} row(s) returned", rows.len());
}

fn print_csv(rows: &ResultSet) {
    let columns = columns(rows);
    println!("{}", columns.join(","));
    for row in rows {
        let values: Vec<String> = columns
            .iter()
            .map(|c| row.get(c).map(value_to_csv).unwrap_or_default())
            .collect();
        println!("{}", values.join(","));
    }
}

fn value_to_csv(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) if s.contains(',') || s.contains('"') || s.contains('\n') => {
            format!("\"{}\"", s.replace('"', "\"\""))
        }
        other => value_to_string(other),
    }
}
