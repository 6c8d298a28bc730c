//! Nuguna CLI - ask analytics questions in Korean from your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

use commands::{ask, generate, invoke, query, seed};

const DEFAULT_LOG_FILTER: &str = "nuguna_core=info,nuguna=info";

/// Nuguna - natural-language questions over acquisition-channel reports
#[derive(Parser)]
#[command(name = "nuguna", version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to nuguna.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question (reads stdin when no question is given)
    Ask {
        /// Question text
        question: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the request handler on an API-gateway event file
    Invoke {
        /// Event JSON file
        #[arg(long, default_value = "event.json")]
        event: PathBuf,
    },

    /// Show the SQL a question would run
    Generate {
        /// Question text
        question: String,
    },

    /// Execute SQL against the configured backend
    Query {
        /// SQL query to execute
        sql: Option<String>,
        /// Read SQL from file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: String,
        /// Output as JSON (shorthand for --format json)
        #[arg(long)]
        json: bool,
    },

    /// Create source_report in the embedded store with sample rows
    Seed {
        /// Store file (defaults to the configured store path)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Ask { question, json } => ask::run(config, question, json).await,
        Commands::Invoke { event } => invoke::run(config, &event).await,
        Commands::Generate { question } => generate::run(config, &question).await,
        Commands::Query { sql, file, format, json } => {
            let fmt = if json { "json".to_string() } else { format };
            query::run(config, sql.as_deref(), file.as_deref(), &fmt).await
        }
        Commands::Seed { path } => seed::run(config, path),
    }
}
