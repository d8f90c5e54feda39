//! Tally CLI - Conversational personal finance Q&A
//!
//! Usage:
//!   tally build-index --file txns.json   Build the vector index
//!   tally ask "how much on restaurants?" Answer one question
//!   tally serve --port 8000              Start the web server
//!   tally status                         Show index status

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let index_dir = cli.index_dir.as_deref();

    match cli.command {
        Commands::Ask { question, json } => commands::cmd_ask(index_dir, &question, json).await,
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(index_dir, &host, port, static_dir.as_deref()).await,
        Commands::BuildIndex { url, file } => {
            commands::cmd_build_index(index_dir, url.as_deref(), file.as_deref()).await
        }
        Commands::Status => commands::cmd_status(index_dir),
    }
}
