//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Conversational personal finance Q&A
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Ask questions about your transactions in plain English", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory containing the vector index and transaction metadata
    ///
    /// Defaults to TALLY_INDEX_DIR if set, otherwise "index".
    /// Both a flat layout (index.json next to metadata.json) and a
    /// nested index/ subdirectory are accepted.
    #[arg(long, global = true)]
    pub index_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question and print the answer
    Ask {
        /// The question, e.g. "how much did I spend on restaurants in June?"
        question: String,

        /// Print the full response (details, chart, data) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Build the vector index from transaction data
    BuildIndex {
        /// Transaction API endpoint to fetch from
        ///
        /// Defaults to TRANSACTION_API_URL if set. Mutually exclusive
        /// with --file.
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Local JSON file with an array of transactions
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show index status (location, record count, embedding backend)
    Status,
}
