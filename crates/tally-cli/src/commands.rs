//! Command implementations
//!
//! Each `cmd_*` function backs one CLI subcommand. All of them resolve
//! the index directory and embedding backend the same way, so the
//! helpers at the top do that once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use tally_core::{
    default_index_dir, EmbeddingClient, FinanceAgent, IndexBuilder, IndexPaths, Retriever,
    RetrieverConfig, TransactionStore,
};
use tally_server::AppState;

/// Resolve the index directory from the CLI flag or environment
fn resolve_index_dir(index_dir: Option<&Path>) -> PathBuf {
    index_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_index_dir)
}

/// Pick the embedding backend from the environment
fn embedder() -> Result<EmbeddingClient> {
    EmbeddingClient::from_env().context(
        "no embedding backend configured (set OLLAMA_HOST, or TALLY_EMBED_BACKEND=mock for testing)",
    )
}

/// Open the agent against an existing index
fn open_agent(index_dir: Option<&Path>) -> Result<FinanceAgent> {
    let dir = resolve_index_dir(index_dir);
    let retriever = Retriever::open(&dir, embedder()?, RetrieverConfig::default())
        .with_context(|| format!("failed to open index at {}", dir.display()))?;
    Ok(FinanceAgent::new(retriever))
}

pub async fn cmd_ask(index_dir: Option<&Path>, question: &str, json: bool) -> Result<()> {
    let agent = open_agent(index_dir)?;
    let response = agent.analyze(question).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.answer);
    }
    Ok(())
}

pub async fn cmd_serve(
    index_dir: Option<&Path>,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let dir = resolve_index_dir(index_dir);
    let agent = open_agent(index_dir)?;

    println!("🚀 Starting Tally server...");
    println!("   Index: {}", dir.display());
    println!("   Embeddings: {}", agent.retriever().embedder_name());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let state = Arc::new(AppState { agent });
    tally_server::serve(state, host, port, static_dir.map(Path::to_path_buf)).await
}

pub async fn cmd_build_index(
    index_dir: Option<&Path>,
    url: Option<&str>,
    file: Option<&Path>,
) -> Result<()> {
    let dir = resolve_index_dir(index_dir);
    let builder = IndexBuilder::new(embedder()?);

    let records = if let Some(path) = file {
        println!("📥 Loading transactions from {}...", path.display());
        IndexBuilder::load_transactions(path)?
    } else {
        let url = match url {
            Some(u) => u.to_string(),
            None => std::env::var("TRANSACTION_API_URL")
                .context("no transaction source (pass --url or --file, or set TRANSACTION_API_URL)")?,
        };
        println!("📥 Fetching transactions from {}...", url);
        IndexBuilder::fetch_transactions(&url).await?
    };

    if records.is_empty() {
        bail!("transaction source returned no records");
    }

    info!(count = records.len(), "embedding transactions");
    println!("🧮 Embedding {} transactions...", records.len());
    builder.build_and_write(&records, &dir).await?;

    println!("✅ Index written to {}", dir.display());
    Ok(())
}

pub fn cmd_status(index_dir: Option<&Path>) -> Result<()> {
    let dir = resolve_index_dir(index_dir);

    println!();
    println!("📊 Tally Status");
    println!("   ─────────────────────────────────────────────");
    println!("   Index directory: {}", dir.display());

    match IndexPaths::resolve(&dir) {
        Ok(paths) => {
            println!("   Index file: {}", paths.index.display());
            match TransactionStore::load(&paths.metadata) {
                Ok(store) => println!("   Transactions: {}", store.len()),
                Err(e) => println!("   ❌ Error reading metadata: {}", e),
            }
        }
        Err(_) => {
            println!("   Index: (not built — run `tally build-index`)");
        }
    }

    match EmbeddingClient::from_env() {
        Some(client) => println!("   Embeddings: {}", client.backend_name()),
        None => println!("   Embeddings: not configured (set OLLAMA_HOST)"),
    }

    let window = RetrieverConfig::default().window;
    println!(
        "   Reporting window: {} months {}-{}",
        window.year, window.month_start, window.month_end
    );
    println!();
    Ok(())
}
