//! Tally Core Library
//!
//! Shared functionality for the Tally finance question-answering agent:
//! - Transaction store and flat vector index loaded from disk
//! - Category/cuisine lexicon and period parsing
//! - Pluggable embedding backends (Ollama, mock)
//! - Filtered aggregation retriever
//! - Keyword-scoring intent router and per-intent handlers
//! - Orchestrator that contains every failure behind a well-formed response
//! - Offline index builder

pub mod agent;
pub mod config;
pub mod embed;
pub mod error;
pub mod index;
pub mod indexer;
pub mod intents;
pub mod lexicon;
pub mod models;
pub mod period;
pub mod retriever;
pub mod router;
pub mod store;

pub use agent::FinanceAgent;
pub use config::{default_index_dir, FiscalWindow, RetrieverConfig};
pub use embed::{Embedder, EmbeddingClient, MockEmbedder, OllamaEmbedder};
pub use error::{Error, Result};
pub use index::VectorIndex;
pub use indexer::IndexBuilder;
pub use models::{
    AgentResponse, Aggregation, ChartSpec, Intent, IntentReply, RankedSpend, TransactionRecord,
};
pub use retriever::Retriever;
pub use router::IntentRouter;
pub use store::{IndexPaths, TransactionStore};
