//! Pluggable text-embedding backends
//!
//! Backend-agnostic interface for turning question/record text into vectors.
//!
//! # Architecture
//!
//! - `Embedder` trait: the interface every backend implements
//! - `EmbeddingClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `OllamaEmbedder`, `MockEmbedder`
//!
//! # Configuration
//!
//! Environment variables:
//! - `TALLY_EMBED_BACKEND`: Backend to use (ollama, mock). Default: ollama
//! - `OLLAMA_HOST`: Ollama server URL (required for the ollama backend)
//! - `TALLY_EMBED_MODEL`: Embedding model name (default: nomic-embed-text)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Trait defining the interface for all embedding backends
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one piece of text into a vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Concrete embedding client with static dispatch
#[derive(Clone)]
pub enum EmbeddingClient {
    Ollama(OllamaEmbedder),
    Mock(MockEmbedder),
}

impl EmbeddingClient {
    /// Create from environment variables, or None when unconfigured
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("TALLY_EMBED_BACKEND").unwrap_or_else(|_| "ollama".to_string());
        match backend.as_str() {
            "mock" => Some(Self::Mock(MockEmbedder::new())),
            _ => OllamaEmbedder::from_env().map(Self::Ollama),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Ollama(_) => "ollama",
            Self::Mock(_) => "mock",
        }
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match self {
            Self::Ollama(backend) => backend.embed(text).await,
            Self::Mock(backend) => backend.embed(text).await,
        }
    }
}

/// Request to the Ollama embeddings API
#[derive(Debug, Serialize)]
struct OllamaEmbedRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API
#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    embedding: Vec<f32>,
}

/// Ollama HTTP embedding backend
#[derive(Clone)]
pub struct OllamaEmbedder {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model =
            std::env::var("TALLY_EMBED_MODEL").unwrap_or_else(|_| "nomic-embed-text".to_string());
        Some(Self::new(&host, &model))
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = OllamaEmbedRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .http_client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: OllamaEmbedResponse = response.json().await?;
        debug!(model = %self.model, dims = body.embedding.len(), "Embedded text");

        if body.embedding.is_empty() {
            return Err(Error::Embedding(format!(
                "model {} returned an empty embedding",
                self.model
            )));
        }

        Ok(body.embedding)
    }
}

/// Deterministic in-process embedder for tests and offline development
///
/// Maps text to a 26-dim letter-frequency vector. Crude, but stable across
/// runs, which is all the tests need.
#[derive(Clone, Default)]
pub struct MockEmbedder;

impl MockEmbedder {
    pub const DIMENSION: usize = 26;

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; Self::DIMENSION];
        for c in text.to_lowercase().chars() {
            if c.is_ascii_lowercase() {
                vector[(c as usize) - ('a' as usize)] += 1.0;
            }
        }
        Ok(vector)
    }
}
