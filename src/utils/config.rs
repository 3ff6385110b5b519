//! Environment-driven configuration.
//!
//! All knobs come from environment variables (with `.env` support via
//! [`dotenvy`]); only the two service credentials are required. Retrieval
//! constants (top-k, keep-top-N) are configuration, not logic.

use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub vector: VectorConfig,
    pub embedding: EmbeddingConfig,
    pub rerank: RerankConfig,
    pub pipeline: PipelineConfig,
}

/// Hosted chat-completion settings (Groq, OpenAI-compatible).
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    /// Deterministic generation for classification and grounding.
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Pinecone index connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorConfig {
    pub api_key: String,
    /// Index host, e.g. `https://my-index-abc123.svc.us-east-1.pinecone.io`.
    pub index_host: String,
}

/// Hosted embedding endpoint (OpenAI-compatible `/embeddings`).
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Hosted cross-encoder rerank endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RerankConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Pipeline behavior knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Nearest neighbors fetched from the vector index per query.
    pub retrieval_top_k: usize,
    /// Reranked passages kept for context summarization.
    pub rerank_keep: usize,
    /// Transcript budget before old turns are trimmed (estimated tokens).
    pub max_history_tokens: usize,
    /// Per-request timeout applied to outbound HTTP calls.
    pub request_timeout_secs: u64,
    /// Directory where uploaded report files are persisted.
    pub upload_dir: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retrieval_top_k: 25,
            rerank_keep: 3,
            max_history_tokens: 4096,
            request_timeout_secs: 60,
            upload_dir: "uploaded_files".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Reads `.env` if present. `GROQ_API_KEY`, `PINECONE_API_KEY`, and
    /// `PINECONE_INDEX_HOST` are required; everything else has defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            llm: LlmConfig {
                api_key: require("GROQ_API_KEY")?,
                api_base: env_or("GROQ_API_BASE", "https://api.groq.com/openai/v1"),
                model: env_or("GROQ_MODEL", "llama3-8b-8192"),
                temperature: parse_or("GROQ_TEMPERATURE", 0.0)?,
                max_tokens: parse_or("GROQ_MAX_TOKENS", 1000)?,
            },
            vector: VectorConfig {
                api_key: require("PINECONE_API_KEY")?,
                index_host: require("PINECONE_INDEX_HOST")?,
            },
            embedding: EmbeddingConfig {
                api_base: env_or("EMBEDDING_API_BASE", "http://localhost:8080/v1"),
                api_key: env::var("EMBEDDING_API_KEY").ok(),
                model: env_or("EMBEDDING_MODEL", "neuml/pubmedbert-base-embeddings"),
            },
            rerank: RerankConfig {
                api_base: env_or("RERANK_API_BASE", "https://api.jina.ai/v1"),
                api_key: env::var("RERANK_API_KEY").ok(),
                model: env_or("RERANK_MODEL", "cross-encoder/ms-marco-TinyBERT-L-2-v2"),
            },
            pipeline: PipelineConfig {
                retrieval_top_k: parse_or("RETRIEVAL_TOP_K", 25)?,
                rerank_keep: parse_or("RERANK_KEEP", 3)?,
                max_history_tokens: parse_or("MAX_HISTORY_TOKENS", 4096)?,
                request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 60)?,
                upload_dir: env_or("UPLOAD_DIR", "uploaded_files"),
            },
        })
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key).map_err(|_| {
        AppError::Configuration(format!("missing required environment variable: {}", key))
    })
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::Configuration(format!("invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
