//! Core types shared across the pipeline: conversation turns, retrieved
//! passages, classifier verdicts, and the crate-wide error type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Conversation Types =============

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Label used when rendering a transcript for a prompt.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Assistant => "AI",
        }
    }
}

/// A single exchange entry in the session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

// ============= Retrieval Types =============

/// A passage fetched from the vector index for one query.
///
/// Created per-query and discarded after answer generation; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// Decoded passage text (decompressed match metadata).
    pub text: String,
    /// Similarity score reported by the vector index.
    pub score: f32,
}

/// A passage after cross-encoder reranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPassage {
    pub text: String,
    /// Score from the initial vector retrieval.
    pub retrieval_score: f32,
    /// Score from the cross-encoder, used for the final ordering.
    pub rerank_score: f32,
    /// 1-based rank before reranking.
    pub original_rank: usize,
    /// 1-based rank after reranking.
    pub new_rank: usize,
}

// ============= Pipeline Types =============

/// Classifier verdict for an incoming query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    /// Medical query: take the retrieval-grounded branch.
    Medical,
    /// Anything else: answer from history alone.
    OutOfDomain,
}

/// Final output of one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineAnswer {
    /// The assistant's reply text.
    pub text: String,
    /// Which branch produced the reply.
    pub kind: QueryKind,
    /// Number of reranked passages that grounded the reply (0 on the
    /// fallback branch).
    pub passages_used: usize,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Rerank error: {0}")]
    Rerank(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
