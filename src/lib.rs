//! # Caduceus - Medical RAG Chatbot Engine
//!
//! A retrieval-augmented-generation answer pipeline for a medical chatbot:
//! query gating, vector retrieval with cross-encoder reranking, context
//! summarization, and grounded answer generation over hosted models.
//!
//! ## Overview
//!
//! Given a query and the running conversation, the pipeline:
//!
//! 1. asks the LLM whether the query is medical ([`rag::pipeline`]),
//! 2. embeds the query and fetches nearest neighbors from a Pinecone index
//!    ([`rag::embeddings`], [`db`]),
//! 3. reranks the passages with a cross-encoder and keeps the top few
//!    ([`rag::reranker`]),
//! 4. compresses the kept passages into a structured context and generates
//!    the grounded answer ([`rag::prompts`]),
//! 5. or, for out-of-domain queries, answers from the transcript alone.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use caduceus::{Config, Conversation, RagPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = RagPipeline::from_config(&config)?;
//!
//!     let mut conversation = Conversation::new(config.pipeline.max_history_tokens);
//!     let answer = pipeline.answer(&conversation, "What causes migraines?").await?;
//!     conversation.push_user("What causes migraines?");
//!     conversation.push_assistant(&answer.text);
//!
//!     println!("{}", answer.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - the answer pipeline (classification, retrieval, reranking,
//!   generation)
//! - [`llm`] - hosted chat-completion clients
//! - [`db`] - vector index clients
//! - [`memory`] - session transcript management
//! - [`report`] - uploaded medical report handling
//! - [`types`] - common types and error handling
//! - [`utils`] - configuration

#![warn(missing_docs)]

/// Command-line interface definitions.
pub mod cli;
/// Vector index clients (Pinecone).
pub mod db;
/// Hosted LLM chat clients (Groq).
pub mod llm;
/// Session transcript management.
pub mod memory;
/// RAG pipeline components.
pub mod rag;
/// Medical report persistence and text extraction.
pub mod report;
/// Core types (passages, turns, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

pub use db::{PineconeIndex, ScoredMatch, VectorStore};
pub use llm::{ChatClient, ChatProvider, GroqClient};
pub use memory::Conversation;
pub use rag::{EmbeddingClient, RagPipeline, RemoteEmbedder, RemoteReranker, RerankClient};
pub use types::{AppError, PipelineAnswer, QueryKind, RankedPassage, Result, RetrievedPassage};
pub use utils::config::Config;
