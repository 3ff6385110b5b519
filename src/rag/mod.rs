//! Retrieval Augmented Generation pipeline.
//!
//! The pipeline answers a user query in two branches:
//!
//! 1. **Grounded** - for medical queries: embed the query, fetch nearest
//!    neighbors from the vector index, rerank with a cross-encoder, compress
//!    the kept passages into a structured context, then generate the answer
//!    from query + context + transcript.
//! 2. **Fallback** - for everything else (and for empty retrieval): answer
//!    from the transcript alone, declining queries with no medical footing.
//!
//! Every stage is one awaited network call; stages run strictly
//! sequentially.

/// Query embedding clients.
pub mod embeddings;
/// End-to-end answer orchestration.
pub mod pipeline;
/// Prompt templates for every LLM call.
pub mod prompts;
/// Cross-encoder reranking.
pub mod reranker;

pub use embeddings::{EmbeddingClient, RemoteEmbedder};
pub use pipeline::RagPipeline;
pub use reranker::{RemoteReranker, RerankClient, rank_passages};
