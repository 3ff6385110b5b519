//! Vector index clients.
//!
//! The pipeline talks to the index through the [`VectorStore`] trait; the
//! shipped backend is the Pinecone query REST API.

/// Pinecone REST client and metadata decoding.
pub mod pinecone;
/// Vector store abstraction.
pub mod traits;

pub use pinecone::PineconeIndex;
pub use traits::{ScoredMatch, VectorStore};
