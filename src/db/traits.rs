//! Vector store abstraction.

use crate::types::Result;
use async_trait::async_trait;

/// A scored nearest-neighbor match with its decoded passage text.
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    /// Vector id within the index.
    pub id: String,
    /// Similarity score reported by the index.
    pub score: f32,
    /// Decoded passage text carried in the match metadata.
    pub text: String,
}

/// Abstract nearest-neighbor query interface.
///
/// Implementations own connection details and metadata decoding; callers
/// provide an embedding and get back scored passages.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Fetch the `top_k` nearest neighbors for `embedding`.
    ///
    /// Matches whose metadata is missing or undecodable are skipped, so the
    /// result may be shorter than `top_k` even on a full index.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredMatch>>;
}
