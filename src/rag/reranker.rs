//! Cross-encoder reranking.
//!
//! Retrieval scores from the vector index are approximate; a cross-encoder
//! scores each (query, passage) pair jointly and the pipeline keeps only
//! the top few passages by that score.

use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{AppError, RankedPassage, Result, RetrievedPassage};

/// Scores (query, passage) pairs with a cross-encoder.
#[async_trait]
pub trait RerankClient: Send + Sync {
    /// Return one relevance score per document, in input order.
    async fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f32>>;
}

/// Client for a hosted rerank endpoint (Jina/Cohere-style `POST /rerank`).
pub struct RemoteReranker {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Debug, Deserialize)]
struct RerankResponse {
    results: Vec<RerankResult>,
}

#[derive(Debug, Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f32,
}

impl RemoteReranker {
    pub fn new(
        api_base: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Rerank(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl RerankClient for RemoteReranker {
    async fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f32>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/rerank", self.api_base);
        let body = RerankRequest {
            model: &self.model,
            query,
            documents,
            // Score everything; truncation happens in rank_passages.
            top_n: documents.len(),
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Rerank(format!("Rerank request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Rerank(format!(
                "Rerank API returned {}: {}",
                status, detail
            )));
        }

        let parsed: RerankResponse = response
            .json()
            .await
            .map_err(|e| AppError::Rerank(format!("Invalid rerank response: {}", e)))?;

        // Map scores back to input order; documents the API dropped score 0.
        let mut scores = vec![0.0; documents.len()];
        for result in parsed.results {
            if let Some(slot) = scores.get_mut(result.index) {
                *slot = result.relevance_score;
            }
        }

        Ok(scores)
    }
}

/// Order passages by cross-encoder score, descending, and keep the top
/// `keep`.
///
/// The sort is stable: passages with equal scores keep their retrieval
/// order. `scores` must be in the same order as `passages`; a missing score
/// counts as 0.
pub fn rank_passages(
    passages: &[RetrievedPassage],
    scores: &[f32],
    keep: usize,
) -> Vec<RankedPassage> {
    let mut ranked: Vec<RankedPassage> = passages
        .iter()
        .enumerate()
        .map(|(idx, passage)| RankedPassage {
            text: passage.text.clone(),
            retrieval_score: passage.score,
            rerank_score: scores.get(idx).copied().unwrap_or(0.0),
            original_rank: idx + 1,
            new_rank: 0,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.rerank_score
            .partial_cmp(&a.rerank_score)
            .unwrap_or(Ordering::Equal)
    });

    ranked.truncate(keep);
    for (idx, passage) in ranked.iter_mut().enumerate() {
        passage.new_rank = idx + 1;
    }

    ranked
}
