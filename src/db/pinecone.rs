//! Pinecone vector index client.
//!
//! Talks to an index host's `/query` endpoint over REST. Passage text is
//! stored in the `patient_doctor_dialogue` metadata field as
//! base64-wrapped, zlib-deflated UTF-8 and is decoded on the way out.

use std::collections::HashMap;
use std::io::Read;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::read::ZlibDecoder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::db::traits::{ScoredMatch, VectorStore};
use crate::types::{AppError, Result};

/// Metadata field holding the compressed passage text.
const PASSAGE_FIELD: &str = "patient_doctor_dialogue";

/// Client for one Pinecone index.
pub struct PineconeIndex {
    http: reqwest::Client,
    index_host: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Debug, Deserialize)]
struct Match {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<HashMap<String, Value>>,
}

impl PineconeIndex {
    /// Connect to an index by host URL and API key.
    pub fn new(index_host: String, api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::VectorStore(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            index_host: index_host.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl VectorStore for PineconeIndex {
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredMatch>> {
        let url = format!("{}/query", self.index_host);
        let body = QueryRequest {
            vector: embedding,
            top_k,
            include_metadata: true,
        };

        let response = self
            .http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("Pinecone request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::VectorStore(format!(
                "Pinecone query returned {}: {}",
                status, detail
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::VectorStore(format!("Invalid Pinecone response: {}", e)))?;

        let mut matches = Vec::with_capacity(parsed.matches.len());
        for m in parsed.matches {
            let Some(encoded) = m
                .metadata
                .as_ref()
                .and_then(|meta| meta.get(PASSAGE_FIELD))
                .and_then(Value::as_str)
            else {
                warn!(id = %m.id, "match has no {} metadata, skipping", PASSAGE_FIELD);
                continue;
            };

            match decode_compressed_metadata(encoded) {
                Ok(text) => matches.push(ScoredMatch {
                    id: m.id,
                    score: m.score,
                    text,
                }),
                Err(e) => {
                    warn!(id = %m.id, error = %e, "undecodable match metadata, skipping");
                }
            }
        }

        Ok(matches)
    }
}

/// Decode a base64-wrapped, zlib-deflated UTF-8 metadata value.
pub fn decode_compressed_metadata(encoded: &str) -> Result<String> {
    let compressed = BASE64
        .decode(encoded)
        .map_err(|e| AppError::VectorStore(format!("Invalid base64 metadata: {}", e)))?;

    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|e| AppError::VectorStore(format!("Failed to inflate metadata: {}", e)))?;

    Ok(text)
}
