//! Query embedding clients.

use async_openai::{Client, config::OpenAIConfig, types::embeddings::CreateEmbeddingRequestArgs};
use async_trait::async_trait;

use crate::types::{AppError, Result};

/// Turns a query string into a dense vector.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// The embedding model identifier.
    fn model_name(&self) -> &str;
}

/// Embedding client for any OpenAI-compatible `/embeddings` endpoint
/// (hosted APIs or a local text-embeddings-inference server).
pub struct RemoteEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
}

impl RemoteEmbedder {
    pub fn new(api_base: String, api_key: Option<String>, model: String) -> Self {
        let mut config = OpenAIConfig::new().with_api_base(api_base);
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }

        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl EmbeddingClient for RemoteEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(vec![text.to_string()])
            .build()
            .map_err(|e| AppError::Embedding(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| AppError::Embedding(format!("Embedding API error: {}", e)))?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| AppError::Embedding("Embedding API returned no vectors".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
