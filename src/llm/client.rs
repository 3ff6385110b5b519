//! Chat client abstraction and provider selection.

use crate::types::Result;
use async_trait::async_trait;

/// Generic chat-completion client.
///
/// The pipeline holds a `Box<dyn ChatClient>` so providers can be swapped
/// without touching orchestration code.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generate a completion from a single user prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with an explicit system prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// The model identifier this client targets.
    fn model_name(&self) -> &str;
}

/// Chat provider configuration for runtime selection.
#[derive(Debug, Clone)]
pub enum ChatProvider {
    /// Groq's OpenAI-compatible chat-completion API.
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = ChatProvider::Groq {
    ///     api_key: "gsk_...".to_string(),
    ///     api_base: "https://api.groq.com/openai/v1".to_string(),
    ///     model: "llama3-8b-8192".to_string(),
    ///     temperature: 0.0,
    ///     max_tokens: 1000,
    /// };
    /// ```
    Groq {
        api_key: String,
        api_base: String,
        model: String,
        temperature: f32,
        max_tokens: u32,
    },
}

impl ChatProvider {
    /// Create a client instance for this provider.
    pub fn create_client(&self) -> Box<dyn ChatClient> {
        match self {
            ChatProvider::Groq {
                api_key,
                api_base,
                model,
                temperature,
                max_tokens,
            } => Box::new(super::groq::GroqClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *temperature,
                *max_tokens,
            )),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            ChatProvider::Groq { .. } => "Groq",
        }
    }
}

impl From<&crate::utils::config::LlmConfig> for ChatProvider {
    fn from(config: &crate::utils::config::LlmConfig) -> Self {
        ChatProvider::Groq {
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}
