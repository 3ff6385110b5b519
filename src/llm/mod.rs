//! Hosted LLM chat clients.
//!
//! A single [`ChatClient`] trait abstracts the chat-completion provider so
//! the pipeline never depends on a concrete SDK. The shipped implementation
//! targets Groq's OpenAI-compatible API; any endpoint speaking the same
//! protocol works by overriding the API base.

/// Core chat client trait and provider selection.
pub mod client;
/// Groq (OpenAI-compatible) chat client.
pub mod groq;

pub use client::{ChatClient, ChatProvider};
pub use groq::GroqClient;
