//! Inference module for llama-chat
//!
//! A single non-streaming request per user message, sent to a local Ollama
//! `/api/generate` endpoint.
//!
//! # Usage
//!
//! ```rust,no_run
//! use llama_chat::ai::{InferenceBackend, OllamaClient};
//!
//! # async fn example() -> llama_chat::ChatResult<()> {
//! let client = OllamaClient::new("http://localhost:11434/api/generate", "llama3.2");
//! let reply = client.generate("Hello!").await?;
//! # Ok(())
//! # }
//! ```

mod ollama;

use crate::error::ChatResult;
use async_trait::async_trait;

pub use ollama::{OllamaClient, parse_generate_body};

/// Anything that can turn a prompt into a complete reply.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> ChatResult<String>;
}
