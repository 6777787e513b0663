//! Model provider implementations

pub mod openai;

use crate::{ChatMessage, CompletionOptions, Error, Result};
use async_trait::async_trait;

/// Trait for chat-completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion and return the model's text (possibly empty)
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String>;
}

/// Get an API key from a provided value or the environment.
///
/// Blank values count as missing.
pub fn get_api_key(provided: Option<&str>, env_var: &str) -> Result<String> {
    if let Some(key) = provided.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    std::env::var(env_var)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(Error::InvalidApiKey)
}
