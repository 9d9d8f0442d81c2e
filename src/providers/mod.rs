/*!
 * Provider implementations for chat-completion services.
 *
 * This module contains the client abstraction used by the translation
 * orchestrator plus concrete implementations:
 * - OpenAI: OpenAI-compatible chat-completions API
 * - Mock: deterministic in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single chat-completion request: one system message, one user message.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model name to use
    pub model: String,

    /// System prompt guiding the model
    pub system: String,

    /// User message carrying the text to translate
    pub user: String,

    /// Temperature for generation
    pub temperature: f32,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

/// Common trait for all chat-completion providers
///
/// One prompt in, raw completion text out. Implementations perform no
/// retries; a single failed attempt is surfaced immediately to the caller.
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    /// Complete a request and return the completion text verbatim
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError>;
}

pub mod mock;
pub mod openai;
