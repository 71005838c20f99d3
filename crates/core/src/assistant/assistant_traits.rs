use async_trait::async_trait;

use super::assistant_model::ChatMessage;
use crate::errors::Result;

/// A hosted chat completion endpoint.
#[async_trait]
pub trait CompletionClientTrait: Send + Sync {
    /// Return the assistant message content for `messages`.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}
