use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

const PROMPT_MAX_CHARS: usize = 4000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<()> {
        let len = self.prompt.trim().chars().count();
        if len == 0 {
            return Err(Error::invalid_field("prompt", "is required"));
        }
        if len > PROMPT_MAX_CHARS {
            return Err(Error::invalid_field("prompt", "is too long"));
        }
        Ok(())
    }
}

/// Where a piece of answer context came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<ChatSource>,
    pub tickers: Vec<String>,
}

/// One message of an OpenAI-style conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
