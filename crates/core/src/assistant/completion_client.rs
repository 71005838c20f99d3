use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::assistant_model::ChatMessage;
use super::assistant_traits::CompletionClientTrait;
use crate::errors::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.moonshot.cn/v1";
pub const DEFAULT_MODEL: &str = "moonshot-v1-128k";
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl CompletionConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

/// Client for any `/chat/completions` endpoint speaking the OpenAI dialect.
pub struct OpenAiCompatibleClient {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiCompatibleClient {
    pub fn new(config: CompletionConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, config }
    }
}

#[async_trait]
impl CompletionClientTrait for OpenAiCompatibleClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&CompletionRequest {
                model: &self.config.model,
                temperature: self.config.temperature,
                messages: &messages,
            })
            .send()
            .await
            .map_err(|e| Error::Assistant(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Completion endpoint answered HTTP {}", status.as_u16());
            return Err(Error::Assistant(format!("HTTP {}", status.as_u16())));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Assistant(format!("unreadable response: {}", e)))?;

        body.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .filter(|content| !content.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::Assistant("response had no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> OpenAiCompatibleClient {
        let mut config = CompletionConfig::new("ai-key".to_string());
        config.base_url = server.url();
        OpenAiCompatibleClient::new(config)
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer ai-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "moonshot-v1-128k",
                "temperature": 0.3
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"NVDA is flat."}}]}"#)
            .create_async()
            .await;

        let answer = client_for(&server)
            .complete(vec![ChatMessage::user("How is NVDA?")])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(answer, "NVDA is flat.");
    }

    #[tokio::test]
    async fn test_upstream_error_is_generic() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("invalid key sk-...")
            .create_async()
            .await;

        let err = client_for(&server)
            .complete(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Assistant request failed: HTTP 401");
    }

    #[tokio::test]
    async fn test_empty_content_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let result = client_for(&server)
            .complete(vec![ChatMessage::user("hi")])
            .await;
        assert!(matches!(result, Err(Error::Assistant(_))));
    }
}
