//! Anthropic Messages API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use clearcare_core::completion::{ChatMessage, TextCompletion, TransientError};

use crate::config::CompletionConfig;
use crate::error::{is_retryable_status, LlmError};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Initial backoff delay between attempts, doubled each retry.
const INITIAL_BACKOFF_MS: u64 = 250;

/// Upper bound on a single backoff delay.
const MAX_BACKOFF_MS: u64 = 8_000;

/// Delay before retry number `attempt` (1-based).
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(INITIAL_BACKOFF_MS.saturating_mul(factor).min(MAX_BACKOFF_MS))
}

pub struct AnthropicClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
    max_retries: u32,
    http: Client,
}

impl AnthropicClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            max_retries: config.max_retries,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, system_instruction: &str, history: &[ChatMessage]) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system_instruction,
            "messages": history,
        })
    }

    /// Send one Messages request, retrying transient failures.
    pub async fn send(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_request_body(system_instruction, history);

        let mut attempt = 0;
        loop {
            match self.attempt(&url, api_key, &body).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = backoff_delay(attempt);
                    warn!(attempt, backoff_ms = backoff.as_millis() as u64, error = %e, "Retrying completion request");
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<String, LlmError> {
        let response = self
            .http
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            debug!(status, retryable = is_retryable_status(status), "Completion API error");
            return Err(LlmError::ApiError { status, message: text });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        parse_response(parsed)
    }
}

/// Text of the first content block.
fn parse_response(response: MessagesResponse) -> Result<String, LlmError> {
    match response.content.into_iter().next() {
        Some(ContentBlock::Text { text }) if !text.trim().is_empty() => Ok(text),
        Some(ContentBlock::Text { .. }) | None => Err(LlmError::EmptyContent),
        Some(ContentBlock::Other) => Err(LlmError::InvalidResponse(
            "first content block is not text".into(),
        )),
    }
}

#[async_trait]
impl TextCompletion for AnthropicClient {
    async fn complete(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<String, TransientError> {
        debug!(model = %self.model, turns = history.len(), "Requesting completion");
        self.send(system_instruction, history)
            .await
            .map_err(TransientError::from)
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn client() -> AnthropicClient {
        AnthropicClient::new(&CompletionConfig {
            api_key: Some("test-key".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn request_body_carries_system_and_history() {
        let history = vec![ChatMessage::user("Hello"), ChatMessage::assistant("Hi.")];
        let body = client().build_request_body("Stay in character", &history);

        assert_eq!(body["model"], "claude-sonnet-4-20250514");
        assert_eq!(body["max_tokens"], 300);
        assert_eq!(body["system"], "Stay in character");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["messages"][1]["content"], "Hi.");
    }

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(1), Duration::from_millis(250));
        assert_eq!(backoff_delay(2), Duration::from_millis(500));
        assert_eq!(backoff_delay(3), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(6), Duration::from_millis(8_000));
        assert_eq!(backoff_delay(65), Duration::from_millis(8_000));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_millis(8_000));
    }

    #[test]
    fn parse_takes_first_text_block() {
        let response: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [{"type": "text", "text": "Hello there."}, {"type": "text", "text": "ignored"}],
            "stop_reason": "end_turn"
        }))
        .unwrap();
        assert_eq!(parse_response(response).unwrap(), "Hello there.");
    }

    #[test]
    fn parse_rejects_missing_or_non_text_content() {
        let empty: MessagesResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_matches!(parse_response(empty), Err(LlmError::EmptyContent));

        let tool: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]
        }))
        .unwrap();
        assert_matches!(parse_response(tool), Err(LlmError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let client = AnthropicClient::new(&CompletionConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        })
        .unwrap();
        assert_matches!(client.send("s", &[]).await, Err(LlmError::MissingApiKey));
    }
}
