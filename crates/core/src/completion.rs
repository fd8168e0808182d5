//! Abstract text-completion capability.
//!
//! The coaching services only ever see [`TextCompletion`]; the vendor client
//! lives in `clearcare-llm`. Every failure is a [`TransientError`], and the
//! services turn it into a fixed fallback with [`CompletionResultExt::or_fallback`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Speaker of a replayed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of conversation history sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Why a completion could not be produced. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransientError {
    /// Network failure, timeout, missing credentials, or a non-2xx reply.
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    /// The reply could not be parsed.
    #[error("Malformed completion response: {0}")]
    Malformed(String),

    /// The reply parsed but carried no text.
    #[error("Completion response contained no text")]
    Empty,
}

/// `complete(systemInstruction, history) -> text`.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<String, TransientError>;
}

/// Default-substitution combinator for completion results.
pub trait CompletionResultExt {
    /// Return the completion text, or `fallback` (logging the error) if the
    /// completion failed or came back blank.
    fn or_fallback(self, fallback: &str) -> String;
}

impl CompletionResultExt for Result<String, TransientError> {
    fn or_fallback(self, fallback: &str) -> String {
        match self {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Completion returned blank text, using fallback");
                fallback.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Completion failed, using fallback");
                fallback.to_string()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
