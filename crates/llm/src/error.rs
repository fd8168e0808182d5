use clearcare_core::completion::TransientError;

/// Errors raised while talking to the completion API.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("ANTHROPIC_API_KEY is not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response carried no text content")]
    EmptyContent,
}

impl LlmError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Network(_) => true,
            LlmError::ApiError { status, .. } => is_retryable_status(*status),
            LlmError::MissingApiKey | LlmError::InvalidResponse(_) | LlmError::EmptyContent => false,
        }
    }
}

/// Statuses worth another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504 | 529)
}

impl From<LlmError> for TransientError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::InvalidResponse(msg) => TransientError::Malformed(msg),
            LlmError::EmptyContent => TransientError::Empty,
            other => TransientError::Unavailable(other.to_string()),
        }
    }
}
