/// Completion client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Vendor API key. When absent every call fails and callers fall back.
    pub api_key: Option<String>,
    /// API origin, without the `/v1/messages` path.
    pub base_url: String,
    pub model: String,
    /// Upper bound on generated tokens per reply (default: `300`).
    pub max_tokens: u32,
    /// Per-request timeout in seconds (default: `12`).
    pub timeout_secs: u64,
    /// Extra attempts after a retryable failure (default: `1`).
    pub max_retries: u32,
}

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 300,
            timeout_secs: 12,
            max_retries: 1,
        }
    }
}

impl CompletionConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `ANTHROPIC_API_KEY`       | unset                       |
    /// | `ANTHROPIC_BASE_URL`      | `https://api.anthropic.com` |
    /// | `ANTHROPIC_MODEL`         | `claude-sonnet-4-20250514`  |
    /// | `COMPLETION_MAX_TOKENS`   | `300`                       |
    /// | `COMPLETION_TIMEOUT_SECS` | `12`                        |
    /// | `COMPLETION_MAX_RETRIES`  | `1`                         |
    pub fn from_env() -> Self {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let max_tokens: u32 = std::env::var("COMPLETION_MAX_TOKENS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("COMPLETION_MAX_TOKENS must be a valid u32");

        let timeout_secs: u64 = std::env::var("COMPLETION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "12".into())
            .parse()
            .expect("COMPLETION_TIMEOUT_SECS must be a valid u64");

        let max_retries: u32 = std::env::var("COMPLETION_MAX_RETRIES")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("COMPLETION_MAX_RETRIES must be a valid u32");

        Self {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout_secs,
            max_retries,
        }
    }
}
