//! Text-completion client for the Anthropic Messages API.
//!
//! [`AnthropicClient`] implements the core
//! [`TextCompletion`](clearcare_core::completion::TextCompletion) seam.

pub mod anthropic;
pub mod config;
pub mod error;

pub use anthropic::AnthropicClient;
pub use config::CompletionConfig;
pub use error::LlmError;
