//! LLM Types
//!
//! Generation settings and the provider error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use expert_tool_core::ProxyConfig;

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the endpoint URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "OPENAI_MODEL";

/// Default model for script elaboration
pub const DEFAULT_MODEL: &str = "gpt-5.2";

/// Default system prompt sent with every remote request
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a consulting interviewer who drafts structured expert interview guides. \
     Expand the provided guide with probing questions and follow-ups. \
     Use a professional tone and keep it concise.";

/// Errors raised while talking to a text-generation provider.
///
/// These never reach workflow callers: [`crate::RemoteGenerator`] logs them
/// and answers from the local fallback instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Server error ({status:?}): {message}")]
    ServerError { message: String, status: Option<u16> },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("{message}")]
    Other { message: String },
}

/// Result type alias for provider calls
pub type LlmResult<T> = Result<T, LlmError>;

/// Settings for the text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Bearer credential, read from `OPENAI_API_KEY` only. Its presence
    /// selects the remote generator. Never read from or written to the
    /// config file.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    /// Full chat-completions URL; `None` uses the OpenAI endpoint.
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound for the single outbound request
    pub timeout_secs: u64,
    pub system_prompt: String,
    pub proxy: Option<ProxyConfig>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            max_tokens: 900,
            temperature: 0.7,
            timeout_secs: 30,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            proxy: None,
        }
    }
}

impl GenerationConfig {
    /// Overlay the process environment (`OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`).
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay credential, endpoint, and model from a key lookup.
    ///
    /// Blank values are treated as absent.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_blank(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_blank(BASE_URL_ENV) {
            self.base_url = Some(url);
        }
        if let Some(model) = non_blank(MODEL_ENV) {
            self.model = model;
        }
        self
    }

    /// Whether a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

/// Chat-completions response body (the fields we read)
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessage {
    pub content: Option<String>,
}
