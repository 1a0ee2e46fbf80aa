//! OpenAI-Compatible Remote Generator
//!
//! Sends one chat-completions request per prompt. Any failure is absorbed and
//! answered by the deterministic local fallback.

use std::time::Duration;

use async_trait::async_trait;

use super::fallback::DeterministicFallbackGenerator;
use super::provider::{missing_api_key_error, parse_http_error, TextGenerator};
use super::types::{ChatCompletionResponse, GenerationConfig, LlmError, LlmResult};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Remote text generator backed by an OpenAI-compatible API
pub struct RemoteGenerator {
    config: GenerationConfig,
    client: reqwest::Client,
    fallback: DeterministicFallbackGenerator,
}

impl RemoteGenerator {
    /// Create a new remote generator with the given configuration
    pub fn new(config: GenerationConfig) -> LlmResult<Self> {
        let client = build_http_client(
            config.proxy.as_ref(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            config,
            client,
            fallback: DeterministicFallbackGenerator::new(),
        })
    }

    /// Get the API URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "stream": false,
            "messages": [
                { "role": "system", "content": self.config.system_prompt },
                { "role": "user", "content": prompt },
            ],
        })
    }

    /// Perform a single request and return the response text verbatim.
    pub async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(missing_api_key_error)?;

        let url = self.base_url();
        tracing::debug!("openai completion POST {}", url);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for RemoteGenerator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Remote generation failed, using local fallback: {}", e);
                self.fallback.generate(prompt).await
            }
        }
    }
}
