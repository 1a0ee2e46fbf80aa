//! Text Generator Trait
//!
//! Defines the capability the workflow uses to elaborate interview scripts.

use std::sync::Arc;

use async_trait::async_trait;

use super::fallback::DeterministicFallbackGenerator;
use super::openai::RemoteGenerator;
use super::types::{GenerationConfig, LlmError};

/// Produces text for a prompt.
///
/// Implementations never fail: every error path resolves to locally
/// synthesized text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generator name for identification and logging.
    fn name(&self) -> &'static str;

    /// Generate text for the prompt. Always non-empty.
    async fn generate(&self, prompt: &str) -> String;
}

/// Select the generator variant for a configuration.
///
/// A configured credential yields a [`RemoteGenerator`]; otherwise (or if the
/// HTTP client cannot be built) the [`DeterministicFallbackGenerator`] is used.
pub fn build_generator(config: &GenerationConfig) -> Arc<dyn TextGenerator> {
    if !config.has_credential() {
        tracing::info!("No text-generation credential configured; using local fallback");
        return Arc::new(DeterministicFallbackGenerator::new());
    }

    match RemoteGenerator::new(config.clone()) {
        Ok(remote) => {
            tracing::info!("Remote text generation enabled: model={}", config.model);
            Arc::new(remote)
        }
        Err(e) => {
            tracing::warn!("Failed to build remote generator, using local fallback: {}", e);
            Arc::new(DeterministicFallbackGenerator::new())
        }
    }
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error() -> LlmError {
    LlmError::AuthenticationFailed {
        message: "API key not configured".to_string(),
    }
}

/// Helper function to classify HTTP error status codes
pub fn parse_http_error(status: u16, body: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: "Invalid API key".to_string(),
        },
        403 => LlmError::AuthenticationFailed {
            message: "Access denied".to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
        },
        400 | 404 | 422 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
