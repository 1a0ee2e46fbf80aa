//! Settings Models
//!
//! Application configuration stored in config.json.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use expert_tool_llm::GenerationConfig;

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite file; `None` uses ~/.expert-tool/et_interviews.db
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Optional outreach email template registered as `outreach_email`
    #[serde(default)]
    pub email_template_path: Option<PathBuf>,
    /// Maximum interviews shown in recent-history views
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
    /// Text-generation settings; the credential comes from `OPENAI_API_KEY` only
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_recent_limit() -> u32 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            email_template_path: None,
            recent_limit: default_recent_limit(),
            generation: GenerationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Generation settings overlaid with the process environment
    pub fn generation_config(&self) -> GenerationConfig {
        self.generation.clone().with_env()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.recent_limit == 0 || self.recent_limit > 100 {
            return Err(format!(
                "recent_limit must be between 1 and 100, got {}",
                self.recent_limit
            ));
        }

        if self.generation.model.trim().is_empty() {
            return Err("generation.model must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(format!(
                "generation.temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            ));
        }

        if self.generation.timeout_secs == 0 {
            return Err("generation.timeout_secs must be at least 1".to_string());
        }

        if let Some(proxy) = &self.generation.proxy {
            proxy.validate().map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}
