//! Application State
//!
//! Wires configuration, storage, templates, and the text generator into a
//! ready-to-use workflow service.

use std::sync::Arc;

use expert_tool_llm::build_generator;

use crate::models::settings::AppConfig;
use crate::services::catalog::ExpertCatalog;
use crate::services::template::{TemplateEngine, OUTREACH_EMAIL};
use crate::services::workflow::WorkflowService;
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Application state: the validated config and the services built from it
pub struct AppState {
    config: AppConfig,
    workflow: Arc<WorkflowService>,
}

impl AppState {
    /// Build every service from `config`, opening the configured database
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        let database = match &config.database_path {
            Some(path) => Database::open(path)?,
            None => Database::new()?,
        };
        Self::with_database(config, database)
    }

    /// Build every service from `config` on top of an existing database
    pub fn with_database(config: AppConfig, database: Database) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;

        let mut templates = TemplateEngine::with_builtins();
        if let Some(path) = &config.email_template_path {
            templates.load_asset(OUTREACH_EMAIL, path)?;
        }

        let generator = build_generator(&config.generation_config());
        let workflow = WorkflowService::new(
            Arc::new(ExpertCatalog::builtin()),
            Arc::new(templates),
            generator,
            database,
        );

        tracing::info!(
            generator = workflow.generator_name(),
            "Application state initialized"
        );
        Ok(Self {
            config,
            workflow: Arc::new(workflow),
        })
    }

    /// The active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared handle to the workflow service
    pub fn workflow(&self) -> Arc<WorkflowService> {
        Arc::clone(&self.workflow)
    }

    /// Check if database is healthy
    pub fn is_database_healthy(&self) -> bool {
        self.workflow.database().is_healthy()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("generator", &self.workflow.generator_name())
            .finish()
    }
}
