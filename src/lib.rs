//! Expert Tool - Interview Workflow Library
//!
//! Backend for consulting teams running expert calls. It includes:
//! - A mock expert catalog with search and match scoring
//! - Simulated agency replies and history-aware recommendations
//! - Template-driven interview scripts with optional remote elaboration
//! - Deterministic transcript simulation and interview digests
//! - SQLite persistence for case context and interview summaries

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::settings::AppConfig;
pub use services::{EmailStyle, ExpertCatalog, TemplateEngine, WorkflowService};
pub use state::AppState;
pub use storage::{ConfigService, Database};
pub use utils::error::{AppError, AppResult};
