//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use expert_tool_core::CoreError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Storage errors (pool, lock, or disk failures)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite errors (auto-converted from rusqlite::Error)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors raised by the core crate
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Empty or malformed identifiers
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Lookup misses for cases and interview summaries
    #[error("Not found: {0}")]
    NotFound(String),

    /// Expert id absent from the catalog
    #[error("Expert not found: {0}")]
    ExpertNotFound(String),

    /// Unknown template name
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template placeholder without a binding
    #[error("Template '{template}' has no binding for placeholder '{placeholder}'")]
    MissingBinding {
        template: String,
        placeholder: String,
    },
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether the error came from the persistence layer
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Sqlite(_) | Self::Io(_))
    }
}
