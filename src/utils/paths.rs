//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Everything lives under ~/.expert-tool/.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Expert Tool directory (~/.expert-tool/)
pub fn app_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".expert-tool"))
}

/// Get the config file path (~/.expert-tool/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

/// Get the database file path (~/.expert-tool/et_interviews.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("et_interviews.db"))
}

/// Ensure a directory exists, creating it if necessary.
///
/// Fails with `AppError::Io` when something other than a directory is in the way.
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
