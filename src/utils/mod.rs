//! Utilities
//!
//! Error types and filesystem paths shared by the storage and service layers.

pub mod error;
pub mod paths;

pub use error::*;
pub use paths::*;
