//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod agency;
pub mod case;
pub mod expert;
pub mod interview;
pub mod settings;

pub use agency::*;
pub use case::*;
pub use expert::*;
pub use interview::*;
pub use settings::*;
