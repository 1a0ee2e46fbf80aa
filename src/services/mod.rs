//! Services
//!
//! Business logic: the expert catalog, templates, scoring, agency replies,
//! transcript and digest synthesis, and the workflow that ties them to storage.

pub mod agency;
pub mod catalog;
pub mod digest;
pub mod scoring;
pub mod template;
pub mod transcript;
pub mod workflow;

pub use catalog::ExpertCatalog;
pub use template::TemplateEngine;
pub use workflow::{EmailStyle, WorkflowService};
