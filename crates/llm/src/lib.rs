//! Expert Tool LLM
//!
//! Text generation for interview scripts behind a single capability,
//! [`TextGenerator`], with two implementations:
//! - [`RemoteGenerator`] - one best-effort call to an OpenAI-compatible
//!   chat-completions endpoint, falling back locally on any failure
//! - [`DeterministicFallbackGenerator`] - seeded local synthesis, stable per prompt
//!
//! [`build_generator`] picks the variant from configuration at construction time.

pub mod fallback;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use fallback::{DeterministicFallbackGenerator, FALLBACK_PREFIX};
pub use http_client::build_http_client;
pub use openai::RemoteGenerator;
pub use provider::{build_generator, TextGenerator};
pub use types::*;
