//! Expert Tool Core
//!
//! Foundational types shared by the Expert Tool workspace. This crate has no
//! dependency on storage, HTTP, or the async runtime.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Proxy configuration for the outbound text-generation client
//! - `text` - Keyword extraction and stable seeds for deterministic synthesis

pub mod error;
pub mod proxy;
pub mod text;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};

// ── Text Helpers ───────────────────────────────────────────────────────
pub use text::{keywords, ranked_keywords, stable_seed};
