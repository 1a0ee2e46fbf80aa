//! Integration Tests Module
//!
//! End-to-end tests for the expert interview workflow. Every test runs against
//! an in-memory or temporary SQLite database and an offline text generator.

// Search, script, transcript, digest, and email workflow tests
mod workflow_test;

// Case and interview persistence tests
mod persistence_test;
