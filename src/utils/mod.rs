//! Configuration and small shared utilities.

/// Environment-driven application configuration.
pub mod config;
/// HTTP fetch utility with bounded retry and backoff.
pub mod http;
/// Text helpers (truncation, number formatting).
pub mod text;
