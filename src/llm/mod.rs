//! LLM client abstractions and the OpenAI-backed implementation.

/// Provider-agnostic client trait.
pub mod client;
/// OpenAI (and compatible API) client.
pub mod openai;

pub use client::LLMClient;
pub use openai::OpenAIClient;
