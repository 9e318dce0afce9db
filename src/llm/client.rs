use crate::types::Result;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction.
///
/// The synthesizer only needs single-shot completions; conversation state
/// is out of scope here.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a system prompt and user prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate a completion constrained to a single JSON object.
    async fn generate_json(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}
