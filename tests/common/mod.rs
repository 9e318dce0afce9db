//! Shared test doubles for integration tests.

use async_trait::async_trait;
use scout::llm::LLMClient;
use scout::tools::web::{SearchHit, WebAccess};
use scout::types::{AppError, Result};

/// `WebAccess` stub that finds nothing and extracts nothing.
pub struct NullWeb;

#[async_trait]
impl WebAccess for NullWeb {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchHit>> {
        Ok(Vec::new())
    }

    async fn extract(&self, url: &str) -> Result<String> {
        Err(AppError::Http(format!("no content for {url}")))
    }
}

/// `LLMClient` stub that fails the test if the model is ever invoked.
pub struct UnusedLlm;

#[async_trait]
impl LLMClient for UnusedLlm {
    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        panic!("model must not be called");
    }

    async fn generate_json(&self, _system: &str, _prompt: &str) -> Result<String> {
        panic!("model must not be called");
    }

    fn model_name(&self) -> &str {
        "unused"
    }
}
