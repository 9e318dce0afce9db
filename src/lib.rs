//! # Scout - Company Research Report Server
//!
//! Scout turns a free-text company name into a structured, downloadable
//! research report. It resolves the name to a canonical entity, gathers
//! facts from several independent public sources (encyclopedia
//! summary/infobox, company website pages, financial data, news, employee
//! reviews), optionally synthesizes the result through a language model,
//! and otherwise falls back to deterministic rule-based section assembly.
//!
//! ## Overview
//!
//! Scout can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `scout-server` binary
//! 2. **As a library** - Import the resolver and assembler into your own
//!    Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use scout::{report::ReportAssembler, resolve::CompanyResolver, utils::config::Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let assembler = ReportAssembler::from_config(&config)?;
//!
//!     let report = assembler.assemble("Acme Corp", 4, None, &[]).await;
//!     for section in &report.sections {
//!         println!("## {}\n{}", section.title, section.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Control flow: resolver → (disambiguation or direct pass-through) →
//! assembler. The assembler either delegates wholesale to the
//! language-model synthesizer (when a model credential is configured) or
//! runs all source adapters concurrently and merges their partial outputs
//! under fixed precedence rules. A failing or absent individual source
//! never aborts assembly.
//!
//! ## Modules
//!
//! - [`resolve`] - Free-text name to ranked canonical candidates
//! - [`sources`] - Independent source adapters and the synthesizer
//! - [`report`] - Assembly orchestration and the rendering boundary
//! - [`llm`] - LLM client abstraction (OpenAI-compatible)
//! - [`tools`] - Open-web search and content extraction
//! - [`api`] - REST API handlers and routes
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration, HTTP fetch utility, text helpers

#![warn(missing_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// LLM provider clients and abstractions.
pub mod llm;
/// Report assembly and rendering boundary.
pub mod report;
/// Entity resolution.
pub mod resolve;
/// Source adapters (encyclopedia, website, finance, news, reviews, synthesizer).
pub mod sources;
/// Open-web search and page extraction tools.
pub mod tools;
/// Core types (document model, requests, responses, errors).
pub mod types;
/// Configuration and shared utilities.
pub mod utils;

// Re-export commonly used types
pub use report::ReportAssembler;
pub use resolve::{CompanyResolver, slugify};
pub use types::{AppError, CompanyCandidate, CompanyOverview, ReportDocument, ReportSection, Result};
pub use utils::config::Config;

use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration, read-only after startup
    pub config: Arc<Config>,
    /// Company name resolver
    pub resolver: Arc<CompanyResolver>,
    /// Report assembler (synthesis plus rule-based fallback)
    pub assembler: Arc<ReportAssembler>,
}

impl AppState {
    /// Wire up resolver and assembler from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher = utils::http::Fetcher::new()?;
        let resolver = CompanyResolver::new(config.sources.wikipedia_base.clone(), fetcher);
        let assembler = ReportAssembler::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            assembler: Arc::new(assembler),
        })
    }
}

/// Build the application router with tracing and CORS layers applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::create_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
