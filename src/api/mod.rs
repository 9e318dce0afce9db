//! HTTP API layer (Axum).
//!
//! The web surface is a thin boundary over the core: it owns form decoding
//! and response shaping, never merge policy.
//!
//! # Endpoints
//!
//! - `POST /api/resolve` - resolve a free-text company name; a single
//!   high-confidence match assembles and returns the report download
//!   directly, anything else returns a disambiguation candidate list
//! - `POST /api/generate` - assemble and download the report for a
//!   selected title
//! - `GET /api/health` - health check

/// Request handlers for each endpoint.
pub mod handlers;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

/// OpenAPI description of the report API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::report::resolve,
        handlers::report::generate,
        handlers::health
    ),
    components(schemas(
        crate::types::ResolveRequest,
        crate::types::GenerateRequest,
        crate::types::DisambiguationResponse,
        crate::types::CompanyCandidate,
        crate::types::ReportDocument,
        crate::types::ReportSection
    ))
)]
pub struct ApiDoc;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/resolve", post(handlers::report::resolve))
        .route("/generate", post(handlers::report::generate))
}
