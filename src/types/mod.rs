use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

// ============= Resolution Types =============

/// A possible canonical-entity match for a free-text company query.
///
/// Candidates are ephemeral: they live only within one resolution call and
/// are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyCandidate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Confidence in [0, 1] that this candidate is what the user meant.
    pub score: f64,
    pub slug: String,
}

// ============= Overview Types =============

/// Canonical facts about one resolved company.
///
/// Everything except `title`, `slug` and `sources` is optional - "unknown"
/// is a valid, common state, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub history: Option<String>,
    pub leaders: Vec<String>,
    pub products: Vec<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub founded: Option<String>,
    pub employees: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub strategy: Option<String>,
    pub peers: Vec<String>,
    pub differentiation: Option<String>,
    pub values: Option<String>,
    /// Citation URLs; always contains at least the canonical page URL.
    pub sources: Vec<String>,
}

// ============= Report Types =============

/// One titled, sourced block of narrative content in the final document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSection {
    pub title: String,
    /// Free text / markdown. Never empty in an assembled document.
    pub content: String,
    pub sources: Vec<String>,
}

/// The final aggregate handed to rendering. Constructed once by the
/// assembler; no further mutation after assembly returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReportDocument {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    pub leaders: Vec<String>,
    pub products: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,

    /// Reading-order section sequence. Order is assembly policy, not sorted.
    pub sections: Vec<ReportSection>,
    pub peers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub differentiation: Option<String>,

    pub references: Vec<String>,

    /// Free-form metadata, e.g. the requested page count.
    #[schema(value_type = Object)]
    pub meta: HashMap<String, serde_json::Value>,
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveRequest {
    pub company_name: String,
    #[serde(default = "default_expected_pages")]
    pub expected_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(default)]
    pub reference_urls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub selected_title: String,
    #[serde(default = "default_expected_pages")]
    pub expected_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(default)]
    pub reference_urls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DisambiguationResponse {
    pub candidates: Vec<CompanyCandidate>,
}

fn default_expected_pages() -> u32 {
    4
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No matching company found: {0}")]
    NoMatch(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NoMatch(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::Http(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Llm(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
