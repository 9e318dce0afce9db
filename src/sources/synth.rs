//! Language-model report synthesizer: the alternative assembly path.
//!
//! Performs a bounded multi-URL search-and-extract step, then asks a
//! generative model to produce the complete structured document in one
//! shot. Every failure mode (no usable documents, API error, malformed
//! response) reports "no result" so the caller can fall back to rule-based
//! assembly.

use crate::llm::LLMClient;
use crate::tools::web::WebAccess;
use crate::types::{ReportDocument, ReportSection};
use crate::utils::text::truncate_chars;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

const RESULTS_PER_QUERY: usize = 3;
const MAX_URLS: usize = 12;
const MAX_DOCS: usize = 10;
const DOC_CHARS: usize = 6000;

const SYSTEM_PROMPT: &str = "You are a senior consulting analyst. Synthesize concise, accurate \
    company research in a clear, executive style. Be factual and cite which sources informed \
    which sections by including a sources list.";

const SECTION_GUIDANCE: &[&str] = &[
    "Brief history",
    "Strategy and future outlook (growth areas)",
    "Key products and revenue streams",
    "Peers and competitive differentiation",
    "Values and culture",
    "Public reviews summary (e.g., Glassdoor)",
];

pub struct ReportSynthesizer {
    llm: Arc<dyn LLMClient>,
    web: Arc<dyn WebAccess>,
}

#[derive(Debug, Serialize)]
struct SourceDocument {
    url: String,
    content: String,
}

impl ReportSynthesizer {
    pub fn new(llm: Arc<dyn LLMClient>, web: Arc<dyn WebAccess>) -> Self {
        Self { llm, web }
    }

    /// Build a complete report via the model, or `None` when synthesis is
    /// unavailable; the caller must then fall back to rule-based assembly.
    /// The returned document's slug is left unset - the caller derives a
    /// display slug from the selected title when needed.
    pub async fn build(
        &self,
        title: &str,
        expected_pages: u32,
        interests: Option<&str>,
        reference_urls: &[String],
    ) -> Option<ReportDocument> {
        let urls = self.gather_urls(title, reference_urls).await;
        let docs = self.load_pages(&urls).await;
        if docs.is_empty() {
            tracing::debug!(company = title, "no usable documents for synthesis");
            return None;
        }

        let payload = prompt_payload(title, interests, expected_pages, &docs);
        let content = match self.llm.generate_json(SYSTEM_PROMPT, &payload).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(company = title, error = %e, "model synthesis failed");
                return None;
            }
        };

        match serde_json::from_str::<SynthesizedReport>(&content) {
            Ok(report) => Some(report.into_document()),
            Err(e) => {
                tracing::warn!(company = title, error = %e, "model returned malformed report");
                None
            }
        }
    }

    /// Deduplicated, order-preserving URL list: user-supplied references
    /// first, then up to 3 search results per query template, capped at 12.
    async fn gather_urls(&self, title: &str, reference_urls: &[String]) -> Vec<String> {
        let mut urls: Vec<String> = reference_urls.to_vec();

        for query in query_templates(title) {
            match self.web.search(&query, RESULTS_PER_QUERY).await {
                Ok(hits) => {
                    for hit in hits.into_iter().take(RESULTS_PER_QUERY) {
                        if hit.url.starts_with("http") {
                            urls.push(hit.url);
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(query, error = %e, "search query failed");
                }
            }
        }

        let mut seen = HashSet::new();
        urls.retain(|u| seen.insert(u.clone()));
        urls.truncate(MAX_URLS);
        urls
    }

    /// Extract all pages concurrently, keeping URL order in the output.
    async fn load_pages(&self, urls: &[String]) -> Vec<SourceDocument> {
        let fetches = urls.iter().map(|url| async move {
            match self.web.extract(url).await {
                Ok(text) if !text.is_empty() => Some(SourceDocument {
                    url: url.clone(),
                    content: truncate_chars(&text, DOC_CHARS),
                }),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(url, error = %e, "dropping source document");
                    None
                }
            }
        });
        join_all(fetches).await.into_iter().flatten().collect()
    }
}

fn query_templates(title: &str) -> [String; 8] {
    [
        title.to_string(),
        format!("{title} about"),
        format!("{title} leadership"),
        format!("{title} products"),
        format!("{title} revenue"),
        format!("{title} strategy"),
        format!("{title} values"),
        format!("{title} Glassdoor"),
    ]
}

fn prompt_payload(
    title: &str,
    interests: Option<&str>,
    expected_pages: u32,
    docs: &[SourceDocument],
) -> String {
    serde_json::json!({
        "company": title,
        "expected_pages": expected_pages,
        "interests": interests.unwrap_or(""),
        "documents": docs.iter().take(MAX_DOCS).collect::<Vec<_>>(),
        "output_format": {
            "company_title": "string",
            "location": "string?",
            "industry": "string?",
            "founded": "string?",
            "employees": "string?",
            "website": "string?",
            "leaders": ["string"],
            "products": ["string"],
            "revenue": "string?",
            "sections": [
                {
                    "title": "string",
                    "content": "markdown string",
                    "sources": ["string"],
                }
            ],
            "peers": ["string"],
            "differentiation": "string?",
            "references": ["string"],
        },
        "section_guidance": SECTION_GUIDANCE,
        "style": "Terse, structured, McKinsey-style; avoid fluff.",
    })
    .to_string()
}

/// Schema-validated model output. Every expected field has a declared type
/// and an explicit default-on-absence; this deserialization is the only
/// place model JSON is interpreted.
#[derive(Debug, Deserialize)]
struct SynthesizedReport {
    #[serde(default, alias = "title")]
    company_title: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    founded: Option<String>,
    #[serde(default)]
    employees: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    leaders: Vec<String>,
    #[serde(default)]
    products: Vec<String>,
    #[serde(default)]
    revenue: Option<String>,
    #[serde(default)]
    sections: Vec<SynthesizedSection>,
    #[serde(default)]
    peers: Vec<String>,
    #[serde(default)]
    differentiation: Option<String>,
    #[serde(default)]
    references: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SynthesizedSection {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    sources: Vec<String>,
}

impl SynthesizedReport {
    fn into_document(self) -> ReportDocument {
        let sections = self
            .sections
            .into_iter()
            .filter(|s| !s.content.trim().is_empty())
            .map(|s| ReportSection {
                title: s.title,
                content: s.content,
                sources: s.sources,
            })
            .collect();

        ReportDocument {
            title: self.company_title,
            slug: None,
            logo_url: None,
            location: self.location,
            industry: self.industry,
            founded: self.founded,
            employees: self.employees,
            website: self.website,
            leaders: self.leaders,
            products: self.products,
            revenue: self.revenue,
            sections,
            peers: self.peers,
            differentiation: self.differentiation,
            references: self.references.into_iter().filter(|r| !r.is_empty()).collect(),
            meta: Default::default(),
        }
    }
}
