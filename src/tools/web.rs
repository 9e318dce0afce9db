//! Web search and page-content extraction via daedra.
//!
//! daedra uses DuckDuckGo as the search backend and converts fetched pages
//! to markdown. The [`WebAccess`] trait is the seam that lets the review,
//! website and synthesizer adapters be exercised against a stubbed web in
//! tests.

use crate::types::{AppError, Result};
use async_trait::async_trait;

/// One web search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Search the open web and extract main textual content from pages.
#[async_trait]
pub trait WebAccess: Send + Sync {
    /// Search for `query`, returning up to `limit` hits.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>>;

    /// Fetch `url` and extract its main content as markdown.
    async fn extract(&self, url: &str) -> Result<String>;
}

/// Production [`WebAccess`] implementation powered by daedra.
pub struct DaedraWeb;

impl DaedraWeb {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DaedraWeb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebAccess for DaedraWeb {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let search_args = daedra::SearchArgs {
            query: query.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: limit,
                ..Default::default()
            }),
        };

        match daedra::tools::search::perform_search(&search_args).await {
            Ok(response) => Ok(response
                .data
                .iter()
                .map(|r| SearchHit {
                    title: r.title.clone(),
                    url: r.url.clone(),
                    description: r.description.clone(),
                })
                .collect()),
            Err(e) => Err(AppError::Internal(format!("Search failed: {e}"))),
        }
    }

    async fn extract(&self, url: &str) -> Result<String> {
        let fetch_args = daedra::VisitPageArgs {
            url: url.to_string(),
            include_images: false,
            selector: None,
        };

        match daedra::tools::fetch::fetch_page(&fetch_args).await {
            Ok(page) => Ok(page.content),
            Err(e) => Err(AppError::Internal(format!("Failed to fetch page: {e}"))),
        }
    }
}
