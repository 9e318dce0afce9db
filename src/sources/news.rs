//! Recent-news summarizer.
//!
//! Only constructed when a news-API credential is configured; without one
//! the assembler holds no client and no network call is attempted.

use crate::types::Result;
use crate::utils::http::Fetcher;
use serde_json::Value;

const MAX_ARTICLES: usize = 5;
const NEWS_FRAMING: &str = "Recent news items may indicate near-term focus areas and risks:";

pub struct NewsClient {
    base: String,
    api_key: String,
    fetcher: Fetcher,
}

impl NewsClient {
    pub fn new(base: impl Into<String>, api_key: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            base: base.into(),
            api_key: api_key.into(),
            fetcher,
        }
    }

    /// Bulleted list of recent relevant headlines, or `None` on any
    /// transport/parse failure or empty result set.
    pub async fn summarize_recent_news(&self, title: &str) -> Option<String> {
        let data = match self.fetch_articles(title).await {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(company = title, error = %e, "news lookup failed");
                return None;
            }
        };

        let bullets = headline_bullets(&data);
        if bullets.is_empty() {
            return None;
        }
        Some(format!("{NEWS_FRAMING}\n{}", bullets.join("\n")))
    }

    async fn fetch_articles(&self, title: &str) -> Result<Value> {
        let url = format!("{}/v2/everything", self.base);
        let page_size = MAX_ARTICLES.to_string();
        self.fetcher
            .fetch_json(
                &url,
                &[
                    ("q", title),
                    ("language", "en"),
                    ("sortBy", "relevancy"),
                    ("pageSize", &page_size),
                    ("apiKey", &self.api_key),
                ],
            )
            .await
    }
}

/// `- {title} ({sourceName})` for up to 5 articles with a non-empty title.
fn headline_bullets(data: &Value) -> Vec<String> {
    let Some(articles) = data["articles"].as_array() else {
        return Vec::new();
    };

    articles
        .iter()
        .take(MAX_ARTICLES)
        .filter_map(|a| {
            let title = a["title"].as_str().filter(|t| !t.is_empty())?;
            let source = a["source"]["name"].as_str().unwrap_or("");
            Some(format!("- {title} ({source})"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bullets_include_source_names() {
        let data = json!({
            "articles": [
                {"title": "Acme expands", "source": {"name": "Reuters"}},
                {"title": "Acme hires", "source": {"name": "Bloomberg"}}
            ]
        });
        assert_eq!(
            headline_bullets(&data),
            vec!["- Acme expands (Reuters)", "- Acme hires (Bloomberg)"]
        );
    }

    #[test]
    fn untitled_articles_are_dropped_and_count_capped() {
        let mut articles: Vec<Value> = (0..7)
            .map(|i| json!({"title": format!("Story {i}"), "source": {"name": "Wire"}}))
            .collect();
        articles.insert(0, json!({"source": {"name": "Wire"}}));
        let data = json!({ "articles": articles });

        let bullets = headline_bullets(&data);
        // the untitled article consumes one of the five considered slots
        assert_eq!(bullets.len(), 4);
        assert_eq!(bullets[0], "- Story 0 (Wire)");
    }

    #[test]
    fn missing_articles_key_yields_nothing() {
        assert!(headline_bullets(&json!({"status": "error"})).is_empty());
    }
}
