//! Entity resolution: free-text company name to ranked canonical candidates.
//!
//! Queries a MediaWiki-style search index for up to 8 title matches. A
//! transport failure yields an empty candidate list rather than an error;
//! callers must treat empty as "no matches".

use crate::types::CompanyCandidate;
use crate::utils::http::Fetcher;
use std::collections::HashSet;

const MAX_SEARCH_RESULTS: usize = 8;

/// Derive a URL/filename-safe lowercase token from a title: spaces become
/// hyphens, everything outside `[a-z0-9-]` is stripped. Idempotent.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Canonical encyclopedia page URL for a title.
pub(crate) fn canonical_page_url(base: &str, title: &str) -> String {
    format!("{}/wiki/{}", base, title.replace(' ', "_"))
}

/// Confidence that a matched title is what the user meant: exact
/// case-insensitive match 1.0, query contained in title 0.9, else 0.6.
fn confidence(query: &str, title: &str) -> f64 {
    let q = query.to_lowercase();
    let t = title.to_lowercase();
    if q == t {
        1.0
    } else if t.contains(&q) {
        0.9
    } else {
        0.6
    }
}

/// Deduplicate by case-insensitive title (first occurrence wins, original
/// order preserved) and score each remaining title against the query.
fn candidates_from_titles(base: &str, query: &str, titles: Vec<String>) -> Vec<CompanyCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for title in titles {
        if !seen.insert(title.to_lowercase()) {
            continue;
        }
        candidates.push(CompanyCandidate {
            url: Some(canonical_page_url(base, &title)),
            description: Some("Wikipedia".to_string()),
            score: confidence(query, &title),
            slug: slugify(&title),
            title,
        });
    }
    candidates
}

/// Resolves free-text queries against an encyclopedia search index.
pub struct CompanyResolver {
    base: String,
    fetcher: Fetcher,
}

impl CompanyResolver {
    pub fn new(base: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            base: base.into(),
            fetcher,
        }
    }

    /// Search for candidate companies. Never fails: transport errors are
    /// logged and mapped to an empty list. Output keeps the search index's
    /// order after dedup; it is not re-sorted by score.
    pub async fn search_companies(&self, query: &str) -> Vec<CompanyCandidate> {
        let titles = match self.search_titles(query).await {
            Ok(titles) => titles,
            Err(e) => {
                tracing::warn!(query, error = %e, "company search failed; returning no candidates");
                Vec::new()
            }
        };
        candidates_from_titles(&self.base, query, titles)
    }

    async fn search_titles(&self, query: &str) -> crate::types::Result<Vec<String>> {
        let url = format!("{}/w/api.php", self.base);
        let limit = MAX_SEARCH_RESULTS.to_string();
        let data = self
            .fetcher
            .fetch_json(
                &url,
                &[
                    ("action", "query"),
                    ("list", "search"),
                    ("srsearch", query),
                    ("srlimit", &limit),
                    ("format", "json"),
                ],
            )
            .await?;

        Ok(data["query"]["search"]
            .as_array()
            .map(|results| {
                results
                    .iter()
                    .filter_map(|r| r["title"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Acme, Corp!", "acme-corp")]
    #[case("Acme Corp", "acme-corp")]
    #[case("  Spaced  Out  ", "--spaced--out--")]
    #[case("ÜberTech GmbH", "bertech-gmbh")]
    fn slugify_strips_to_safe_charset(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn slugify_is_idempotent() {
        let once = slugify("Acme, Corp!");
        assert_eq!(slugify(&once), once);
    }

    #[rstest]
    #[case("Acme Corp", "Acme Corp", 1.0)]
    #[case("acme corp", "Acme Corp", 1.0)]
    #[case("Acme", "Acme Corp", 0.9)]
    #[case("Acme", "Widgets Inc", 0.6)]
    fn confidence_scoring(#[case] query: &str, #[case] title: &str, #[case] expected: f64) {
        assert!((confidence(query, title) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn dedup_is_case_insensitive_and_order_preserving() {
        let titles = vec![
            "Acme Corp".to_string(),
            "Widgets Inc".to_string(),
            "ACME CORP".to_string(),
            "acme corp".to_string(),
            "Gadgets Ltd".to_string(),
        ];
        let candidates = candidates_from_titles("https://en.wikipedia.org", "Acme", titles);
        let names: Vec<_> = candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(names, vec!["Acme Corp", "Widgets Inc", "Gadgets Ltd"]);
    }

    #[test]
    fn candidate_urls_use_underscored_titles() {
        let candidates = candidates_from_titles(
            "https://en.wikipedia.org",
            "Acme",
            vec!["Acme Corp".to_string()],
        );
        assert_eq!(
            candidates[0].url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Acme_Corp")
        );
        assert_eq!(candidates[0].slug, "acme-corp");
    }
}
