//! Public employee-reviews summarizer.
//!
//! Searches the open web for Glassdoor review pages and stitches together
//! short excerpts. Indicative signal only, and the output says so.

use crate::tools::web::WebAccess;
use crate::utils::text::truncate_chars;

const MAX_RESULTS: usize = 3;
const SNIPPET_CHARS: usize = 600;
const COMBINED_CHARS: usize = 1500;
const REVIEWS_DISCLAIMER: &str =
    "Public reviews (e.g., Glassdoor/Indeed) highlight themes; treat as indicative, not definitive.";

/// Summarize public reviews for a company, or `None` when the search or
/// every page extraction comes up empty. Individual page failures are
/// skipped independently.
pub async fn summarize_public_reviews(web: &dyn WebAccess, title: &str) -> Option<String> {
    let query = format!("{title} Glassdoor reviews");
    let hits = match web.search(&query, MAX_RESULTS).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::debug!(company = title, error = %e, "review search failed");
            Vec::new()
        }
    };

    let mut snippets = Vec::new();
    for hit in hits.iter().take(MAX_RESULTS) {
        if hit.url.is_empty() {
            continue;
        }
        match web.extract(&hit.url).await {
            Ok(text) if !text.is_empty() => snippets.push(truncate_chars(&text, SNIPPET_CHARS)),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(url = %hit.url, error = %e, "skipping review page");
            }
        }
    }

    if snippets.is_empty() {
        return None;
    }

    let combined = snippets.join("\n\n");
    Some(
        format!(
            "{REVIEWS_DISCLAIMER}\n{}",
            truncate_chars(&combined, COMBINED_CHARS)
        )
        .trim()
        .to_string(),
    )
}
