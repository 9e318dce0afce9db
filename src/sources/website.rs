//! Arbitrary-URL content extractor.
//!
//! Fetches user-supplied reference URLs and classifies the extracted text
//! with a small ordered set of case-insensitive keyword rules. Best-effort
//! heuristics, not a guarantee: a page that never mentions its values or
//! history contributes nothing.

use crate::tools::web::WebAccess;
use crate::utils::text::truncate_chars;

const VALUES_CHARS: usize = 2000;
const HISTORY_CHARS: usize = 2500;

/// Insights derived from reference URLs; each key present only when
/// derivable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UrlInsights {
    pub values: Option<String>,
    pub history: Option<String>,
}

/// Extract values/history insights from a batch of reference URLs. An empty
/// batch returns immediately without touching the network; a failed fetch or
/// empty extraction is silently skipped, never fatal to the batch.
pub async fn extract_from_urls(web: &dyn WebAccess, urls: &[String]) -> UrlInsights {
    let mut insights = UrlInsights::default();
    if urls.is_empty() {
        return insights;
    }

    for url in urls {
        let text = match web.extract(url).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(url, error = %e, "skipping reference URL");
                continue;
            }
        };
        classify(&text, &mut insights);
    }

    insights
}

fn classify(text: &str, insights: &mut UrlInsights) {
    let lower = text.to_lowercase();

    if (lower.contains("our values") || lower.contains("company values"))
        && insights.values.is_none()
    {
        insights.values = Some(truncate_chars(text, VALUES_CHARS));
    }

    // Mission/vision text is additive: appended to whatever values text we
    // already have rather than claiming its own slot.
    if lower.contains("mission") || lower.contains("vision") || lower.contains("purpose") {
        let prev = insights.values.take().unwrap_or_default();
        let combined = format!("{}\n\n{}", prev, truncate_chars(text, VALUES_CHARS));
        insights.values = Some(combined.trim().to_string());
    }

    if (lower.contains("history") || lower.contains("our story")) && insights.history.is_none() {
        insights.history = Some(truncate_chars(text, HISTORY_CHARS));
    }
}
