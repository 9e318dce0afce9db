//! Report assembly orchestration.
//!
//! Either delegates wholesale to the language-model synthesizer (when a
//! model provider is configured and produces a result) or runs the
//! rule-based fallback: encyclopedic overview first, then the four
//! independent enrichment adapters dispatched concurrently, merged into a
//! fixed, deterministic section order. A failing or absent individual
//! source never aborts assembly - its sections are simply omitted.

use crate::llm::OpenAIClient;
use crate::sources::finance::RevenueEstimator;
use crate::sources::news::NewsClient;
use crate::sources::synth::ReportSynthesizer;
use crate::sources::reviews;
use crate::sources::website::{self, UrlInsights};
use crate::sources::wikipedia::WikipediaClient;
use crate::tools::web::{DaedraWeb, WebAccess};
use crate::types::{CompanyOverview, ReportDocument, ReportSection, Result};
use crate::utils::config::{Config, NewsConfig, SynthesisConfig};
use crate::utils::http::Fetcher;
use std::collections::HashMap;
use std::sync::Arc;

pub struct ReportAssembler {
    wikipedia: WikipediaClient,
    finance: RevenueEstimator,
    news: Option<NewsClient>,
    web: Arc<dyn WebAccess>,
    synthesizer: Option<ReportSynthesizer>,
}

impl ReportAssembler {
    pub fn new(
        wikipedia: WikipediaClient,
        finance: RevenueEstimator,
        news: Option<NewsClient>,
        web: Arc<dyn WebAccess>,
        synthesizer: Option<ReportSynthesizer>,
    ) -> Self {
        Self {
            wikipedia,
            finance,
            news,
            web,
            synthesizer,
        }
    }

    /// Wire up all adapters from configuration. Absent credentials map to
    /// absent components, never to runtime null checks inside adapters.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new()?;
        let web: Arc<dyn WebAccess> = Arc::new(DaedraWeb::new());

        let wikipedia = WikipediaClient::new(&config.sources.wikipedia_base, fetcher.clone());
        let finance = RevenueEstimator::new(&config.sources.finance_base, fetcher.clone());

        let news = match &config.sources.news {
            NewsConfig::Enabled { api_base, api_key } => {
                Some(NewsClient::new(api_base, api_key, fetcher))
            }
            NewsConfig::Disabled => None,
        };

        let synthesizer = match &config.synthesis {
            SynthesisConfig::OpenAi {
                api_key,
                api_base,
                model,
            } => Some(ReportSynthesizer::new(
                Arc::new(OpenAIClient::new(
                    api_key.clone(),
                    api_base.clone(),
                    model.clone(),
                )),
                web.clone(),
            )),
            SynthesisConfig::Disabled => None,
        };

        Ok(Self::new(wikipedia, finance, news, web, synthesizer))
    }

    /// Assemble one report. Adapter-level failures are absorbed; this call
    /// itself does not fail (resolver-level "no such company" is surfaced
    /// upstream, before assembly is invoked).
    pub async fn assemble(
        &self,
        title: &str,
        expected_pages: u32,
        interests: Option<&str>,
        reference_urls: &[String],
    ) -> ReportDocument {
        // Prefer model synthesis when available
        if let Some(synth) = &self.synthesizer {
            if let Some(doc) = synth
                .build(title, expected_pages, interests, reference_urls)
                .await
            {
                return doc;
            }
            tracing::debug!(company = title, "synthesis unavailable; using rule-based assembly");
        }

        // Fallback path using public sources without the model. The
        // overview anchors citations; the four enrichments are independent
        // and run concurrently.
        let overview = self.wikipedia.company_overview(title).await;

        let (url_insights, revenue, outlook, review_summary) = tokio::join!(
            website::extract_from_urls(self.web.as_ref(), reference_urls),
            self.finance.estimate_revenue(title, &overview),
            self.recent_news(title),
            reviews::summarize_public_reviews(self.web.as_ref(), title),
        );

        merge_report(
            overview,
            url_insights,
            revenue,
            outlook,
            review_summary,
            expected_pages,
            interests,
        )
    }

    async fn recent_news(&self, title: &str) -> Option<String> {
        match &self.news {
            Some(client) => client.summarize_recent_news(title).await,
            None => None,
        }
    }
}

fn bulleted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_section(sections: &mut Vec<ReportSection>, title: &str, content: &str, sources: &[String]) {
    let content = content.trim();
    if content.is_empty() {
        return;
    }
    sections.push(ReportSection {
        title: title.to_string(),
        content: content.to_string(),
        sources: sources.to_vec(),
    });
}

/// Deterministic merge of all partial source outputs into the fixed reading
/// order. Empty-content sections are never emitted.
fn merge_report(
    overview: CompanyOverview,
    url_insights: UrlInsights,
    revenue: Option<String>,
    outlook: Option<String>,
    review_summary: Option<String>,
    expected_pages: u32,
    interests: Option<&str>,
) -> ReportDocument {
    let mut sections: Vec<ReportSection> = Vec::new();

    if let Some(summary) = &overview.summary {
        push_section(&mut sections, "Executive Summary", summary, &overview.sources);
    }

    let history = overview
        .history
        .clone()
        .or_else(|| url_insights.history.clone())
        .unwrap_or_default();
    push_section(&mut sections, "Brief History", &history, &overview.sources);

    let mut strategy = overview.strategy.clone().unwrap_or_default();
    if let Some(outlook) = &outlook {
        strategy = format!("{strategy}\n\n{outlook}").trim().to_string();
    }
    push_section(
        &mut sections,
        "Strategy and Outlook",
        &strategy,
        &overview.sources,
    );

    let mut products_text = bulleted(&overview.products);
    if let Some(revenue) = &revenue {
        products_text = format!("{products_text}\n\nEstimated revenue: {revenue}");
    }
    push_section(
        &mut sections,
        "Key Products and Revenue Streams",
        &products_text,
        &overview.sources,
    );

    let mut peers_text = bulleted(&overview.peers);
    if let Some(diff) = &overview.differentiation {
        peers_text = format!("{peers_text}\n\nDifferentiation: {diff}");
    }
    push_section(
        &mut sections,
        "Peers and Competitive Positioning",
        &peers_text,
        &overview.sources,
    );

    // URL-extracted values take precedence over the overview's
    let values = url_insights
        .values
        .clone()
        .or_else(|| overview.values.clone())
        .unwrap_or_default();
    push_section(
        &mut sections,
        "Values and Culture",
        &values,
        &overview.sources,
    );

    if let Some(review_summary) = &review_summary {
        push_section(
            &mut sections,
            "Employee Reviews (Public)",
            review_summary,
            &overview.sources,
        );
    }

    if let Some(interests) = interests {
        // attributed to no source
        push_section(&mut sections, "Topics of Interest (User)", interests, &[]);
    }

    ReportDocument {
        title: overview.title,
        slug: Some(overview.slug),
        logo_url: overview.logo_url,
        location: overview.location,
        industry: overview.industry,
        founded: overview.founded,
        employees: overview.employees,
        website: overview.website,
        leaders: overview.leaders,
        products: overview.products,
        revenue,
        sections,
        peers: overview.peers,
        differentiation: overview.differentiation,
        references: overview.sources,
        meta: HashMap::from([(
            "expected_pages".to_string(),
            serde_json::json!(expected_pages),
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_overview() -> CompanyOverview {
        CompanyOverview {
            title: "Acme Corp".to_string(),
            slug: "acme-corp".to_string(),
            sources: vec!["https://en.wikipedia.org/wiki/Acme_Corp".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn bare_overview_produces_zero_sections() {
        let doc = merge_report(
            bare_overview(),
            UrlInsights::default(),
            None,
            None,
            None,
            4,
            None,
        );
        assert!(doc.sections.is_empty());
        assert_eq!(
            doc.references,
            vec!["https://en.wikipedia.org/wiki/Acme_Corp"]
        );
        assert_eq!(doc.slug.as_deref(), Some("acme-corp"));
        assert_eq!(doc.meta["expected_pages"], 4);
    }

    #[test]
    fn interests_become_an_unsourced_trailing_section() {
        let doc = merge_report(
            bare_overview(),
            UrlInsights::default(),
            None,
            None,
            None,
            4,
            Some("  supply chain risk  "),
        );
        assert_eq!(doc.sections.len(), 1);
        let section = &doc.sections[0];
        assert_eq!(section.title, "Topics of Interest (User)");
        assert_eq!(section.content, "supply chain risk");
        assert!(section.sources.is_empty());
    }

    #[test]
    fn whitespace_interests_are_not_a_section() {
        let doc = merge_report(
            bare_overview(),
            UrlInsights::default(),
            None,
            None,
            None,
            4,
            Some("   "),
        );
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn section_order_is_fixed() {
        let mut overview = bare_overview();
        overview.summary = Some("Acme makes widgets.".to_string());
        overview.history = Some("Founded in 1947.".to_string());
        overview.strategy = Some("Expand east.".to_string());
        overview.products = vec!["Anvils".to_string()];
        overview.peers = vec!["Widgets Inc".to_string()];
        overview.values = Some("Integrity.".to_string());

        let doc = merge_report(
            overview,
            UrlInsights::default(),
            Some("~$1.0B (est.)".to_string()),
            Some("Recent news...".to_string()),
            Some("Reviews...".to_string()),
            4,
            Some("pricing"),
        );

        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Executive Summary",
                "Brief History",
                "Strategy and Outlook",
                "Key Products and Revenue Streams",
                "Peers and Competitive Positioning",
                "Values and Culture",
                "Employee Reviews (Public)",
                "Topics of Interest (User)",
            ]
        );
    }

    #[test]
    fn url_extracted_values_take_precedence() {
        let mut overview = bare_overview();
        overview.values = Some("overview values".to_string());
        let insights = UrlInsights {
            values: Some("url-extracted values".to_string()),
            history: None,
        };

        let doc = merge_report(overview, insights, None, None, None, 4, None);
        let values = doc
            .sections
            .iter()
            .find(|s| s.title == "Values and Culture")
            .unwrap();
        assert_eq!(values.content, "url-extracted values");
    }

    #[test]
    fn url_extracted_history_is_a_fallback_only() {
        let mut overview = bare_overview();
        overview.history = Some("overview history".to_string());
        let insights = UrlInsights {
            values: None,
            history: Some("url history".to_string()),
        };

        let doc = merge_report(overview, insights, None, None, None, 4, None);
        let history = doc
            .sections
            .iter()
            .find(|s| s.title == "Brief History")
            .unwrap();
        assert_eq!(history.content, "overview history");
    }

    #[test]
    fn strategy_concatenates_overview_and_outlook() {
        let mut overview = bare_overview();
        overview.strategy = Some("Expand east.".to_string());

        let doc = merge_report(
            overview,
            UrlInsights::default(),
            None,
            Some("News outlook.".to_string()),
            None,
            4,
            None,
        );
        let strategy = doc
            .sections
            .iter()
            .find(|s| s.title == "Strategy and Outlook")
            .unwrap();
        assert_eq!(strategy.content, "Expand east.\n\nNews outlook.");
    }

    #[test]
    fn revenue_alone_still_produces_products_section() {
        let doc = merge_report(
            bare_overview(),
            UrlInsights::default(),
            Some("~$250M (est.)".to_string()),
            None,
            None,
            4,
            None,
        );
        let products = doc
            .sections
            .iter()
            .find(|s| s.title == "Key Products and Revenue Streams")
            .unwrap();
        assert_eq!(products.content, "Estimated revenue: ~$250M (est.)");
        assert_eq!(doc.revenue.as_deref(), Some("~$250M (est.)"));
    }

    #[test]
    fn every_sourced_section_inherits_overview_sources() {
        let mut overview = bare_overview();
        overview.summary = Some("Summary.".to_string());
        overview.values = Some("Values.".to_string());

        let doc = merge_report(
            overview,
            UrlInsights::default(),
            None,
            None,
            None,
            4,
            Some("pricing"),
        );
        for section in &doc.sections {
            if section.title == "Topics of Interest (User)" {
                assert!(section.sources.is_empty());
            } else {
                assert_eq!(
                    section.sources,
                    vec!["https://en.wikipedia.org/wiki/Acme_Corp"]
                );
            }
        }
    }
}
