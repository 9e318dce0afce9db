//! Encyclopedic overview adapter: page summary plus structured infobox facts.
//!
//! The infobox (the key/value table embedded in the page markup) is the
//! primary source of precise facts: industry, headquarters, founding date,
//! employee count, website, logo. Lookup first tries the exact title, then
//! falls back to the top auto-suggested match; if both fail the adapter
//! still produces an overview from the original title and a best-guess
//! canonical URL.

use crate::resolve::{canonical_page_url, slugify};
use crate::types::{AppError, CompanyOverview, Result};
use crate::utils::http::Fetcher;
use scraper::{Html, Selector};
use std::collections::HashMap;

const MAX_LEADERS: usize = 10;
const MAX_PRODUCTS: usize = 12;

const LEADER_KEYS: &[&str] = &["key people", "founders", "founder", "owner"];
const PRODUCT_KEYS: &[&str] = &["products", "services"];
const INDUSTRY_KEYS: &[&str] = &["industry", "type", "genre"];
const LOCATION_KEYS: &[&str] = &[
    "headquarters",
    "headquarters location",
    "based in",
    "located in",
];

/// Resolved page identity: canonical title, summary text, canonical URL.
#[derive(Debug, Clone)]
struct PageInfo {
    title: String,
    summary: Option<String>,
    url: Option<String>,
}

/// Parsed infobox: lowercased header keys mapped to flattened cell text,
/// plus the website link href and logo image URL when present.
#[derive(Debug, Default)]
struct Infobox {
    fields: HashMap<String, String>,
    website_url: Option<String>,
    logo_url: Option<String>,
}

pub struct WikipediaClient {
    base: String,
    fetcher: Fetcher,
}

impl WikipediaClient {
    pub fn new(base: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            base: base.into(),
            fetcher,
        }
    }

    /// Produce a fully-populated overview for `title`. Never fails: missing
    /// pages or a malformed infobox leave the corresponding fields absent.
    pub async fn company_overview(&self, title: &str) -> CompanyOverview {
        let page = match self.page_summary(title).await {
            Ok(page) => Some(page),
            // exact lookup failed; retry with auto-suggest
            Err(_) => match self.suggested_page_summary(title).await {
                Ok(page) => Some(page),
                Err(e) => {
                    tracing::debug!(title, error = %e, "no encyclopedia page found");
                    None
                }
            },
        };

        let infobox = match self.fetch_infobox(title).await {
            Ok(infobox) => infobox,
            Err(e) => {
                tracing::debug!(title, error = %e, "infobox fetch failed");
                Infobox::default()
            }
        };

        overview_from_parts(&self.base, title, page, infobox)
    }

    async fn page_summary(&self, title: &str) -> Result<PageInfo> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base,
            title.replace(' ', "_")
        );
        let data = self.fetcher.fetch_json(&url, &[]).await?;

        let resolved = data["title"]
            .as_str()
            .filter(|t| !t.is_empty())
            .unwrap_or(title)
            .to_string();
        Ok(PageInfo {
            title: resolved,
            summary: data["extract"]
                .as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            url: data["content_urls"]["desktop"]["page"]
                .as_str()
                .map(str::to_string),
        })
    }

    async fn suggested_page_summary(&self, title: &str) -> Result<PageInfo> {
        let url = format!("{}/w/api.php", self.base);
        let data = self
            .fetcher
            .fetch_json(
                &url,
                &[
                    ("action", "query"),
                    ("list", "search"),
                    ("srsearch", title),
                    ("srlimit", "1"),
                    ("format", "json"),
                ],
            )
            .await?;

        let suggested = data["query"]["search"][0]["title"]
            .as_str()
            .ok_or_else(|| AppError::Http(format!("No suggestion for '{title}'")))?
            .to_string();
        self.page_summary(&suggested).await
    }

    async fn fetch_infobox(&self, title: &str) -> Result<Infobox> {
        let html = self
            .fetcher
            .fetch_text(&canonical_page_url(&self.base, title))
            .await?;
        Ok(parse_infobox(&html))
    }
}

fn parse_infobox(html: &str) -> Infobox {
    // Static selectors; parse failures here would be programming errors,
    // so fall back to an empty infobox instead of panicking.
    let (Ok(table_sel), Ok(row_sel), Ok(th_sel), Ok(td_sel), Ok(link_sel), Ok(img_sel)) = (
        Selector::parse("table.infobox.vcard, table.infobox"),
        Selector::parse("tr"),
        Selector::parse("th"),
        Selector::parse("td"),
        Selector::parse("a"),
        Selector::parse("img"),
    ) else {
        return Infobox::default();
    };

    let doc = Html::parse_document(html);
    let mut infobox = Infobox::default();
    let Some(table) = doc.select(&table_sel).next() else {
        return infobox;
    };

    for row in table.select(&row_sel) {
        let (Some(header), Some(cell)) = (
            row.select(&th_sel).next(),
            row.select(&td_sel).next(),
        ) else {
            continue;
        };

        let key = flatten_text(header.text()).to_lowercase();
        let val = flatten_text(cell.text());
        if key.is_empty() {
            continue;
        }

        if key == "website" {
            if let Some(href) = cell
                .select(&link_sel)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| href.starts_with("http"))
            {
                infobox.website_url = Some(href.to_string());
            }
        }
        if key == "logo" {
            if let Some(src) = cell.select(&img_sel).filter_map(|i| i.value().attr("src")).next() {
                infobox.logo_url = Some(if src.starts_with("//") {
                    format!("https:{src}")
                } else {
                    src.to_string()
                });
            }
        }

        infobox.fields.insert(key, val);
    }

    infobox
}

/// Join text nodes with single spaces, collapsing surrounding whitespace.
fn flatten_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First-match-wins lookup across a synonym key set.
fn first_match<'a>(fields: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|k| fields.get(*k))
        .map(String::as_str)
}

/// Split a multi-valued infobox cell on commas/newlines, trim, drop empties.
fn split_multi(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deduplicate (case-sensitive, first-seen order) and cap.
fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(cap)
        .collect()
}

fn overview_from_parts(
    base: &str,
    input_title: &str,
    page: Option<PageInfo>,
    infobox: Infobox,
) -> CompanyOverview {
    let url = page
        .as_ref()
        .and_then(|p| p.url.clone())
        .unwrap_or_else(|| canonical_page_url(base, input_title));
    let title = page
        .as_ref()
        .map(|p| p.title.clone())
        .unwrap_or_else(|| input_title.to_string());

    let leaders = first_match(&infobox.fields, LEADER_KEYS)
        .map(split_multi)
        .unwrap_or_default();
    let products = first_match(&infobox.fields, PRODUCT_KEYS)
        .map(split_multi)
        .unwrap_or_default();

    CompanyOverview {
        slug: slugify(&title),
        title,
        summary: page.and_then(|p| p.summary),
        history: None,
        leaders: dedup_capped(leaders, MAX_LEADERS),
        products: dedup_capped(products, MAX_PRODUCTS),
        industry: first_match(&infobox.fields, INDUSTRY_KEYS).map(str::to_string),
        location: first_match(&infobox.fields, LOCATION_KEYS).map(str::to_string),
        founded: infobox.fields.get("founded").cloned(),
        employees: infobox.fields.get("number of employees").cloned(),
        website: infobox
            .website_url
            .or_else(|| infobox.fields.get("website").cloned()),
        logo_url: infobox.logo_url,
        strategy: None,
        peers: Vec::new(),
        differentiation: None,
        values: None,
        sources: vec![url],
    }
}
