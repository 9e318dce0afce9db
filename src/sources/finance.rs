//! Financial/revenue estimator.
//!
//! Ticker inference is deliberately conservative to avoid wrong matches: a
//! candidate built from the initials of a short title, plus the title itself
//! when it already looks like a symbol. The first ticker whose statements
//! yield a revenue line wins; every lookup error is swallowed and the next
//! candidate tried.

use crate::types::{CompanyOverview, Result};
use crate::utils::http::Fetcher;
use crate::utils::text::group_thousands;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

const REVENUE_SERIES: &str = "annualTotalRevenue";
const REQUESTED_SERIES: &str = "annualTotalRevenue,annualOperatingRevenue";

pub struct RevenueEstimator {
    base: String,
    fetcher: Fetcher,
}

impl RevenueEstimator {
    pub fn new(base: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            base: base.into(),
            fetcher,
        }
    }

    /// Estimate the latest annual revenue for a company. The overview is
    /// accepted for context only; ticker inference is title-driven for now.
    /// Returns `None` when no candidate ticker yields a revenue figure.
    pub async fn estimate_revenue(
        &self,
        title: &str,
        _overview: &CompanyOverview,
    ) -> Option<String> {
        for ticker in candidate_tickers(title) {
            match self.latest_annual_revenue(&ticker).await {
                Ok(Some(latest)) => return Some(format_revenue(latest)),
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!(%ticker, error = %e, "ticker lookup failed");
                    continue;
                }
            }
        }
        None
    }

    async fn latest_annual_revenue(&self, ticker: &str) -> Result<Option<f64>> {
        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{}",
            self.base, ticker
        );
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
            .to_string();
        let data = self
            .fetcher
            .fetch_json(
                &url,
                &[
                    ("type", REQUESTED_SERIES),
                    ("period1", "0"),
                    ("period2", &now),
                ],
            )
            .await?;
        Ok(revenue_from_timeseries(&data))
    }
}

/// Conservative candidate tickers, in trial order.
fn candidate_tickers(title: &str) -> Vec<String> {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut candidates = Vec::new();
    if !tokens.is_empty() && tokens.len() <= 3 {
        let sym: String = tokens
            .iter()
            .filter_map(|t| t.chars().next())
            .collect::<String>()
            .to_uppercase();
        if (1..=5).contains(&sym.len()) {
            candidates.push(sym);
        }
    }
    if tokens.len() == 1 && (1..=5).contains(&tokens[0].len()) {
        candidates.push(tokens[0].to_uppercase());
    }
    candidates
}

/// Pick the "Total Revenue" series when present, otherwise the first series
/// with data, and return its most recent reported value.
fn revenue_from_timeseries(data: &Value) -> Option<f64> {
    let results = data["timeseries"]["result"].as_array()?;

    let mut chosen: Option<&Vec<Value>> = None;
    for entry in results {
        let Some(kind) = entry["meta"]["type"][0].as_str() else {
            continue;
        };
        let Some(points) = entry[kind].as_array() else {
            continue;
        };
        if points.is_empty() {
            continue;
        }
        if kind == REVENUE_SERIES {
            chosen = Some(points);
            break;
        }
        if chosen.is_none() {
            chosen = Some(points);
        }
    }

    // Periods are ordered oldest-first; null entries appear for missing years.
    chosen?
        .iter()
        .rev()
        .find_map(|p| p["reportedValue"]["raw"].as_f64())
}

fn format_revenue(latest: f64) -> String {
    if latest >= 1e9 {
        format!("~${:.1}B (est.)", latest / 1e9)
    } else if latest >= 1e6 {
        format!("~${:.0}M (est.)", latest / 1e6)
    } else {
        format!("~${} (est.)", group_thousands(latest.round() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("International Business Machines", vec!["IBM"])]
    #[case("Acme Corp", vec!["AC"])]
    #[case("Tesla", vec!["T", "TESLA"])]
    #[case("Ford", vec!["F", "FORD"])]
    #[case("A Very Long Company Name Incorporated", Vec::<&str>::new())]
    fn ticker_inference(#[case] title: &str, #[case] expected: Vec<&str>) {
        assert_eq!(candidate_tickers(title), expected);
    }

    #[test]
    fn billions_branch_starts_at_exactly_1e9() {
        assert_eq!(format_revenue(1_000_000_000.0), "~$1.0B (est.)");
        assert_eq!(format_revenue(12_340_000_000.0), "~$12.3B (est.)");
    }

    #[test]
    fn just_under_a_billion_uses_millions_branch() {
        assert_eq!(format_revenue(999_999_999.0), "~$1000M (est.)");
        assert_eq!(format_revenue(250_000_000.0), "~$250M (est.)");
    }

    #[test]
    fn small_values_are_thousands_separated() {
        assert_eq!(format_revenue(123_456.0), "~$123,456 (est.)");
    }

    #[test]
    fn total_revenue_series_preferred_over_first_series() {
        let data = json!({
            "timeseries": {
                "result": [
                    {
                        "meta": {"type": ["annualOperatingRevenue"]},
                        "annualOperatingRevenue": [
                            {"reportedValue": {"raw": 1.0}}
                        ]
                    },
                    {
                        "meta": {"type": ["annualTotalRevenue"]},
                        "annualTotalRevenue": [
                            {"reportedValue": {"raw": 2_000_000_000.0}},
                            {"reportedValue": {"raw": 3_000_000_000.0}}
                        ]
                    }
                ]
            }
        });
        assert_eq!(revenue_from_timeseries(&data), Some(3_000_000_000.0));
    }

    #[test]
    fn falls_back_to_first_available_series() {
        let data = json!({
            "timeseries": {
                "result": [
                    {
                        "meta": {"type": ["annualOperatingRevenue"]},
                        "annualOperatingRevenue": [
                            {"reportedValue": {"raw": 5_500_000.0}}
                        ]
                    }
                ]
            }
        });
        assert_eq!(revenue_from_timeseries(&data), Some(5_500_000.0));
    }

    #[test]
    fn trailing_nulls_are_skipped() {
        let data = json!({
            "timeseries": {
                "result": [
                    {
                        "meta": {"type": ["annualTotalRevenue"]},
                        "annualTotalRevenue": [
                            {"reportedValue": {"raw": 7_000_000.0}},
                            null
                        ]
                    }
                ]
            }
        });
        assert_eq!(revenue_from_timeseries(&data), Some(7_000_000.0));
    }

    #[test]
    fn empty_timeseries_yields_nothing() {
        assert_eq!(revenue_from_timeseries(&json!({"timeseries": {"result": []}})), None);
        assert_eq!(revenue_from_timeseries(&json!({})), None);
    }
}
