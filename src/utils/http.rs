//! Generic text/JSON retrieval with bounded retry and exponential backoff.
//!
//! Text fetches retry transient failures (transport errors, 5xx) up to
//! three attempts with exponential backoff, base 0.5s, capped at 6s.
//! Non-retryable failures (4xx responses) fail immediately.

use crate::types::{AppError, Result};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_millis(500);
const BACKOFF_CAP: Duration = Duration::from_secs(6);

enum FetchFailure {
    Transient(AppError),
    Fatal(AppError),
}

/// Thin wrapper around a shared `reqwest` client. Cloning is cheap; the
/// underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch a text body, retrying transient failures.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let mut delay = BACKOFF_BASE;
        let mut last_err: Option<AppError> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch_text(url).await {
                Ok(body) => return Ok(body),
                Err(FetchFailure::Fatal(e)) => return Err(e),
                Err(FetchFailure::Transient(e)) => {
                    tracing::debug!(url, attempt, error = %e, "transient fetch failure");
                    last_err = Some(e);
                }
            }
            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(BACKOFF_CAP);
            }
        }

        Err(last_err.unwrap_or_else(|| AppError::Http(format!("Retry budget exhausted for {url}"))))
    }

    async fn try_fetch_text(&self, url: &str) -> std::result::Result<String, FetchFailure> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transient(AppError::Http(format!("{e} for {url}"))))?;

        let status = resp.status();
        if status.is_server_error() {
            return Err(FetchFailure::Transient(AppError::Http(format!(
                "HTTP {status} for {url}"
            ))));
        }
        if !status.is_success() {
            return Err(FetchFailure::Fatal(AppError::Http(format!(
                "HTTP {status} for {url}"
            ))));
        }

        resp.text()
            .await
            .map_err(|e| FetchFailure::Transient(AppError::Http(format!("{e} for {url}"))))
    }

    /// Fetch and decode a JSON body. Single attempt; a malformed response is
    /// not retryable.
    pub async fn fetch_json(&self, url: &str, query: &[(&str, &str)]) -> Result<serde_json::Value> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("{e} for {url}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Http(format!("HTTP {status} for {url}")));
        }

        resp.json()
            .await
            .map_err(|e| AppError::Http(format!("Invalid JSON from {url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_text_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let body = fetcher
            .fetch_text(&format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn fetch_text_does_not_retry_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let err = fetcher
            .fetch_text(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }

    #[tokio::test]
    async fn fetch_text_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let err = fetcher
            .fetch_text(&format!("{}/flaky", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }

    #[tokio::test]
    async fn fetch_json_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new().unwrap();
        let data = fetcher
            .fetch_json(&format!("{}/data", server.uri()), &[])
            .await
            .unwrap();
        assert_eq!(data["ok"], true);
    }
}
