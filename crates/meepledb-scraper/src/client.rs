//! HTTP client for the external scrape service.
//!
//! Wraps `reqwest` with typed error handling. A scrape requests both a
//! markdown rendering and the raw markup, restricted to main content only —
//! the source site serves a generic trending page when it blocks a scraper,
//! and page chrome makes that failure mode harder to detect downstream.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::types::ScrapeResult;

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

/// Client for the scrape service's `/v1/scrape` endpoint.
///
/// Use [`ScrapeClient::new`] for production or
/// [`ScrapeClient::with_base_url`] to point at a mock server in tests.
pub struct ScrapeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 2],
    #[serde(rename = "onlyMainContent")]
    only_main_content: bool,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    data: Option<ScrapePayload>,
    // Some deployments return the payload at the top level instead of
    // under `data`.
    markdown: Option<String>,
    #[serde(rename = "rawHtml")]
    raw_html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapePayload {
    markdown: Option<String>,
    #[serde(rename = "rawHtml")]
    raw_html: Option<String>,
}

impl ScrapeClient {
    /// Creates a new client pointed at the production scrape service.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ScrapeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScrapeError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("meepledb/0.1 (catalog-import)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScrapeError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Scrapes a catalog page, returning its markdown rendering and raw HTML.
    ///
    /// No retries: a failed scrape is surfaced to the caller to retry
    /// manually.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] on any non-2xx response.
    /// - [`ScrapeError::NoContent`] if the response carries no markdown body.
    /// - [`ScrapeError::Http`] on network, TLS, or timeout failure.
    /// - [`ScrapeError::Deserialize`] if the response body is not the
    ///   expected JSON shape.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        let endpoint = self
            .base_url
            .join("v1/scrape")
            .map_err(|e| ScrapeError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let request = ScrapeRequest {
            url,
            formats: ["markdown", "rawHtml"],
            only_main_content: true,
        };

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed: ScrapeResponse =
            serde_json::from_str(&body).map_err(|e| ScrapeError::Deserialize {
                context: format!("scrape({url})"),
                source: e,
            })?;

        let (markdown, raw_html) = match parsed.data {
            Some(payload) => (payload.markdown, payload.raw_html),
            None => (parsed.markdown, parsed.raw_html),
        };

        let markdown = markdown.unwrap_or_default();
        if markdown.trim().is_empty() {
            return Err(ScrapeError::NoContent {
                url: url.to_owned(),
            });
        }

        Ok(ScrapeResult {
            markdown,
            raw_html: raw_html.unwrap_or_default(),
        })
    }
}
