// src/crawl/fetch.rs
// =============================================================================
// Page fetching.
//
// The driver only needs "give me the bytes behind this URL, or tell me why
// not", so that is all the PageFetcher trait promises. HttpFetcher is the
// real implementation on top of reqwest; tests plug in canned pages.
// =============================================================================

use crate::error::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its raw body
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Fetches pages over HTTP(S) with a shared, pooled client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher with a per-request timeout
    //
    // Redirects are followed up to 5 hops, same as a browser would for
    // ordinary navigation.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HarvestError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let fetch_error = |reason: String| HarvestError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(describe_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status.as_u16())));
        }

        // A missing Content-Type is given the benefit of the doubt
        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !is_html(content_type) {
                return Err(fetch_error(format!("not an HTML page ({})", content_type)));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(describe_error(&e)))?;

        Ok(body.to_vec())
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

// Turns a reqwest error into a short human-readable reason
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}
