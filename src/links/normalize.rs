// src/links/normalize.rs
// =============================================================================
// This module turns raw href values into canonical absolute URLs.
//
// Only three href shapes are accepted:
// - Absolute:         "https://other.com/page" -> kept exactly as written
// - Scheme-relative:  "//cdn.example.com/x"    -> page scheme + href
// - Root-relative:    "/docs"                  -> page scheme://host + href
//
// Everything else ("#section", "javascript:...", "about.html", "") is
// rejected and never reaches the frontier.
//
// Relative links are resolved against the page's parsed authority (host and
// explicit port), never by chopping up the URL text.
// =============================================================================

use crate::error::{HarvestError, Result};
use url::Url;

/// The canonical URL of the page whose links are being resolved
///
/// Built once per page and dropped after its links are extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    url: Url,
}

impl PageContext {
    /// Parses a page URL taken from the seed list or the frontier
    ///
    /// An input without a scheme ("example.com/about") defaults to https.
    /// Only http/https URLs with a host are usable as pages.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(invalid(raw, "empty URL"));
        }

        let candidate = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{}", raw)
        };

        let url = Url::parse(&candidate).map_err(|e| invalid(raw, &e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(raw, &format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid(raw, "URL has no host"));
        }

        Ok(Self { url })
    }

    /// The parsed page URL, used as the fetch target
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// "scheme://host[:port]" of the page, with no trailing slash
    fn origin(&self) -> String {
        // host_str() is checked in parse(), so this never falls back in practice
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{}://{}:{}", self.url.scheme(), host, port),
            None => format!("{}://{}", self.url.scheme(), host),
        }
    }
}

fn invalid(url: &str, reason: &str) -> HarvestError {
    HarvestError::InvalidPageUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

// Resolves a raw href against the page it was found on
//
// Parameters:
//   page: the page the href was extracted from
//   href: the raw attribute value
//
// Returns: Some(canonical_url) or None if the href is rejected
//
// Examples (page = "https://example.com/blog/post"):
//   "https://other.com/q" -> Some("https://other.com/q")
//   "/about"              -> Some("https://example.com/about")
//   "//cdn.example.com/a" -> Some("https://cdn.example.com/a")
//   "#top"                -> None
//   "contact.html"        -> None
pub fn normalize(page: &PageContext, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    if let Some(rest) = href.strip_prefix("//") {
        // "//" alone or "///path" carries no authority to resolve to
        if rest.is_empty() || rest.starts_with('/') {
            return None;
        }
        return Some(format!("{}:{}", page.url.scheme(), href));
    }

    if href.starts_with('/') {
        return Some(format!("{}{}", page.origin(), href));
    }

    None
}
