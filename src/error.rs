// src/error.rs
// =============================================================================
// Error types for the harvester.
//
// Two families of errors exist:
// - Fatal ones (bad configuration, frontier store unavailable) abort the run
// - Per-page ones (bad page URL, fetch failure, unparsable content) are
//   recorded in the crawl report and the iteration moves on
//
// A href that cannot be resolved is NOT an error at all: the normalizer
// simply returns None for it.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crawl engine
pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// Missing or invalid seed list / depth value
    #[error("configuration error: {0}")]
    Config(String),

    /// A page URL that cannot serve as a base for link resolution
    #[error("invalid page URL '{url}': {reason}")]
    InvalidPageUrl { url: String, reason: String },

    /// Network or transport failure, bad status, or non-HTML response
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Page content that could not be parsed for links
    #[error("failed to extract links from {url}: {reason}")]
    Extraction { url: String, reason: String },

    /// Frontier persistence failed
    #[error("frontier store error at {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarvestError {
    /// Fatal errors abort the whole run; everything else only skips one page
    pub fn is_fatal(&self) -> bool {
        matches!(self, HarvestError::Config(_) | HarvestError::Store { .. })
    }

    /// Short machine-readable name used in the crawl report
    pub fn kind(&self) -> &'static str {
        match self {
            HarvestError::Config(_) => "config",
            HarvestError::InvalidPageUrl { .. } => "invalid_page_url",
            HarvestError::Fetch { .. } => "fetch",
            HarvestError::Extraction { .. } => "extraction",
            HarvestError::Store { .. } => "store",
        }
    }
}
