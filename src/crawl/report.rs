// src/crawl/report.rs
// =============================================================================
// What happened during a run, iteration by iteration.
//
// Per-page failures never stop a crawl, so this is where they end up instead:
// the driver fills one IterationReport per pass and main.rs prints the lot
// as a table or as JSON.
// =============================================================================

use crate::error::HarvestError;
use serde::Serialize;

/// A page that was skipped, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    pub url: String,
    /// "invalid_page_url", "fetch" or "extraction"
    pub kind: String,
    pub message: String,
}

impl PageFailure {
    pub fn new(url: &str, error: &HarvestError) -> Self {
        Self {
            url: url.to_string(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IterationReport {
    pub iteration: usize,
    /// Size of the input set for this iteration
    pub pages_attempted: usize,
    pub pages_succeeded: usize,
    /// Entries appended to the frontier store during this iteration
    pub links_recorded: usize,
    pub failures: Vec<PageFailure>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub depth: usize,
    pub iterations: Vec<IterationReport>,
}

impl CrawlReport {
    pub fn pages_fetched(&self) -> usize {
        self.iterations.iter().map(|it| it.pages_succeeded).sum()
    }

    pub fn links_recorded(&self) -> usize {
        self.iterations.iter().map(|it| it.links_recorded).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &PageFailure> {
        self.iterations.iter().flat_map(|it| it.failures.iter())
    }
}
