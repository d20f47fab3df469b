// src/crawl/mod.rs
// =============================================================================
// This module runs the depth-bounded crawl.
//
// Submodules:
// - fetch: PageFetcher trait and the reqwest-backed HttpFetcher
// - frontier: FrontierStore trait and the file-backed FileFrontier
// - driver: the iteration loop tying fetch -> links -> store together
// - report: per-iteration results and per-page failures
// =============================================================================

mod driver;
mod fetch;
mod frontier;
mod report;

pub use driver::{harvest, CrawlOptions, FrontierPolicy};
pub use fetch::HttpFetcher;
pub use frontier::{summarize, FileFrontier, FrontierStore, FrontierSummary};
pub use report::CrawlReport;
