// src/links/mod.rs
// =============================================================================
// This module contains the per-page link processing steps.
//
// Submodules:
// - html: Extracts raw href values from an HTML page
// - normalize: Resolves raw hrefs to canonical absolute URLs
// - dedup: Reduces a page's links to a unique, sorted list
//
// harvest_page_links() chains the three together for one fetched page.
// =============================================================================

mod dedup;
mod html;
mod normalize;

pub use dedup::dedup;
pub use html::extract_hrefs;
pub use normalize::{normalize, PageContext};

use crate::error::Result;

// Runs extract -> normalize -> dedup over one fetched page
//
// Returns: the page's unique canonical links, sorted,
//          or an Extraction error if the body could not be parsed
pub fn harvest_page_links(page: &PageContext, body: &[u8]) -> Result<Vec<String>> {
    let hrefs = extract_hrefs(page, body)?;

    let canonical = hrefs.iter().filter_map(|href| {
        let resolved = normalize(page, href);
        if resolved.is_none() {
            tracing::debug!(page = %page.as_str(), href = %href, "rejected href");
        }
        resolved
    });

    Ok(dedup(canonical))
}
