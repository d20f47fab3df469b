// src/links/html.rs
// =============================================================================
// This module pulls raw href values out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Nothing here resolves or filters links; that is the normalizer's job.
// The function just returns every anchor's href, in document order.
// =============================================================================

use super::normalize::PageContext;
use crate::error::{HarvestError, Result};
use scraper::{Html, Selector};

// Extracts the raw href of every <a> element in a page
//
// Parameters:
//   page: the page the body was fetched from (used for error context)
//   body: the raw response bytes
//
// Returns: raw href strings with surrounding whitespace and embedded
//          tabs/newlines removed,
//          or an Extraction error if the body is not valid UTF-8
//
// Example:
//   body = "<a href=' /docs '>Docs</a><a href='#top'>Top</a>"
//   result = ["/docs", "#top"]
pub fn extract_hrefs(page: &PageContext, body: &[u8]) -> Result<Vec<String>> {
    let html = std::str::from_utf8(body).map_err(|e| HarvestError::Extraction {
        url: page.as_str().to_string(),
        reason: format!("page is not valid UTF-8: {}", e),
    })?;

    let selector = Selector::parse("a[href]").map_err(|e| HarvestError::Extraction {
        url: page.as_str().to_string(),
        reason: format!("bad anchor selector: {}", e),
    })?;

    let document = Html::parse_document(html);

    let hrefs = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(clean_href)
        .collect();

    Ok(hrefs)
}

// Trims the ends and drops every tab, CR and LF inside the value,
// the way browsers read URLs wrapped across lines in the source
fn clean_href(href: &str) -> String {
    href.trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect()
}
