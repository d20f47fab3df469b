// src/links/dedup.rs
// =============================================================================
// Reduces a page's normalized links to a unique, sorted list.
//
// BTreeSet gives us both properties at once: duplicates collapse on insert
// and iteration comes out in ascending order, so output (and the frontier
// file) is deterministic.
// =============================================================================

use std::collections::BTreeSet;

/// Drops empty strings and duplicates, returns the rest sorted ascending
pub fn dedup<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    urls.into_iter()
        .filter(|url| !url.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_removes_empty_and_duplicates() {
        assert_eq!(dedup(strings(&["b", "a", "a", "", ""])), strings(&["a", "b"]));
    }

    #[test]
    fn test_is_idempotent() {
        let once = dedup(strings(&["https://z.com", "https://a.com/x", "https://a.com/x"]));
        assert_eq!(dedup(once.clone()), once);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup(Vec::new()).is_empty());
        assert!(dedup(strings(&["", ""])).is_empty());
    }
}
