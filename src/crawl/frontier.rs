// src/crawl/frontier.rs
// =============================================================================
// The frontier store: an append-only record of every URL discovered, tagged
// with the iteration that found it.
//
// On disk each entry is one line:
//
//     https://example.com/about (iteration 2)
//
// The tag is metadata only. When the file is read back for the next
// iteration, the tag is split off again so the URL can be fetched.
//
// The store never deduplicates. The same URL found in three iterations shows
// up three times; dedup happens per page, before appending.
// =============================================================================

use crate::error::{HarvestError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// One recorded URL and the iteration that recorded it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    /// None for lines written without a tag (e.g. a seed list used as a store)
    pub iteration: Option<usize>,
}

impl FrontierEntry {
    // Parses one stored line
    //
    // Returns None for blank lines. A trailing "(iteration N)" is split off;
    // anything else is taken as a bare URL.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some((url, tag)) = line.rsplit_once(" (iteration ") {
            if let Some(iteration) = tag.strip_suffix(')').and_then(|n| n.parse().ok()) {
                return Some(Self {
                    url: url.trim_end().to_string(),
                    iteration: Some(iteration),
                });
            }
        }

        Some(Self {
            url: line.to_string(),
            iteration: None,
        })
    }
}

impl fmt::Display for FrontierEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iteration {
            Some(iteration) => write!(f, "{} (iteration {})", self.url, iteration),
            None => write!(f, "{}", self.url),
        }
    }
}

/// Append + full-scan persistence for discovered URLs
///
/// Implementations must keep concurrent `append_iteration` calls from
/// interleaving their entries.
#[async_trait]
pub trait FrontierStore: Send + Sync {
    /// Records entries tagged with `iteration`, after everything already stored
    async fn append_iteration(&self, entries: &[String], iteration: usize) -> Result<()>;

    /// Every entry ever appended, in append order
    async fn load_entries(&self) -> Result<Vec<FrontierEntry>>;

    /// Every URL ever appended, repeats included
    async fn load_all(&self) -> Result<Vec<String>> {
        let entries = self.load_entries().await?;
        Ok(entries.into_iter().map(|entry| entry.url).collect())
    }
}

/// Frontier store backed by a newline-delimited text file
#[derive(Debug)]
pub struct FileFrontier {
    path: PathBuf,
    // Serializes writers so one append never interleaves with another
    write_lock: Mutex<()>,
}

impl FileFrontier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empties the store, creating the file if needed
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.ensure_parent().await?;
        fs::write(&self.path, b"").await.map_err(|e| self.store_error(e))
    }

    async fn ensure_parent(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| self.store_error(e)),
            _ => Ok(()),
        }
    }

    fn store_error(&self, source: std::io::Error) -> HarvestError {
        HarvestError::Store {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl FrontierStore for FileFrontier {
    async fn append_iteration(&self, entries: &[String], iteration: usize) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        // Build the whole block first so it goes out in a single write
        let mut block = String::new();
        for url in entries {
            // A line break inside a URL would split it into two entries
            let url: String = url.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
            if url.trim().is_empty() {
                continue;
            }
            let entry = FrontierEntry {
                url,
                iteration: Some(iteration),
            };
            block.push_str(&entry.to_string());
            block.push('\n');
        }

        let _guard = self.write_lock.lock().await;
        self.ensure_parent().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.store_error(e))?;

        file.write_all(block.as_bytes())
            .await
            .map_err(|e| self.store_error(e))?;
        file.flush().await.map_err(|e| self.store_error(e))
    }

    async fn load_entries(&self) -> Result<Vec<FrontierEntry>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            // No file yet: nothing has been discovered
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.store_error(e)),
        };

        Ok(content.lines().filter_map(FrontierEntry::parse).collect())
    }
}

/// A distinct URL and the earliest iteration that recorded it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontierUrl {
    pub url: String,
    pub first_iteration: Option<usize>,
}

/// Distinct view over a store's raw entries
#[derive(Debug, Clone, Serialize)]
pub struct FrontierSummary {
    pub raw_entries: usize,
    pub distinct_urls: usize,
    pub urls: Vec<FrontierUrl>,
}

// Collapses raw entries into distinct URLs, sorted by URL
//
// Untagged entries only count as the first iteration when no tagged
// entry exists for the same URL.
pub fn summarize(entries: &[FrontierEntry]) -> FrontierSummary {
    let mut first_seen: BTreeMap<&str, Option<usize>> = BTreeMap::new();

    for entry in entries {
        let slot = first_seen.entry(entry.url.as_str()).or_insert(entry.iteration);
        *slot = match (*slot, entry.iteration) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }

    let urls: Vec<FrontierUrl> = first_seen
        .into_iter()
        .map(|(url, first_iteration)| FrontierUrl {
            url: url.to_string(),
            first_iteration,
        })
        .collect();

    FrontierSummary {
        raw_entries: entries.len(),
        distinct_urls: urls.len(),
        urls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_tagged_line() {
        let entry = FrontierEntry::parse("https://example.com/a (iteration 3)").unwrap();
        assert_eq!(entry.url, "https://example.com/a");
        assert_eq!(entry.iteration, Some(3));
    }

    #[test]
    fn test_parse_untagged_and_blank_lines() {
        let entry = FrontierEntry::parse("  https://example.com/a\r").unwrap();
        assert_eq!(entry.url, "https://example.com/a");
        assert_eq!(entry.iteration, None);
        assert_eq!(FrontierEntry::parse("   "), None);
    }

    #[test]
    fn test_malformed_tag_is_kept_as_url() {
        let entry = FrontierEntry::parse("https://example.com/a (iteration x)").unwrap();
        assert_eq!(entry.url, "https://example.com/a (iteration x)");
        assert_eq!(entry.iteration, None);
    }

    #[test]
    fn test_display_matches_file_format() {
        let entry = FrontierEntry {
            url: "https://example.com/".to_string(),
            iteration: Some(1),
        };
        assert_eq!(entry.to_string(), "https://example.com/ (iteration 1)");
    }

    #[test]
    fn test_summarize_keeps_earliest_iteration() {
        let entries: Vec<FrontierEntry> = [
            "https://b.com (iteration 2)",
            "https://a.com (iteration 3)",
            "https://b.com (iteration 1)",
            "https://a.com",
            "https://c.com",
        ]
        .iter()
        .filter_map(|line| FrontierEntry::parse(line))
        .collect();

        let summary = summarize(&entries);
        assert_eq!(summary.raw_entries, 5);
        assert_eq!(summary.distinct_urls, 3);
        assert_eq!(
            summary.urls,
            vec![
                FrontierUrl { url: "https://a.com".into(), first_iteration: Some(3) },
                FrontierUrl { url: "https://b.com".into(), first_iteration: Some(1) },
                FrontierUrl { url: "https://c.com".into(), first_iteration: None },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFrontier::new(dir.path().join("frontier.txt"));
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_appends_are_additive() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFrontier::new(dir.path().join("nested").join("frontier.txt"));

        store.append_iteration(&urls(&["https://a.com", "https://b.com"]), 1).await.unwrap();
        store.append_iteration(&urls(&["https://a.com"]), 2).await.unwrap();
        store.append_iteration(&[], 2).await.unwrap();

        let entries = store.load_entries().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].iteration, Some(2));
        assert_eq!(
            store.load_all().await.unwrap(),
            urls(&["https://a.com", "https://b.com", "https://a.com"])
        );

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            raw,
            "https://a.com (iteration 1)\nhttps://b.com (iteration 1)\nhttps://a.com (iteration 2)\n"
        );
    }

    #[tokio::test]
    async fn test_line_breaks_never_split_an_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFrontier::new(dir.path().join("frontier.txt"));

        store
            .append_iteration(&urls(&["https://x.com/a\nb", "https://y.com/\r\n", "\n"]), 1)
            .await
            .unwrap();

        assert_eq!(
            store.load_all().await.unwrap(),
            urls(&["https://x.com/ab", "https://y.com/"])
        );
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFrontier::new(dir.path().join("frontier.txt"));
        store.append_iteration(&urls(&["https://a.com"]), 1).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileFrontier::new(dir.path().join("frontier.txt")));

        let mut handles = Vec::new();
        for page in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let batch: Vec<String> = (0..20)
                    .map(|i| format!("https://site{}.com/{}", page, i))
                    .collect();
                store.append_iteration(&batch, 1).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = store.load_entries().await.unwrap();
        assert_eq!(entries.len(), 16 * 20);
        // Each batch of 20 must be contiguous
        for chunk in entries.chunks(20) {
            let host = chunk[0].url.split('/').nth(2).unwrap();
            assert!(chunk.iter().all(|e| e.url.split('/').nth(2) == Some(host)));
        }
    }
}
