// src/config.rs
// =============================================================================
// Reads the two run inputs: the seed list and the depth value.
//
// Both are read exactly once, before any fetching. Anything wrong with
// them is a configuration error and aborts the run.
//
// File formats:
// - Seed list: one URL per line, blank lines ignored, \r stripped
// - Depth file: a single non-negative integer (whitespace around it is fine)
// =============================================================================

use crate::error::{HarvestError, Result};
use std::path::Path;

// Loads the seed URLs from a newline-delimited file
//
// Returns: the non-blank lines, trimmed, in file order
pub fn load_seeds(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HarvestError::Config(format!("cannot read seed list {}: {}", path.display(), e))
    })?;

    let seeds = parse_seeds(&content);
    if seeds.is_empty() {
        return Err(HarvestError::Config(format!(
            "seed list {} contains no URLs",
            path.display()
        )));
    }

    Ok(seeds)
}

fn parse_seeds(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads the depth bound from a file holding a single integer
pub fn load_depth(path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HarvestError::Config(format!("cannot read depth file {}: {}", path.display(), e))
    })?;

    parse_depth(&content)
}

pub fn parse_depth(content: &str) -> Result<usize> {
    let value = content.trim();
    value.parse::<usize>().map_err(|_| {
        HarvestError::Config(format!(
            "depth must be a non-negative integer, got '{}'",
            value
        ))
    })
}
