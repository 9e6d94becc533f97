//! Loading the item table from a JSON file.
//!
//! The ingestion side exports a flat JSON array of items. This module reads
//! it back and offers the pre-filters the caller owns per the input
//! contract: score threshold and row limit. The recommendation pipeline
//! consumes whatever item set it is given and applies no filtering of its
//! own.

use crate::error::{DatasetError, Result};
use crate::types::Item;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load all items from a JSON array file.
///
/// Format-level problems (unreadable file, malformed JSON) are errors;
/// semantic validation (non-empty titles, unique ids) is the pipeline's
/// job, since it also applies to items built in memory.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let items: Vec<Item> = serde_json::from_str(&content)?;
    info!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Drop items whose score is missing or below `min_score`.
///
/// Score is 0-100; items with no score at all are treated as failing the
/// threshold, matching the upstream popularity filter.
pub fn filter_by_score(items: Vec<Item>, min_score: f32) -> Vec<Item> {
    let before = items.len();
    let kept: Vec<Item> = items
        .into_iter()
        .filter(|item| item.score.is_some_and(|s| s >= min_score))
        .collect();
    info!(
        "Score filter (>= {}): {} of {} items kept",
        min_score,
        kept.len(),
        before
    );
    kept
}

/// Keep the `limit` highest-scored items.
///
/// Ties and missing scores sort by id ascending so the cut is
/// deterministic. The surviving items are returned in their original
/// relative order, since item order downstream is meaningful.
pub fn limit_by_score(items: Vec<Item>, limit: usize) -> Vec<Item> {
    if items.len() <= limit {
        return items;
    }

    let mut ranked: Vec<(usize, f32, u32)> = items
        .iter()
        .enumerate()
        .map(|(pos, item)| (pos, item.score.unwrap_or(0.0), item.id))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.2.cmp(&b.2))
    });

    let mut keep: Vec<bool> = vec![false; items.len()];
    for (pos, _, _) in ranked.into_iter().take(limit) {
        keep[pos] = true;
    }

    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect()
}
