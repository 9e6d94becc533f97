//! Feature aggregation: from raw items to per-item feature records.
//!
//! Each item contributes two feature channels to the vectorizer:
//! - the categorical "soup": genres and tags joined into one blob
//! - the normalized synopsis text
//!
//! Records are rebuilt fresh each run, row-aligned with the input item
//! order; nothing here is persisted.

use crate::text::normalize;
use dataset::Item;

/// Derived features for one item, ready for vectorization.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// Genres and tags joined by single spaces. Order is irrelevant to
    /// TF-IDF, so whatever order the item carries is kept.
    pub categorical_soup: String,
    /// Synopsis with markup stripped and whitespace collapsed.
    pub text: String,
}

impl FeatureRecord {
    /// Build the feature record for a single item.
    ///
    /// Missing genres, tags, or description are treated as empty, never as
    /// an error; an item with nothing at all still gets a record (and later
    /// a zero vector).
    pub fn from_item(item: &Item) -> Self {
        let categorical_soup = item
            .genres
            .iter()
            .chain(item.tags.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            categorical_soup,
            text: normalize(item.description.as_deref()),
        }
    }
}

/// Build feature records for all items, preserving item order.
///
/// Row i of every downstream matrix corresponds to `items[i]`; this is the
/// only place that alignment is established.
pub fn build_feature_records(items: &[Item]) -> Vec<FeatureRecord> {
    items.iter().map(FeatureRecord::from_item).collect()
}
