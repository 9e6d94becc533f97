//! Output surface: the ranked recommendation table.
//!
//! Two equivalent representations per the output contract:
//! - a flat table of `(source_title, candidate_title, score)` rows
//! - a nested mapping `title -> [[candidate_title, score], ...]`
//!
//! Both are derivable from each other losslessly (group by source title
//! and flatten back). Scores are already rounded to 3 decimals by the
//! ranker and sorted descending within each source.

use dataset::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One accepted candidate for a source item.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub candidate_id: ItemId,
    pub candidate_title: String,
    /// Weighted-cosine similarity, rounded to 3 decimals, in [0, 1].
    pub score: f32,
}

/// The recommendation list for one source item.
#[derive(Debug, Clone)]
pub struct SourceRecommendations {
    pub source_id: ItemId,
    pub source_title: String,
    /// Sorted descending by score; at most `top_k` entries, possibly
    /// fewer when the candidate prefix ran out of distinct franchises.
    pub recommendations: Vec<Recommendation>,
}

/// All recommendation lists of one run, in item order.
#[derive(Debug, Clone, Default)]
pub struct RecommendationSet {
    sources: Vec<SourceRecommendations>,
}

/// One row of the flat output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub source_title: String,
    pub candidate_title: String,
    pub score: f32,
}

impl RecommendationSet {
    pub fn new(sources: Vec<SourceRecommendations>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceRecommendations> {
        self.sources.iter()
    }

    /// Look up the list for a source title (first match wins).
    pub fn for_title(&self, title: &str) -> Option<&SourceRecommendations> {
        self.sources.iter().find(|s| s.source_title == title)
    }

    /// Export as the flat three-column table.
    pub fn to_flat(&self) -> Vec<FlatRow> {
        self.sources
            .iter()
            .flat_map(|source| {
                source.recommendations.iter().map(|rec| FlatRow {
                    source_title: source.source_title.clone(),
                    candidate_title: rec.candidate_title.clone(),
                    score: rec.score,
                })
            })
            .collect()
    }

    /// Export as the nested `title -> [[candidate, score], ...]` mapping.
    pub fn to_nested(&self) -> BTreeMap<String, Vec<(String, f32)>> {
        self.sources
            .iter()
            .map(|source| {
                let list = source
                    .recommendations
                    .iter()
                    .map(|rec| (rec.candidate_title.clone(), rec.score))
                    .collect();
                (source.source_title.clone(), list)
            })
            .collect()
    }
}

/// Group a flat table into the nested mapping.
///
/// Each source's list is re-sorted descending by score (ties keep row
/// order), so a shuffled flat table still nests canonically.
pub fn flat_to_nested(rows: &[FlatRow]) -> BTreeMap<String, Vec<(String, f32)>> {
    let mut nested: BTreeMap<String, Vec<(String, f32)>> = BTreeMap::new();
    for row in rows {
        nested
            .entry(row.source_title.clone())
            .or_default()
            .push((row.candidate_title.clone(), row.score));
    }
    for list in nested.values_mut() {
        list.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }
    nested
}

/// Flatten the nested mapping back into the flat table.
pub fn nested_to_flat(nested: &BTreeMap<String, Vec<(String, f32)>>) -> Vec<FlatRow> {
    nested
        .iter()
        .flat_map(|(source_title, list)| {
            list.iter().map(|(candidate_title, score)| FlatRow {
                source_title: source_title.clone(),
                candidate_title: candidate_title.clone(),
                score: *score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> RecommendationSet {
        RecommendationSet::new(vec![
            SourceRecommendations {
                source_id: 1,
                source_title: "Demo Show".to_string(),
                recommendations: vec![
                    Recommendation {
                        candidate_id: 3,
                        candidate_title: "Totally Different".to_string(),
                        score: 0.412,
                    },
                    Recommendation {
                        candidate_id: 4,
                        candidate_title: "Another One".to_string(),
                        score: 0.231,
                    },
                ],
            },
            SourceRecommendations {
                source_id: 3,
                source_title: "Totally Different".to_string(),
                recommendations: vec![Recommendation {
                    candidate_id: 1,
                    candidate_title: "Demo Show".to_string(),
                    score: 0.412,
                }],
            },
        ])
    }

    #[test]
    fn test_flat_export() {
        let flat = sample_set().to_flat();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].source_title, "Demo Show");
        assert_eq!(flat[0].candidate_title, "Totally Different");
    }

    #[test]
    fn test_round_trip_flat_nested_flat() {
        let set = sample_set();
        let flat = set.to_flat();

        let nested = flat_to_nested(&flat);
        let mut back = nested_to_flat(&nested);

        let mut original = flat;
        let key = |r: &FlatRow| (r.source_title.clone(), r.candidate_title.clone());
        original.sort_by_key(key);
        back.sort_by_key(key);
        assert_eq!(original, back);
    }

    #[test]
    fn test_nested_matches_direct_export() {
        let set = sample_set();
        assert_eq!(flat_to_nested(&set.to_flat()), set.to_nested());
    }

    #[test]
    fn test_nested_lists_sorted_descending() {
        // Shuffled flat input still nests with descending scores.
        let rows = vec![
            FlatRow {
                source_title: "A".to_string(),
                candidate_title: "low".to_string(),
                score: 0.1,
            },
            FlatRow {
                source_title: "A".to_string(),
                candidate_title: "high".to_string(),
                score: 0.9,
            },
        ];
        let nested = flat_to_nested(&rows);
        assert_eq!(nested["A"][0].0, "high");
    }

    #[test]
    fn test_flat_row_serde() {
        let row = FlatRow {
            source_title: "Demo Show".to_string(),
            candidate_title: "Totally Different".to_string(),
            score: 0.412,
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: FlatRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }
}
