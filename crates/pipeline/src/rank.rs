//! Ranking and franchise deduplication.
//!
//! For each item the ranker sorts every other item by similarity, walks a
//! generous prefix of that order, and accepts candidates until `top_k`
//! distinct franchises are collected. The "seen franchises" set is local
//! to each source item; nothing leaks across lists.
//!
//! Determinism: the sort is stable with ties broken by original item
//! order, the prefix is a fixed multiple of `top_k`, and scores are
//! rounded once at acceptance, so a fixed input and configuration
//! reproduce the output byte for byte.

use crate::config::RecommenderConfig;
use crate::franchise::{containment_match, franchise_key};
use crate::output::{Recommendation, RecommendationSet, SourceRecommendations};
use crate::similarity::SimilarityMatrix;
use dataset::Item;
use std::collections::HashSet;
use tracing::warn;

/// Round a similarity score to 3 decimal places for the output surface.
fn round_score(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}

/// Outcome of the ranking stage.
pub struct RankOutcome {
    pub recommendations: RecommendationSet,
    /// Items whose list could not be built; counted, never fatal.
    pub skipped_items: usize,
}

/// Build the deduplicated top-K list for every item.
///
/// ## Algorithm (per item i)
/// 1. Pair each other item j with `similarity[i][j]`.
/// 2. Stable-sort pairs by score descending (ties keep item order).
/// 3. Walk the first `prefix_multiplier × top_k` pairs.
/// 4. Skip candidates whose franchise key was already seen (the set
///    starts with the source's own key); optionally also skip on
///    title/key containment.
/// 5. Stop at `top_k` accepted candidates or prefix exhaustion; short
///    lists are expected, not an error.
///
/// `progress` is invoked with `(processed, total)` every
/// `config.progress_every` items.
pub fn rank_all<F>(
    items: &[Item],
    similarity: &SimilarityMatrix,
    config: &RecommenderConfig,
    mut progress: F,
) -> RankOutcome
where
    F: FnMut(usize, usize),
{
    let n = items.len();

    // Franchise keys and lowercased titles are pure functions of the
    // titles; compute them once, row-aligned.
    let keys: Vec<String> = items.iter().map(|item| franchise_key(&item.title)).collect();
    let titles_lower: Vec<String> = items.iter().map(|item| item.title.to_lowercase()).collect();

    let prefix_len = config.top_k * config.prefix_multiplier;
    let mut sources = Vec::with_capacity(n);
    let mut skipped_items = 0;

    for i in 0..n {
        if keys[i].is_empty() {
            // Cannot dedup against an item we cannot key; skip it and
            // keep going with the rest of the batch.
            warn!("Skipping item {} ({:?}): no usable franchise key", items[i].id, items[i].title);
            skipped_items += 1;
            continue;
        }

        sources.push(rank_one(
            i,
            items,
            similarity,
            &keys,
            &titles_lower,
            prefix_len,
            config,
        ));

        let processed = sources.len();
        if processed % config.progress_every == 0 {
            progress(processed, n);
        }
    }

    RankOutcome {
        recommendations: RecommendationSet::new(sources),
        skipped_items,
    }
}

fn rank_one(
    i: usize,
    items: &[Item],
    similarity: &SimilarityMatrix,
    keys: &[String],
    titles_lower: &[String],
    prefix_len: usize,
    config: &RecommenderConfig,
) -> SourceRecommendations {
    let row = similarity.row(i);

    // Every other item paired with its score, self excluded up front.
    let mut candidates: Vec<(usize, f32)> = (0..items.len())
        .filter(|&j| j != i)
        .map(|j| (j, row[j]))
        .collect();
    // Stable sort: ties keep original item order, which makes the
    // output reproducible run to run.
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(prefix_len);

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(keys[i].as_str());

    let mut accepted = Vec::with_capacity(config.top_k);
    for &(j, score) in &candidates {
        if seen.contains(keys[j].as_str()) {
            continue;
        }
        if config.title_containment_check
            && containment_match(&keys[i], &titles_lower[i], &keys[j], &titles_lower[j])
        {
            continue;
        }

        seen.insert(keys[j].as_str());
        accepted.push(Recommendation {
            candidate_id: items[j].id,
            candidate_title: items[j].title.clone(),
            score: round_score(score),
        });
        if accepted.len() >= config.top_k {
            break;
        }
    }

    SourceRecommendations {
        source_id: items[i].id,
        source_title: items[i].title.clone(),
        recommendations: accepted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorize::{VectorizerOptions, combine_blocks, fit_transform};
    use crate::similarity::compute_similarity;

    fn rank_items(items: &[Item], config: &RecommenderConfig) -> RankOutcome {
        let soups: Vec<String> = items
            .iter()
            .map(|i| i.genres.join(" ") + " " + &i.tags.join(" "))
            .collect();
        let soup_refs: Vec<&str> = soups.iter().map(String::as_str).collect();
        let texts: Vec<&str> = vec![""; items.len()];

        let meta = fit_transform(&soup_refs, &VectorizerOptions::default());
        let text = fit_transform(&texts, &VectorizerOptions::default());
        let combined = combine_blocks(&meta.matrix, &text.matrix, 1.0, 0.0);
        let similarity = compute_similarity(&combined);

        rank_all(items, &similarity, config, |_, _| {})
    }

    fn demo_items() -> Vec<Item> {
        vec![
            Item::new(1, "Demo Show")
                .with_genres(&["Action"])
                .with_tags(&["Robots"]),
            Item::new(2, "Demo Show: Second Season")
                .with_genres(&["Action"])
                .with_tags(&["Robots"]),
            Item::new(3, "Totally Different")
                .with_genres(&["Romance"])
                .with_tags(&["Slow Burn"]),
        ]
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.41249), 0.412);
        assert_eq!(round_score(0.9999), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn test_same_franchise_excluded() {
        let items = demo_items();
        let outcome = rank_items(&items, &RecommenderConfig::default());
        let set = &outcome.recommendations;

        // A and B share the key "demo show": neither may recommend the
        // other, and both may still recommend C.
        let for_a = set.for_title("Demo Show").unwrap();
        assert!(
            for_a
                .recommendations
                .iter()
                .all(|r| r.candidate_title != "Demo Show: Second Season")
        );

        let for_b = set.for_title("Demo Show: Second Season").unwrap();
        assert!(
            for_b
                .recommendations
                .iter()
                .all(|r| r.candidate_title != "Demo Show")
        );
    }

    #[test]
    fn test_self_never_recommended() {
        let items = demo_items();
        let outcome = rank_items(&items, &RecommenderConfig::default());

        for source in outcome.recommendations.iter() {
            assert!(
                source
                    .recommendations
                    .iter()
                    .all(|r| r.candidate_id != source.source_id)
            );
        }
    }

    #[test]
    fn test_candidate_franchises_pairwise_distinct() {
        let items = demo_items();
        let outcome = rank_items(&items, &RecommenderConfig::default());

        for source in outcome.recommendations.iter() {
            let keys: Vec<String> = source
                .recommendations
                .iter()
                .map(|r| franchise_key(&r.candidate_title))
                .collect();
            let unique: HashSet<&String> = keys.iter().collect();
            assert_eq!(unique.len(), keys.len());
        }
    }

    #[test]
    fn test_scores_non_increasing() {
        let items = demo_items();
        let outcome = rank_items(&items, &RecommenderConfig::default());

        for source in outcome.recommendations.iter() {
            for pair in source.recommendations.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn test_short_list_when_franchises_run_out() {
        // Only two franchises exist; each list has at most one entry even
        // though top_k is 10.
        let items = demo_items();
        let outcome = rank_items(&items, &RecommenderConfig::default());

        let for_a = outcome.recommendations.for_title("Demo Show").unwrap();
        assert_eq!(for_a.recommendations.len(), 1);
        assert_eq!(for_a.recommendations[0].candidate_title, "Totally Different");
    }

    #[test]
    fn test_containment_check_rejects_title_overlap() {
        // "One Piece Film: Red" keys to "one piece", same as the source,
        // so key dedup alone already drops it; "One Piece Academy Parody"
        // keys differently but contains the source key, so only the
        // containment variant drops it.
        let items = vec![
            Item::new(1, "One Piece").with_genres(&["Action"]),
            Item::new(2, "One Piece Academy Parody").with_genres(&["Action"]),
            Item::new(3, "Berserk").with_genres(&["Action"]),
        ];

        let plain = rank_items(&items, &RecommenderConfig::default());
        let plain_titles: Vec<&str> = plain
            .recommendations
            .for_title("One Piece")
            .unwrap()
            .recommendations
            .iter()
            .map(|r| r.candidate_title.as_str())
            .collect();
        assert!(plain_titles.contains(&"One Piece Academy Parody"));

        let richer = rank_items(
            &items,
            &RecommenderConfig::default().with_title_containment_check(true),
        );
        let richer_titles: Vec<&str> = richer
            .recommendations
            .for_title("One Piece")
            .unwrap()
            .recommendations
            .iter()
            .map(|r| r.candidate_title.as_str())
            .collect();
        assert!(!richer_titles.contains(&"One Piece Academy Parody"));
        assert!(richer_titles.contains(&"Berserk"));
    }

    #[test]
    fn test_progress_callback_cadence() {
        let items: Vec<Item> = (0..25)
            .map(|i| Item::new(i, format!("Unique Show Number {i}")).with_genres(&["Action"]))
            .collect();

        let mut calls = Vec::new();
        let soups: Vec<&str> = vec!["action"; items.len()];
        let meta = fit_transform(&soups, &VectorizerOptions::default());
        let text = fit_transform(&vec![""; items.len()], &VectorizerOptions::default());
        let combined = combine_blocks(&meta.matrix, &text.matrix, 1.0, 0.0);
        let similarity = compute_similarity(&combined);

        let config = RecommenderConfig::default().with_progress_every(10);
        rank_all(&items, &similarity, &config, |done, total| {
            calls.push((done, total));
        });

        assert_eq!(calls, vec![(10, 25), (20, 25)]);
    }
}
