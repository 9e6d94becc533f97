//! # Recommendation Engine
//!
//! The pipeline entry point. One call runs the whole batch:
//! 1. Validate the input item set
//! 2. Build feature records (normalize text, join the categorical soup)
//! 3. Fit the two TF-IDF blocks and combine them with the block weights
//! 4. Compute the N×N similarity matrix
//! 5. Rank and deduplicate per item
//! 6. Return the recommendation set plus the run summary
//!
//! Every run rebuilds all matrices from the input snapshot; no state
//! survives between runs.

use std::time::Instant;

use tracing::{info, warn};

use crate::config::RecommenderConfig;
use crate::error::{PipelineError, Result};
use crate::features::build_feature_records;
use crate::output::RecommendationSet;
use crate::rank::rank_all;
use crate::similarity::compute_similarity;
use crate::summary::RunSummary;
use crate::vectorize::{combine_blocks, fit_transform};
use dataset::Item;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub recommendations: RecommendationSet,
    pub summary: RunSummary,
}

/// The content-based recommender, configured once and reusable across
/// runs. Holds no per-run state.
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommenderConfig,
}

impl Recommender {
    /// Create a recommender from a validated configuration.
    pub fn new(config: RecommenderConfig) -> Result<Self> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// The normalized configuration in effect.
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Run the full pipeline over `items`.
    pub fn run(&self, items: &[Item]) -> Result<RunOutput> {
        self.run_with_progress(items, |_, _| {})
    }

    /// Run the full pipeline, invoking `progress(processed, total)` every
    /// `progress_every` items during the ranking stage.
    pub fn run_with_progress<F>(&self, items: &[Item], progress: F) -> Result<RunOutput>
    where
        F: FnMut(usize, usize),
    {
        let start = Instant::now();

        // Validation happens before any expensive computation.
        validate_items(items)?;
        info!("Starting recommendation run over {} items", items.len());

        // Feature aggregation.
        let records = build_feature_records(items);
        let soups: Vec<&str> = records.iter().map(|r| r.categorical_soup.as_str()).collect();
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();

        // Weighted vectorization: two independent fits, then one combined
        // matrix.
        let meta_fit = fit_transform(&soups, &self.config.meta_options);
        let text_fit = fit_transform(&texts, &self.config.text_options);
        info!(
            "Fitted vectorizers: {} categorical terms, {} text terms",
            meta_fit.vocabulary.len(),
            text_fit.vocabulary.len()
        );

        let mut degenerate_blocks = Vec::new();
        if meta_fit.is_degenerate() {
            let msg = "categorical vocabulary collapsed to zero terms; \
                       similarity will rely on the text block alone"
                .to_string();
            warn!("{}", msg);
            degenerate_blocks.push(msg);
        }
        if text_fit.is_degenerate() {
            let msg = "text vocabulary collapsed to zero terms; \
                       similarity will rely on the categorical block alone"
                .to_string();
            warn!("{}", msg);
            degenerate_blocks.push(msg);
        }

        let combined = combine_blocks(
            &meta_fit.matrix,
            &text_fit.matrix,
            self.config.meta_weight,
            self.config.desc_weight,
        );

        // Similarity: the dominant cost, computed once for the whole run.
        let similarity = compute_similarity(&combined);
        info!(
            "Computed similarity matrix in {:?} total elapsed",
            start.elapsed()
        );

        // Ranking and franchise deduplication.
        let outcome = rank_all(items, &similarity, &self.config, progress);
        if outcome.skipped_items > 0 {
            warn!("{} items skipped during ranking", outcome.skipped_items);
        }

        let summary = RunSummary {
            items_processed: outcome.recommendations.len(),
            meta_vocabulary: meta_fit.vocabulary.len(),
            text_vocabulary: text_fit.vocabulary.len(),
            degenerate_blocks,
            skipped_items: outcome.skipped_items,
        };

        info!(
            "Run complete: {} items processed, {} skipped, in {:?}",
            summary.items_processed,
            summary.skipped_items,
            start.elapsed()
        );

        Ok(RunOutput {
            recommendations: outcome.recommendations,
            summary,
        })
    }
}

/// Validate the input contract: non-empty set, non-empty titles, unique
/// ids.
fn validate_items(items: &[Item]) -> Result<()> {
    if items.is_empty() {
        return Err(PipelineError::EmptyItemSet);
    }

    let mut seen_ids = std::collections::HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.title.trim().is_empty() {
            return Err(PipelineError::InvalidItem { index, id: item.id });
        }
        if !seen_ids.insert(item.id) {
            return Err(PipelineError::DuplicateId { id: item.id });
        }
    }
    Ok(())
}
