//! Pipeline configuration.
//!
//! All tunables live in one immutable [`RecommenderConfig`] passed
//! explicitly into the pipeline entry point. Nothing is read from ambient
//! global state, so test runs with different configurations never
//! interfere.

use crate::error::{PipelineError, Result};
use crate::vectorize::VectorizerOptions;

/// Configuration for one recommendation run.
///
/// Built with `Default` plus `with_*` methods; validated by
/// [`RecommenderConfig::validate`] (the pipeline entry point calls it).
///
/// The meta/description weights are given in any non-negative scale
/// (70/30, 0.7/0.3, ...) and normalized to sum to 1 at validation time,
/// which keeps every similarity score inside [0, 1].
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Recommendations kept per item.
    pub top_k: usize,
    /// Options for the categorical (genres + tags) block.
    pub meta_options: VectorizerOptions,
    /// Options for the synopsis text block.
    pub text_options: VectorizerOptions,
    /// Weight of the categorical block.
    pub meta_weight: f32,
    /// Weight of the text block.
    pub desc_weight: f32,
    /// Candidates examined per item = `prefix_multiplier × top_k`. Must
    /// leave enough room for franchise filtering; 5 is the observed floor.
    pub prefix_multiplier: usize,
    /// Also reject candidates by title/key containment (the richer
    /// franchise heuristic). Off by default.
    pub title_containment_check: bool,
    /// Progress callback cadence, in items.
    pub progress_every: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            meta_options: VectorizerOptions::default()
                .with_min_df(3)
                .with_max_features(500),
            text_options: VectorizerOptions::default()
                .with_min_df(10)
                .with_max_df(0.5)
                .with_max_features(1300)
                .with_stop_words(true)
                .with_ngram_max(2),
            meta_weight: 0.7,
            desc_weight: 0.3,
            prefix_multiplier: 5,
            title_containment_check: false,
            progress_every: 1000,
        }
    }
}

impl RecommenderConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_meta_options(mut self, options: VectorizerOptions) -> Self {
        self.meta_options = options;
        self
    }

    pub fn with_text_options(mut self, options: VectorizerOptions) -> Self {
        self.text_options = options;
        self
    }

    /// Set both block weights at once. Values are normalized to sum to 1
    /// during validation, so `(70, 30)` and `(0.7, 0.3)` are equivalent.
    pub fn with_weights(mut self, meta_weight: f32, desc_weight: f32) -> Self {
        self.meta_weight = meta_weight;
        self.desc_weight = desc_weight;
        self
    }

    pub fn with_prefix_multiplier(mut self, prefix_multiplier: usize) -> Self {
        self.prefix_multiplier = prefix_multiplier;
        self
    }

    pub fn with_title_containment_check(mut self, enable: bool) -> Self {
        self.title_containment_check = enable;
        self
    }

    pub fn with_progress_every(mut self, progress_every: usize) -> Self {
        self.progress_every = progress_every;
        self
    }

    /// Validate and normalize the configuration.
    ///
    /// Returns a copy with the block weights rescaled to sum to 1.
    pub fn validate(&self) -> Result<Self> {
        if self.top_k == 0 {
            return Err(PipelineError::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }
        if self.prefix_multiplier == 0 {
            return Err(PipelineError::InvalidConfig(
                "prefix_multiplier must be at least 1".to_string(),
            ));
        }
        if self.meta_weight < 0.0 || self.desc_weight < 0.0 {
            return Err(PipelineError::InvalidConfig(
                "block weights must be non-negative".to_string(),
            ));
        }
        let total = self.meta_weight + self.desc_weight;
        if total <= 0.0 {
            return Err(PipelineError::InvalidConfig(
                "block weights must sum to a positive total".to_string(),
            ));
        }
        if self.progress_every == 0 {
            return Err(PipelineError::InvalidConfig(
                "progress_every must be at least 1".to_string(),
            ));
        }

        let mut normalized = self.clone();
        normalized.meta_weight = self.meta_weight / total;
        normalized.desc_weight = self.desc_weight / total;
        Ok(normalized)
    }
}
