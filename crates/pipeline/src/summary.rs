//! Run summary: the user-visible report for one pipeline run.

use serde::Serialize;

/// Summary of a completed recommendation run.
///
/// Carries the figures a caller needs to judge the run: how many items
/// went through, how large each vocabulary block ended up, whether any
/// block degenerated to zero terms, and how many items were skipped
/// during ranking.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Items that received a recommendation list.
    pub items_processed: usize,
    /// Vocabulary size of the categorical block.
    pub meta_vocabulary: usize,
    /// Vocabulary size of the text block.
    pub text_vocabulary: usize,
    /// Warnings for blocks whose vocabulary collapsed to zero terms.
    pub degenerate_blocks: Vec<String>,
    /// Items skipped during ranking (failures never abort the batch).
    pub skipped_items: usize,
}

impl RunSummary {
    /// True when at least one vectorizer block carries signal.
    pub fn has_signal(&self) -> bool {
        self.meta_vocabulary > 0 || self.text_vocabulary > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_signal() {
        let mut summary = RunSummary::default();
        assert!(!summary.has_signal());

        summary.meta_vocabulary = 12;
        assert!(summary.has_signal());
    }
}
