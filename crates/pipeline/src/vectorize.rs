//! Weighted TF-IDF vectorization.
//!
//! Two independent vectorizers are fit per run, one over the categorical
//! soup strings and one over the normalized synopsis text, then combined
//! into a single sparse matrix by scaling each block and concatenating
//! columns.
//!
//! The weight formula is the standard smooth-idf, L2-normalized TF-IDF:
//!
//! ```text
//! tfidf(t, d) = tf(t, d) × (ln((1 + N) / (1 + df(t))) + 1)
//! ```
//!
//! followed by L2 normalization of each document row. Fitting is a single
//! batch operation over the whole corpus; when the item set changes, the
//! matrices are rebuilt from scratch.

use crate::stopwords::is_stop_word;
use std::collections::{HashMap, HashSet};

/// Options for one TF-IDF sub-vectorizer.
///
/// The categorical and text blocks are parameterized independently; see
/// [`crate::config::RecommenderConfig`] for the defaults used by the
/// pipeline.
#[derive(Debug, Clone)]
pub struct VectorizerOptions {
    /// Terms appearing in fewer than this many documents are dropped.
    pub min_df: usize,
    /// Terms appearing in more than this fraction of documents are dropped.
    pub max_df: f32,
    /// Keep only the top-N terms by corpus frequency (ties alphabetical).
    pub max_features: Option<usize>,
    /// Remove the fixed English stop-word list before counting.
    pub stop_words: bool,
    /// Maximum n-gram length (1 = unigrams only, 2 = unigrams + bigrams).
    pub ngram_max: usize,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            min_df: 1,
            max_df: 1.0,
            max_features: None,
            stop_words: false,
            ngram_max: 1,
        }
    }
}

impl VectorizerOptions {
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_max_df(mut self, max_df: f32) -> Self {
        self.max_df = max_df.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    pub fn with_stop_words(mut self, enable: bool) -> Self {
        self.stop_words = enable;
        self
    }

    pub fn with_ngram_max(mut self, ngram_max: usize) -> Self {
        self.ngram_max = ngram_max.max(1);
        self
    }
}

/// A sparse document-term matrix: per-row `(column, weight)` pairs sorted
/// by column index. Row order equals document order.
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    n_cols: usize,
    rows: Vec<Vec<(u32, f32)>>,
}

impl SparseMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn row(&self, i: usize) -> &[(u32, f32)] {
        &self.rows[i]
    }
}

/// The result of fitting one TF-IDF sub-vectorizer.
#[derive(Debug, Clone)]
pub struct TfidfFit {
    /// Column index → term, alphabetically ordered for determinism.
    pub vocabulary: Vec<String>,
    /// L2-normalized TF-IDF rows, aligned with the input document order.
    pub matrix: SparseMatrix,
}

impl TfidfFit {
    /// True when document-frequency filtering eliminated every term.
    ///
    /// The matrix then has zero columns and contributes nothing to
    /// similarity; callers must surface this rather than proceed silently.
    pub fn is_degenerate(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Fit a TF-IDF vectorizer over `documents` and transform them in one
/// batch.
///
/// ## Algorithm
/// 1. Tokenize: lowercase, split into alphanumeric runs, optionally drop
///    stop words, then emit n-grams up to `ngram_max` (space-joined).
/// 2. Count document frequencies; drop terms outside
///    `[min_df, ceil(max_df × N)]`.
/// 3. If `max_features` is set, keep the top terms by corpus frequency,
///    ties broken alphabetically.
/// 4. Assign columns alphabetically, weight with smooth idf, L2-normalize
///    each row.
///
/// Every step is deterministic for a fixed corpus and options.
pub fn fit_transform(documents: &[&str], options: &VectorizerOptions) -> TfidfFit {
    let n_docs = documents.len();

    // Per-document term lists, tokenized once and reused for counting.
    let doc_terms: Vec<Vec<String>> = documents
        .iter()
        .map(|doc| extract_terms(doc, options))
        .collect();

    // Document and corpus frequencies.
    let mut doc_freq: HashMap<String, usize> = HashMap::new();
    let mut corpus_freq: HashMap<String, u64> = HashMap::new();
    for terms in &doc_terms {
        let mut seen: HashSet<&str> = HashSet::new();
        for term in terms {
            *corpus_freq.entry(term.clone()).or_insert(0) += 1;
            if seen.insert(term.as_str()) {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }
    }

    // Document-frequency filtering. A term must appear in at least min_df
    // documents and in no more than max_df (as a fraction) of them.
    let max_df_limit = options.max_df * n_docs as f32;
    let mut selected: Vec<(String, u64)> = doc_freq
        .iter()
        .filter(|&(_, &df)| df >= options.min_df && df as f32 <= max_df_limit)
        .map(|(term, _)| (term.clone(), corpus_freq[term]))
        .collect();

    // Vocabulary cap: top terms by corpus frequency, alphabetical ties.
    if let Some(max_features) = options.max_features {
        selected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        selected.truncate(max_features);
    }

    // Columns assigned alphabetically so the layout never depends on hash
    // iteration order.
    let mut vocabulary: Vec<String> = selected.into_iter().map(|(term, _)| term).collect();
    vocabulary.sort_unstable();

    let term_index: HashMap<&str, u32> = vocabulary
        .iter()
        .enumerate()
        .map(|(idx, term)| (term.as_str(), idx as u32))
        .collect();

    // Smooth idf per column.
    let idf: Vec<f32> = vocabulary
        .iter()
        .map(|term| {
            let df = doc_freq[term] as f32;
            ((1.0 + n_docs as f32) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    // Weight and normalize each row.
    let rows: Vec<Vec<(u32, f32)>> = doc_terms
        .iter()
        .map(|terms| {
            let mut counts: HashMap<u32, f32> = HashMap::new();
            for term in terms {
                if let Some(&idx) = term_index.get(term.as_str()) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }

            let mut row: Vec<(u32, f32)> = counts
                .into_iter()
                .map(|(idx, tf)| (idx, tf * idf[idx as usize]))
                .collect();
            row.sort_unstable_by_key(|&(idx, _)| idx);

            let norm: f32 = row.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut row {
                    *w /= norm;
                }
            }
            row
        })
        .collect();

    TfidfFit {
        matrix: SparseMatrix {
            n_cols: vocabulary.len(),
            rows,
        },
        vocabulary,
    }
}

/// Scale two row-aligned blocks and concatenate their columns.
///
/// The meta block keeps its column indices; text columns are offset by the
/// meta vocabulary size. Both blocks are already L2-normalized per row, so
/// after scaling the combined row norm is no longer exactly 1 and the
/// downstream dot product is a weighted-cosine approximation. That is the
/// intended behavior.
pub fn combine_blocks(
    meta: &SparseMatrix,
    text: &SparseMatrix,
    w_meta: f32,
    w_desc: f32,
) -> SparseMatrix {
    debug_assert_eq!(meta.n_rows(), text.n_rows());

    let offset = meta.n_cols() as u32;
    let rows = meta
        .rows
        .iter()
        .zip(&text.rows)
        .map(|(meta_row, text_row)| {
            let mut row: Vec<(u32, f32)> = Vec::with_capacity(meta_row.len() + text_row.len());
            row.extend(meta_row.iter().map(|&(idx, w)| (idx, w * w_meta)));
            row.extend(text_row.iter().map(|&(idx, w)| (idx + offset, w * w_desc)));
            row
        })
        .collect();

    SparseMatrix {
        n_cols: meta.n_cols() + text.n_cols(),
        rows,
    }
}

/// Tokenize one document into counted terms (unigrams plus n-grams).
fn extract_terms(doc: &str, options: &VectorizerOptions) -> Vec<String> {
    let tokens: Vec<String> = doc
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .filter(|t| !(options.stop_words && is_stop_word(t)))
        .map(str::to_string)
        .collect();

    let mut terms = Vec::with_capacity(tokens.len() * options.ngram_max);
    for n in 1..=options.ngram_max {
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}
