//! Pairwise similarity over the combined feature matrix.
//!
//! The full N×N matrix is computed once per run by multiplying the sparse
//! matrix with its own transpose (a merge walk over each pair of sorted
//! rows). With L2-normalized TF-IDF blocks this is cosine similarity; once
//! the blocks are scaled by the meta/description weights the row norms
//! drift below 1 and the result is a weighted-cosine approximation. That
//! approximation is kept as-is rather than renormalized.
//!
//! This stage is the dominant cost of the pipeline, O(N² × nnz-per-row),
//! and the dominant memory consumer at O(N²) floats. Fine up to low tens
//! of thousands of items; beyond that a blocked or approximate strategy
//! would be needed.

use crate::vectorize::SparseMatrix;
use tracing::debug;

/// Dense symmetric N×N similarity matrix.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Number of items (rows and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between items `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    /// The full row for item `i`, aligned with item order.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Compute the full pairwise similarity matrix.
///
/// Symmetric entries are computed once and mirrored. The diagonal is the
/// (scaled) self-similarity; the ranker never reads it.
pub fn compute_similarity(matrix: &SparseMatrix) -> SimilarityMatrix {
    let n = matrix.n_rows();
    let mut data = vec![0.0f32; n * n];

    for i in 0..n {
        let row_i = matrix.row(i);
        data[i * n + i] = sparse_dot(row_i, row_i);
        for j in (i + 1)..n {
            let sim = sparse_dot(row_i, matrix.row(j));
            data[i * n + j] = sim;
            data[j * n + i] = sim;
        }
    }

    debug!("Computed {}x{} similarity matrix", n, n);
    SimilarityMatrix { n, data }
}

/// Dot product of two sparse rows sorted by column index.
fn sparse_dot(a: &[(u32, f32)], b: &[(u32, f32)]) -> f32 {
    let mut sum = 0.0;
    let (mut ai, mut bi) = (0, 0);
    while ai < a.len() && bi < b.len() {
        match a[ai].0.cmp(&b[bi].0) {
            std::cmp::Ordering::Less => ai += 1,
            std::cmp::Ordering::Greater => bi += 1,
            std::cmp::Ordering::Equal => {
                sum += a[ai].1 * b[bi].1;
                ai += 1;
                bi += 1;
            }
        }
    }
    sum
}
