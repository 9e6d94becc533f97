//! Content-based recommendation pipeline.
//!
//! This crate is the core of the recommender: it turns a snapshot of the
//! item table into a franchise-deduplicated top-K recommendation list per
//! item.
//!
//! ## Architecture
//! The pipeline processes the whole dataset in sequential stages:
//! 1. **text** / **features**: normalize synopses, join genres and tags
//!    into the categorical soup
//! 2. **vectorize**: fit two TF-IDF blocks (categorical, text) and
//!    combine them with the configured weights
//! 3. **similarity**: one N×N weighted-cosine matrix per run
//! 4. **rank**: per-item stable ranking with franchise deduplication
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Recommender, RecommenderConfig};
//!
//! let recommender = Recommender::new(RecommenderConfig::default())?;
//! let output = recommender.run(&items)?;
//!
//! for source in output.recommendations.iter() {
//!     println!("{}: {} recommendations", source.source_title, source.recommendations.len());
//! }
//! println!("{:?}", output.summary);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod franchise;
pub mod output;
pub mod rank;
pub mod similarity;
pub mod stopwords;
pub mod summary;
pub mod text;
pub mod vectorize;

// Re-export main types
pub use config::RecommenderConfig;
pub use engine::{Recommender, RunOutput};
pub use error::{PipelineError, Result};
pub use franchise::franchise_key;
pub use output::{FlatRow, Recommendation, RecommendationSet, SourceRecommendations, flat_to_nested, nested_to_flat};
pub use summary::RunSummary;
pub use text::normalize;
pub use vectorize::VectorizerOptions;
