//! Error types for the recommendation pipeline.

use dataset::ItemId;
use thiserror::Error;

/// Errors that abort a recommendation run.
///
/// All variants are raised during input or configuration validation,
/// before any vectorization work starts. Recoverable conditions
/// (vocabulary collapse, per-item ranking failures) are reported through
/// the run summary instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The caller handed us no items at all
    #[error("input item set is empty")]
    EmptyItemSet,

    /// An item is missing its title
    #[error("item at position {index} (id {id}) has an empty title")]
    InvalidItem { index: usize, id: ItemId },

    /// Two items share an id within one run
    #[error("duplicate item id {id}")]
    DuplicateId { id: ItemId },

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
