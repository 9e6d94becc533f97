//! # Dataset Crate
//!
//! This crate handles the input side of the recommender: the item table
//! the ingestion collaborator produces (id, title, description, score,
//! genres, tags), loaded from a JSON export.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Item, ItemId)
//! - **loader**: Read the JSON item table, caller-side pre-filters
//! - **error**: Error types for dataset loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use dataset::{load_items, filter_by_score};
//! use std::path::Path;
//!
//! let items = load_items(Path::new("data/items.json"))?;
//! let items = filter_by_score(items, 60.0);
//! println!("{} items after filtering", items.len());
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DatasetError, Result};
pub use loader::{filter_by_score, limit_by_score, load_items};
pub use types::{Item, ItemId};
