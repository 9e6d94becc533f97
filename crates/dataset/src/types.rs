//! Core domain types for the anime catalog.
//!
//! One [`Item`] per anime: the fields the ingestion collaborator hands us
//! (id, title, synopsis, score, genres, tags), nothing more. Everything the
//! pipeline derives from an item is rebuilt fresh each run and lives in the
//! `pipeline` crate.

use serde::{Deserialize, Serialize};

/// Unique identifier for an anime within one dataset snapshot.
pub type ItemId = u32;

/// A single anime as delivered by the ingestion side.
///
/// `description` and `score` are nullable upstream, so they are `Option`
/// here; `genres` and `tags` default to empty when the columns are missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Raw synopsis, possibly containing markup. Cleaned by the pipeline.
    #[serde(default)]
    pub description: Option<String>,
    /// Community score in 0-100. Only used for caller-side pre-filtering.
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    /// Create an item with just an id and title; the rest empty.
    ///
    /// Mostly useful in tests and fixtures.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            score: None,
            genres: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Builder-style helper: set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style helper: set the score.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Builder-style helper: set the genres.
    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    /// Builder-style helper: set the tags.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder() {
        let item = Item::new(1, "Demo Show")
            .with_description("A show about robots.")
            .with_score(85.0)
            .with_genres(&["Action"])
            .with_tags(&["Robots"]);

        assert_eq!(item.id, 1);
        assert_eq!(item.title, "Demo Show");
        assert_eq!(item.description.as_deref(), Some("A show about robots."));
        assert_eq!(item.score, Some(85.0));
        assert_eq!(item.genres, vec!["Action"]);
        assert_eq!(item.tags, vec!["Robots"]);
    }

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let json = r#"{"id": 7, "title": "Minimal"}"#;
        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, 7);
        assert_eq!(item.title, "Minimal");
        assert!(item.description.is_none());
        assert!(item.score.is_none());
        assert!(item.genres.is_empty());
        assert!(item.tags.is_empty());
    }
}
