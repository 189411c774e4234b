//! Catalog item model.
//!
//! # Responsibility
//! - Define the book-like record owned by the catalog store.
//! - Validate and normalize insertion input.
//!
//! # Invariants
//! - `title` and `author` are never blank once persisted.
//! - Items are never updated in place or deleted by the catalog API.

use crate::model::text::{optional_text, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned item identity, strictly increasing in creation order.
pub type ItemId = i64;

/// Persisted catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    /// Publication year.
    pub year: Option<i32>,
    /// Display scale is 0-5; values outside it are stored as given.
    pub rating: Option<i32>,
    pub featured: Option<bool>,
    /// Free descriptive attribute (cover colour in the sample data). Search
    /// results are ordered by it.
    pub attribute: Option<String>,
}

/// Insertion input for the catalog store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    pub featured: Option<bool>,
    pub attribute: Option<String>,
}

impl NewItem {
    /// Creates input with only the required fields set.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Returns a trimmed copy, rejecting blank `title`/`author`.
    ///
    /// A blank `attribute` is stored as absent.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_text("title", &self.title)?,
            author: require_text("author", &self.author)?,
            year: self.year,
            rating: self.rating,
            featured: self.featured,
            attribute: optional_text(self.attribute.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::NewItem;
    use crate::model::text::ValidationError;

    #[test]
    fn normalized_trims_required_fields_and_drops_blank_attribute() {
        let input = NewItem::new("  Fermented Everything ", " Jim Kombucha")
            .rating(3)
            .attribute("   ");
        let normalized = input.normalized().unwrap();
        assert_eq!(normalized.title, "Fermented Everything");
        assert_eq!(normalized.author, "Jim Kombucha");
        assert_eq!(normalized.rating, Some(3));
        assert_eq!(normalized.attribute, None);
    }

    #[test]
    fn normalized_rejects_blank_author() {
        let err = NewItem::new("Small Batch", "").normalized().unwrap_err();
        assert_eq!(err, ValidationError::BlankField("author"));
    }
}
