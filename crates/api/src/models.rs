use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A book record. The title is its identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title of the book, unique and non-empty
    pub title: String,
    /// Author of the book
    #[serde(default)]
    pub author: Option<String>,
    /// Publication date, serialized as `YYYY-MM-DD`
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    /// Edition label, e.g. "2nd"
    #[serde(default)]
    pub edition: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Genre of the book
    #[serde(default)]
    pub genre: Option<String>,
}

impl Book {
    /// A book carrying only its title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A named group of books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique collection name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}
