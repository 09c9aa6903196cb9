//! Fact records, categories and the favorite identifiers derived from them.
//!
//! A [`FactId`] is computed from the fact's category and a normalized prefix
//! of its title, never from its position in the catalog, so favorites survive
//! restarts and catalog reordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of title characters (before normalization) that go into a [`FactId`].
pub const FACT_ID_TITLE_CHARS: usize = 20;

/// A category tag.
///
/// The reserved key `"all"` means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// The reserved key for the unfiltered deck.
    pub const ALL_KEY: &'static str = "all";

    /// Create a category from its key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The unfiltered category.
    pub fn all() -> Self {
        Self(Self::ALL_KEY.to_string())
    }

    /// Whether this is the reserved `"all"` tag.
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL_KEY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Presentation metadata for a known category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub key: Category,
    pub emoji: String,
    pub label: String,
}

impl CategoryInfo {
    pub fn new(key: impl Into<Category>, emoji: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            emoji: emoji.into(),
            label: label.into(),
        }
    }
}

/// Stable identifier used as the favorites key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(String);

impl FactId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FactId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for FactId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// A single piece of trivia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Fact {
    pub fn new(
        category: impl Into<Category>,
        title: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            description: description.into(),
            emoji: emoji.into(),
            era: None,
            location: None,
        }
    }

    /// Set the historical era shown under the card.
    pub fn with_era(mut self, era: impl Into<String>) -> Self {
        self.era = Some(era.into());
        self
    }

    /// Set the location shown under the card.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The favorite identifier for this fact.
    pub fn id(&self) -> FactId {
        fact_id(self)
    }
}

/// Derive the favorite identifier of a fact.
///
/// `"{category}-{first 20 title chars}"`, every whitespace run collapsed to a
/// single `-`, lowercased. Two titles in the same category that only differ
/// after the 20th character map to the same id.
pub fn fact_id(fact: &Fact) -> FactId {
    let prefix: String = fact.title.chars().take(FACT_ID_TITLE_CHARS).collect();
    let raw = format!("{}-{}", fact.category, prefix);

    let mut id = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            id.extend(c.to_lowercase());
        }
    }

    FactId(id)
}
