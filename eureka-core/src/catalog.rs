//! The immutable fact catalog and its category metadata.
//!
//! A catalog is provided once at startup, either the built-in set or a JSON
//! file of the form:
//!
//! ```json
//! {
//!   "categories": [{ "key": "space", "emoji": "🚀", "label": "Space" }],
//!   "facts": [{ "category": "space", "title": "...", "description": "...", "emoji": "🪐" }]
//! }
//! ```

use crate::fact::{Category, CategoryInfo, Fact};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors from loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fact '{title}' uses the reserved category \"all\"")]
    ReservedCategory { title: String },
}

/// Ordered, immutable sequence of facts plus per-category presentation data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactCatalog {
    #[serde(default)]
    categories: Vec<CategoryInfo>,
    facts: Vec<Fact>,
}

impl FactCatalog {
    /// Build a catalog, rejecting facts tagged with the reserved `"all"` category.
    pub fn new(facts: Vec<Fact>, categories: Vec<CategoryInfo>) -> Result<Self, CatalogError> {
        if let Some(fact) = facts.iter().find(|f| f.category.is_all()) {
            return Err(CatalogError::ReservedCategory {
                title: fact.title.clone(),
            });
        }
        Ok(Self { categories, facts })
    }

    /// The catalog that ships with the application.
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN_CATEGORIES.clone(),
            facts: BUILTIN_FACTS.clone(),
        }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let parsed: FactCatalog = serde_json::from_str(json)?;
        Self::new(parsed.facts, parsed.categories)
    }

    /// Load a catalog from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn get(&self, index: usize) -> Option<&Fact> {
        self.facts.get(index)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Known categories in display order.
    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    /// Presentation data for a category, if it is known.
    pub fn category_info(&self, category: &Category) -> Option<&CategoryInfo> {
        self.categories.iter().find(|info| &info.key == category)
    }

    /// Catalog indices of the facts matching `category` (`"all"` matches everything).
    pub fn indices_for(&self, category: &Category) -> Vec<usize> {
        self.facts
            .iter()
            .enumerate()
            .filter(|(_, fact)| category.is_all() || &fact.category == category)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of facts in a category.
    pub fn count_in(&self, category: &Category) -> usize {
        if category.is_all() {
            return self.facts.len();
        }
        self.facts.iter().filter(|f| &f.category == category).count()
    }
}

lazy_static::lazy_static! {
    /// Categories of the built-in catalog.
    pub static ref BUILTIN_CATEGORIES: Vec<CategoryInfo> = vec![
        CategoryInfo::new("science", "🔬", "Science"),
        CategoryInfo::new("history", "📜", "History"),
        CategoryInfo::new("nature", "🌿", "Nature"),
        CategoryInfo::new("space", "🚀", "Space"),
        CategoryInfo::new("animals", "🐾", "Animals"),
        CategoryInfo::new("art", "🎨", "Art"),
    ];

    /// Facts of the built-in catalog.
    pub static ref BUILTIN_FACTS: Vec<Fact> = vec![
        // Science
        Fact::new(
            "science",
            "Honey never spoils",
            "Archaeologists have found pots of honey in ancient Egyptian tombs that are over 3,000 years old and still perfectly edible.",
            "🍯",
        )
        .with_era("Ancient Egypt")
        .with_location("Egypt"),
        Fact::new(
            "science",
            "Water can boil and freeze at the same time",
            "At its triple point, about 0.01 °C and 611 pascals, water exists as solid, liquid and gas simultaneously.",
            "🧊",
        ),
        Fact::new(
            "science",
            "Bananas are slightly radioactive",
            "Bananas contain potassium-40, a naturally radioactive isotope. You would need to eat millions of them at once for it to matter.",
            "🍌",
        ),
        // History
        Fact::new(
            "history",
            "Cleopatra and the Moon landing",
            "Cleopatra lived closer in time to the Moon landing than to the construction of the Great Pyramid of Giza.",
            "🏺",
        )
        .with_era("69–30 BC")
        .with_location("Alexandria"),
        Fact::new(
            "history",
            "The shortest war in history",
            "The Anglo-Zanzibar War lasted somewhere between 38 and 45 minutes before the sultan's forces surrendered.",
            "⚔️",
        )
        .with_era("1896")
        .with_location("Zanzibar"),
        Fact::new(
            "history",
            "Oxford is older than the Aztec Empire",
            "Teaching took place at Oxford by 1096, while the Aztec capital Tenochtitlan was founded in 1325.",
            "🎓",
        )
        .with_location("Oxford"),
        // Nature
        Fact::new(
            "nature",
            "Trees talk underground",
            "Forest trees exchange nutrients and chemical warning signals through fungal networks that link their roots.",
            "🌳",
        ),
        Fact::new(
            "nature",
            "Lightning is hotter than the Sun",
            "A lightning bolt can heat the surrounding air to about 30,000 °C, roughly five times the temperature of the Sun's surface.",
            "⚡",
        ),
        // Space
        Fact::new(
            "space",
            "A day on Venus is longer than its year",
            "Venus takes about 243 Earth days to spin once on its axis but only about 225 days to orbit the Sun.",
            "🪐",
        ),
        Fact::new(
            "space",
            "Footprints on the Moon",
            "With no wind or water to erode them, the astronauts' footprints on the Moon can last for millions of years.",
            "👣",
        )
        .with_era("1969")
        .with_location("Sea of Tranquility"),
        Fact::new(
            "space",
            "Neutron stars are unimaginably dense",
            "A teaspoon of neutron star material would weigh around a billion tonnes on Earth.",
            "✨",
        ),
        // Animals
        Fact::new(
            "animals",
            "Octopuses have three hearts",
            "Two hearts pump blood through the gills and a third pumps it to the rest of the body.",
            "🐙",
        ),
        Fact::new(
            "animals",
            "Wombats make cube-shaped droppings",
            "Wombats are the only known animals that produce cubes, which they stack to mark their territory.",
            "🐾",
        )
        .with_location("Australia"),
        Fact::new(
            "animals",
            "Sea otters hold hands",
            "Sea otters often hold hands while they sleep so they do not drift apart.",
            "🦦",
        ),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = FactCatalog::builtin();
        assert!(!catalog.is_empty());
        assert!(catalog.facts().iter().all(|f| !f.category.is_all()));
        // every fact belongs to a known category
        for fact in catalog.facts() {
            assert!(catalog.category_info(&fact.category).is_some(), "{}", fact.title);
        }
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = FactCatalog::builtin();
        let mut ids: Vec<_> = catalog.facts().iter().map(Fact::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_indices_for_category() {
        let catalog = FactCatalog::builtin();
        let space = catalog.indices_for(&Category::new("space"));
        assert_eq!(space.len(), 3);
        assert!(space
            .iter()
            .all(|&i| catalog.get(i).unwrap().category.as_str() == "space"));
        assert_eq!(catalog.indices_for(&Category::all()).len(), catalog.len());
        assert!(catalog.indices_for(&Category::new("art")).is_empty());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "categories": [{ "key": "space", "emoji": "🚀", "label": "Space" }],
            "facts": [
                { "category": "space", "title": "Moon", "description": "Round", "emoji": "🌕", "era": "always" }
            ]
        }"#;
        let catalog = FactCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.facts()[0].era.as_deref(), Some("always"));
        assert_eq!(catalog.categories()[0].label, "Space");
    }

    #[test]
    fn test_from_json_rejects_reserved_category() {
        let json = r#"{ "facts": [{ "category": "all", "title": "X", "description": "Y", "emoji": "❓" }] }"#;
        let err = FactCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::ReservedCategory { .. }));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            FactCatalog::from_json_str("not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
