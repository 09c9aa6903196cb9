//! Deck selection: the shuffled, category-filtered working sequence.

use crate::catalog::FactCatalog;
use crate::fact::{Category, Fact};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Shuffle a slice in place (Fisher-Yates).
///
/// For `i` from the last index down to 1, pick `j` uniformly in `[0, i]` and
/// swap positions `i` and `j`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// The active deck and the position within it.
///
/// The deck holds catalog indices in shuffled order. An empty deck is a valid
/// state: `current()` is `None` and `advance()` does nothing.
#[derive(Debug, Clone)]
pub struct DeckSelector {
    catalog: Arc<FactCatalog>,
    category: Category,
    order: Vec<usize>,
    position: usize,
    rng: StdRng,
}

impl DeckSelector {
    /// Create a selector over the whole catalog, shuffled with OS entropy.
    pub fn new(catalog: Arc<FactCatalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Create a selector with a deterministic shuffle sequence.
    pub fn with_seed(catalog: Arc<FactCatalog>, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Arc<FactCatalog>, rng: StdRng) -> Self {
        let mut deck = Self {
            catalog,
            category: Category::all(),
            order: Vec::new(),
            position: 0,
            rng,
        };
        deck.set_category(Category::all());
        deck
    }

    /// Filter the catalog to `category`, reshuffle, and reset to position 0.
    ///
    /// `"all"` takes the whole catalog and is shuffled like any other category.
    pub fn set_category(&mut self, category: Category) {
        let mut order = self.catalog.indices_for(&category);
        shuffle(&mut order, &mut self.rng);

        self.order = order;
        self.category = category;
        self.position = 0;
    }

    /// The fact at the current position, or `None` if the deck is empty.
    pub fn current(&self) -> Option<&Fact> {
        self.order
            .get(self.position)
            .and_then(|&index| self.catalog.get(index))
    }

    /// Step to the next fact, wrapping at the end. No-op on an empty deck.
    pub fn advance(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.position = (self.position + 1) % self.order.len();
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn catalog(&self) -> &Arc<FactCatalog> {
        &self.catalog
    }

    /// Facts in deck order.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> + '_ {
        self.order.iter().filter_map(|&index| self.catalog.get(index))
    }

    /// The fact at an arbitrary deck position.
    pub fn fact_at(&self, position: usize) -> Option<&Fact> {
        self.order
            .get(position)
            .and_then(|&index| self.catalog.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;

    fn deck(seed: u64) -> DeckSelector {
        DeckSelector::with_seed(Arc::new(sample_catalog()), seed)
    }

    #[test]
    fn test_new_deck_covers_whole_catalog() {
        let deck = deck(1);
        assert!(deck.category().is_all());
        assert_eq!(deck.len(), 5);
        assert_eq!(deck.position(), 0);
        assert!(deck.current().is_some());
    }

    #[test]
    fn test_set_category_filters() {
        let mut deck = deck(2);
        deck.set_category(Category::new("history"));
        assert_eq!(deck.len(), 2);
        assert!(deck.facts().all(|f| f.category.as_str() == "history"));
    }

    #[test]
    fn test_set_category_resets_position() {
        let mut deck = deck(3);
        deck.advance();
        deck.advance();
        deck.set_category(Category::new("science"));
        assert_eq!(deck.position(), 0);
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let mut deck = deck(4);
        deck.set_category(Category::new("cooking"));
        assert!(deck.is_empty());
        assert!(deck.current().is_none());
        deck.advance();
        assert_eq!(deck.position(), 0);
    }

    #[test]
    fn test_advance_wraps() {
        let mut deck = deck(5);
        deck.set_category(Category::new("science"));
        let first = deck.current().cloned();
        for _ in 0..3 {
            deck.advance();
        }
        assert_eq!(deck.position(), 0);
        assert_eq!(deck.current().cloned(), first);
    }

    #[test]
    fn test_shuffle_with_seed_is_reproducible() {
        let a: Vec<_> = deck(42).facts().cloned().collect();
        let b: Vec<_> = deck(42).facts().cloned().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_is_reshuffled_each_time() {
        // With 5 facts there are 120 orders; across 20 reshuffles at least one
        // must differ from catalog order.
        let catalog = Arc::new(sample_catalog());
        let mut deck = DeckSelector::with_seed(catalog.clone(), 7);
        let catalog_order: Vec<_> = catalog.facts().to_vec();
        let mut saw_different = false;
        for _ in 0..20 {
            deck.set_category(Category::all());
            if deck.facts().cloned().collect::<Vec<_>>() != catalog_order {
                saw_different = true;
            }
        }
        assert!(saw_different);
    }

    #[test]
    fn test_shuffle_small_slices() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }
}
