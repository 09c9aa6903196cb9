//! Property tests for deck selection and navigation.

use eureka_core::deck::shuffle;
use eureka_core::navigation::{DropReason, Outcome};
use eureka_core::{
    Category, CategoryInfo, DeckSelector, Fact, FactCatalog, FactId, NavigationEngine,
    TransitionTimings,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

const CATEGORIES: [&str; 4] = ["science", "history", "space", "animals"];

fn arb_catalog() -> impl Strategy<Value = FactCatalog> {
    prop::collection::vec((0..CATEGORIES.len(), "[a-z ]{1,30}"), 0..24).prop_map(|entries| {
        let facts = entries
            .into_iter()
            .enumerate()
            .map(|(i, (cat, title))| {
                Fact::new(CATEGORIES[cat], format!("{i} {title}"), "description", "✨")
            })
            .collect();
        let categories = CATEGORIES
            .iter()
            .map(|key| CategoryInfo::new(*key, "•", *key))
            .collect();
        FactCatalog::new(facts, categories).unwrap()
    })
}

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::all()),
        (0..CATEGORIES.len()).prop_map(|i| Category::new(CATEGORIES[i])),
        Just(Category::new("unknown")),
    ]
}

fn sorted_titles<'a>(facts: impl Iterator<Item = &'a Fact>) -> Vec<String> {
    let mut titles: Vec<String> = facts.map(|f| f.title.clone()).collect();
    titles.sort();
    titles
}

proptest! {
    #[test]
    fn deck_matches_category(catalog in arb_catalog(), category in arb_category(), seed: u64) {
        let catalog = Arc::new(catalog);
        let mut deck = DeckSelector::with_seed(catalog.clone(), seed);
        deck.set_category(category.clone());

        prop_assert_eq!(deck.position(), 0);
        if category.is_all() {
            prop_assert_eq!(
                sorted_titles(deck.facts()),
                sorted_titles(catalog.facts().iter())
            );
        } else {
            prop_assert!(deck.facts().all(|f| f.category == category));
            prop_assert_eq!(deck.len(), catalog.count_in(&category));
        }
    }

    #[test]
    fn shuffle_is_a_permutation(mut items in prop::collection::vec(any::<u16>(), 0..64), seed: u64) {
        let mut before = items.clone();
        shuffle(&mut items, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(items.len(), before.len());
        items.sort_unstable();
        before.sort_unstable();
        prop_assert_eq!(items, before);
    }

    #[test]
    fn advance_wraps_after_multiples_of_len(catalog in arb_catalog(), seed: u64, start in 0usize..24, laps in 1usize..4) {
        let mut deck = DeckSelector::with_seed(Arc::new(catalog), seed);
        prop_assume!(!deck.is_empty());

        for _ in 0..start % deck.len() {
            deck.advance();
        }
        let origin = deck.position();
        for _ in 0..deck.len() * laps {
            deck.advance();
            prop_assert!(deck.position() < deck.len());
        }
        prop_assert_eq!(deck.position(), origin);
    }

    #[test]
    fn advances_in_the_window_are_dropped(offsets in prop::collection::vec(0u64..600, 1..8), seed: u64) {
        let catalog = Arc::new(FactCatalog::builtin());
        let deck = DeckSelector::with_seed(catalog, seed);
        let mut engine = NavigationEngine::with_deck(deck, TransitionTimings::default());
        let favorites: HashSet<FactId> = HashSet::new();
        engine.start(&favorites);

        let t0 = Instant::now();
        prop_assert!(engine.request_advance(t0).is_accepted());
        let position = engine.state().position;

        let mut offsets = offsets;
        offsets.sort_unstable();
        for offset in offsets {
            let now = t0 + Duration::from_millis(offset);
            engine.tick(now, &favorites);
            prop_assert_eq!(
                engine.request_advance(now),
                Outcome::Dropped(DropReason::Transitioning)
            );
            prop_assert_eq!(engine.state().position, position);
        }
    }
}
