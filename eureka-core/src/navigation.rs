//! The navigation state machine.
//!
//! The engine owns the deck and the transition lock. An advance runs as two
//! timed phases:
//!
//! ```text
//! Idle --request_advance--> Transitioning(Outgoing) --outgoing elapsed-->
//!      Transitioning(Incoming) --incoming elapsed--> Idle
//! ```
//!
//! The deck position moves as soon as the advance is accepted, the new fact is
//! rendered when the outgoing phase ends, and the lock is released only when
//! the incoming phase ends. Requests that arrive while the lock is held are
//! dropped, never queued.
//!
//! Timers are deadlines polled through [`NavigationEngine::tick`], so the
//! engine can be driven by a real event loop or by a simulated clock.

use crate::catalog::FactCatalog;
use crate::deck::DeckSelector;
use crate::fact::{Category, Fact, FactId};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Durations of the two transition phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    pub outgoing: Duration,
    pub incoming: Duration,
}

impl TransitionTimings {
    pub const DEFAULT_PHASE: Duration = Duration::from_millis(300);

    pub fn new(outgoing: Duration, incoming: Duration) -> Self {
        Self { outgoing, incoming }
    }

    /// Total time the lock is held for one advance.
    pub fn total(&self) -> Duration {
        self.outgoing + self.incoming
    }
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PHASE, Self::DEFAULT_PHASE)
    }
}

/// Anything that can answer "is this fact a favorite?".
pub trait FavoriteLookup {
    fn is_favorite(&self, id: &FactId) -> bool;
}

impl FavoriteLookup for std::collections::HashSet<FactId> {
    fn is_favorite(&self, id: &FactId) -> bool {
        self.contains(id)
    }
}

/// Phase of an in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The old card is leaving; the new one is rendered when this ends.
    Outgoing,
    /// The new card is arriving; the lock is released when this ends.
    Incoming,
}

/// Engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Transitioning { phase: Phase, deadline: Instant },
}

/// Snapshot of where navigation stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub category: Category,
    pub position: usize,
    pub locked: bool,
}

/// Something the renderer should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start the "card leaving" cue.
    OutgoingCue,
    /// Draw this fact as the current card.
    Rendered {
        fact: Fact,
        position: usize,
        deck_len: usize,
    },
    /// Start the "card arriving" cue.
    IncomingCue,
    /// The deck is empty; draw the empty-state view.
    EmptyState { category: Category },
    /// Favorite state of the fact that was just rendered.
    FavoriteIndicator { fact_id: FactId, favorited: bool },
    /// The deck was re-scoped to a new category.
    CategoryChanged { category: Category, deck_len: usize },
    /// The transition finished and input is accepted again.
    TransitionSettled,
}

/// Why a request was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// A transition is in flight.
    Transitioning,
    /// There is nothing to advance to.
    EmptyDeck,
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(Vec<Effect>),
    Dropped(DropReason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }

    /// Effects produced by the request (empty if dropped).
    pub fn into_effects(self) -> Vec<Effect> {
        match self {
            Self::Accepted(effects) => effects,
            Self::Dropped(_) => Vec::new(),
        }
    }
}

/// Navigation state machine over a [`DeckSelector`].
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    deck: DeckSelector,
    timings: TransitionTimings,
    state: NavState,
    /// Deck position of the card currently on screen.
    displayed: Option<usize>,
}

impl NavigationEngine {
    /// Create an engine over the whole catalog.
    pub fn new(catalog: Arc<FactCatalog>, timings: TransitionTimings) -> Self {
        Self::with_deck(DeckSelector::new(catalog), timings)
    }

    /// Create an engine around an existing deck (e.g. one with a fixed seed).
    pub fn with_deck(deck: DeckSelector, timings: TransitionTimings) -> Self {
        Self {
            deck,
            timings,
            state: NavState::Idle,
            displayed: None,
        }
    }

    /// Select `"all"` and render the first card immediately.
    pub fn start(&mut self, favorites: &impl FavoriteLookup) -> Vec<Effect> {
        self.state = NavState::Idle;
        self.deck.set_category(Category::all());

        let mut effects = vec![Effect::CategoryChanged {
            category: Category::all(),
            deck_len: self.deck.len(),
        }];
        self.render_current(favorites, &mut effects);
        effects
    }

    /// Ask to move to the next fact.
    ///
    /// Accepted only while idle and with a non-empty deck. The position moves
    /// immediately; the render happens when the outgoing phase ends.
    pub fn request_advance(&mut self, now: Instant) -> Outcome {
        if self.is_locked() {
            tracing::debug!("advance dropped: transition in flight");
            return Outcome::Dropped(DropReason::Transitioning);
        }
        if self.deck.is_empty() {
            return Outcome::Dropped(DropReason::EmptyDeck);
        }

        self.deck.advance();
        self.state = NavState::Transitioning {
            phase: Phase::Outgoing,
            deadline: now + self.timings.outgoing,
        };
        tracing::debug!(position = self.deck.position(), "advance accepted");

        Outcome::Accepted(vec![Effect::OutgoingCue])
    }

    /// Re-scope the deck to `category` and render its first card without cues.
    ///
    /// Category changes respect the transition lock: a request that arrives
    /// mid-transition is dropped so it cannot interleave with a pending
    /// phase.
    pub fn request_category_change(
        &mut self,
        category: Category,
        favorites: &impl FavoriteLookup,
    ) -> Outcome {
        if self.is_locked() {
            tracing::debug!(%category, "category change dropped: transition in flight");
            return Outcome::Dropped(DropReason::Transitioning);
        }

        self.deck.set_category(category.clone());
        let mut effects = vec![Effect::CategoryChanged {
            category,
            deck_len: self.deck.len(),
        }];
        self.render_current(favorites, &mut effects);
        Outcome::Accepted(effects)
    }

    /// Run every phase whose deadline has passed, in order.
    pub fn tick(&mut self, now: Instant, favorites: &impl FavoriteLookup) -> Vec<Effect> {
        let mut effects = Vec::new();

        while let NavState::Transitioning { phase, deadline } = self.state {
            if now < deadline {
                break;
            }
            match phase {
                Phase::Outgoing => {
                    self.render_current(favorites, &mut effects);
                    effects.push(Effect::IncomingCue);
                    // Scheduled from the phase-1 deadline so a late tick does
                    // not stretch the lock.
                    self.state = NavState::Transitioning {
                        phase: Phase::Incoming,
                        deadline: deadline + self.timings.incoming,
                    };
                }
                Phase::Incoming => {
                    self.state = NavState::Idle;
                    effects.push(Effect::TransitionSettled);
                }
            }
        }

        effects
    }

    /// Favorite indicator for the displayed card, read from `favorites`.
    ///
    /// Used after a toggle, when the set changed outside of navigation.
    pub fn refresh_favorite(&self, favorites: &impl FavoriteLookup) -> Option<Effect> {
        self.displayed_fact().map(|fact| {
            let fact_id = fact.id();
            Effect::FavoriteIndicator {
                favorited: favorites.is_favorite(&fact_id),
                fact_id,
            }
        })
    }

    fn render_current(&mut self, favorites: &impl FavoriteLookup, effects: &mut Vec<Effect>) {
        match self.deck.current() {
            Some(fact) => {
                let fact_id = fact.id();
                effects.push(Effect::Rendered {
                    fact: fact.clone(),
                    position: self.deck.position(),
                    deck_len: self.deck.len(),
                });
                effects.push(Effect::FavoriteIndicator {
                    favorited: favorites.is_favorite(&fact_id),
                    fact_id,
                });
                self.displayed = Some(self.deck.position());
            }
            None => {
                effects.push(Effect::EmptyState {
                    category: self.deck.category().clone(),
                });
                self.displayed = None;
            }
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, NavState::Transitioning { .. })
    }

    /// When the next scheduled phase is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            NavState::Idle => None,
            NavState::Transitioning { deadline, .. } => Some(deadline),
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            category: self.deck.category().clone(),
            position: self.deck.position(),
            locked: self.is_locked(),
        }
    }

    /// The fact at the deck position (may be ahead of the screen mid-transition).
    pub fn current(&self) -> Option<&Fact> {
        self.deck.current()
    }

    /// The fact the renderer was last told to draw.
    pub fn displayed_fact(&self) -> Option<&Fact> {
        self.displayed.and_then(|position| self.deck.fact_at(position))
    }

    pub fn deck(&self) -> &DeckSelector {
        &self.deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;
    use std::collections::HashSet;

    fn engine() -> NavigationEngine {
        let deck = DeckSelector::with_seed(Arc::new(sample_catalog()), 11);
        NavigationEngine::with_deck(deck, TransitionTimings::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_start_renders_immediately() {
        let mut engine = engine();
        let effects = engine.start(&HashSet::<FactId>::new());
        assert!(matches!(effects[0], Effect::CategoryChanged { deck_len: 5, .. }));
        assert!(matches!(effects[1], Effect::Rendered { position: 0, .. }));
        assert!(matches!(effects[2], Effect::FavoriteIndicator { favorited: false, .. }));
        assert!(!engine.is_locked());
    }

    #[test]
    fn test_advance_runs_two_phases() {
        let mut engine = engine();
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);
        let t0 = Instant::now();

        let outcome = engine.request_advance(t0);
        assert_eq!(outcome, Outcome::Accepted(vec![Effect::OutgoingCue]));
        assert_eq!(engine.state().position, 1);
        assert!(engine.is_locked());

        // Nothing is due before the outgoing phase ends
        assert!(engine.tick(t0 + ms(299), &favorites).is_empty());

        let effects = engine.tick(t0 + ms(300), &favorites);
        assert!(matches!(effects[0], Effect::Rendered { position: 1, .. }));
        assert!(matches!(effects[1], Effect::FavoriteIndicator { .. }));
        assert_eq!(effects[2], Effect::IncomingCue);
        assert!(engine.is_locked());

        let effects = engine.tick(t0 + ms(600), &favorites);
        assert_eq!(effects, vec![Effect::TransitionSettled]);
        assert!(!engine.is_locked());
    }

    #[test]
    fn test_late_tick_runs_both_phases_in_order() {
        let mut engine = engine();
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);
        let t0 = Instant::now();
        engine.request_advance(t0);

        let effects = engine.tick(t0 + ms(5_000), &favorites);
        assert!(matches!(effects[0], Effect::Rendered { .. }));
        assert_eq!(effects.last(), Some(&Effect::TransitionSettled));
        assert!(!engine.is_locked());
    }

    #[test]
    fn test_advance_while_locked_is_dropped() {
        let mut engine = engine();
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);
        let t0 = Instant::now();

        assert!(engine.request_advance(t0).is_accepted());
        let position = engine.state().position;
        assert_eq!(
            engine.request_advance(t0 + ms(100)),
            Outcome::Dropped(DropReason::Transitioning)
        );
        assert_eq!(
            engine.request_advance(t0 + ms(450)),
            Outcome::Dropped(DropReason::Transitioning)
        );
        assert_eq!(engine.state().position, position);

        engine.tick(t0 + ms(600), &favorites);
        assert!(engine.request_advance(t0 + ms(601)).is_accepted());
    }

    #[test]
    fn test_category_change_respects_lock() {
        let mut engine = engine();
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);
        let t0 = Instant::now();
        engine.request_advance(t0);

        let outcome = engine.request_category_change(Category::new("history"), &favorites);
        assert_eq!(outcome, Outcome::Dropped(DropReason::Transitioning));
        assert!(engine.state().category.is_all());
    }

    #[test]
    fn test_category_change_renders_without_cues() {
        let mut engine = engine();
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);

        let effects = engine
            .request_category_change(Category::new("history"), &favorites)
            .into_effects();
        assert!(effects
            .iter()
            .all(|e| !matches!(e, Effect::OutgoingCue | Effect::IncomingCue)));
        assert!(matches!(effects[0], Effect::CategoryChanged { deck_len: 2, .. }));
        assert!(matches!(effects[1], Effect::Rendered { position: 0, .. }));
        assert!(!engine.is_locked());
    }

    #[test]
    fn test_empty_category_shows_empty_state() {
        let mut engine = engine();
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);

        let effects = engine
            .request_category_change(Category::new("cooking"), &favorites)
            .into_effects();
        assert_eq!(
            effects[1],
            Effect::EmptyState {
                category: Category::new("cooking")
            }
        );
        assert!(engine.displayed_fact().is_none());
        assert_eq!(
            engine.request_advance(Instant::now()),
            Outcome::Dropped(DropReason::EmptyDeck)
        );
    }

    #[test]
    fn test_favorite_indicator_follows_rendered_fact() {
        let mut engine = engine();
        let mut favorites = HashSet::<FactId>::new();
        engine.start(&favorites);
        let second = engine.deck().fact_at(1).unwrap().id();
        favorites.insert(second.clone());

        let t0 = Instant::now();
        engine.request_advance(t0);
        let effects = engine.tick(t0 + ms(300), &favorites);
        assert!(effects.contains(&Effect::FavoriteIndicator {
            fact_id: second,
            favorited: true,
        }));
    }

    #[test]
    fn test_displayed_fact_lags_position_during_outgoing_phase() {
        let mut engine = engine();
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);
        let first = engine.current().cloned();
        let t0 = Instant::now();

        engine.request_advance(t0);
        assert_eq!(engine.displayed_fact().cloned(), first);
        engine.tick(t0 + ms(300), &favorites);
        assert_eq!(engine.displayed_fact(), engine.current());
    }

    #[test]
    fn test_custom_timings() {
        let deck = DeckSelector::with_seed(Arc::new(sample_catalog()), 3);
        let mut engine =
            NavigationEngine::with_deck(deck, TransitionTimings::new(ms(200), ms(300)));
        let favorites = HashSet::<FactId>::new();
        engine.start(&favorites);
        let t0 = Instant::now();
        engine.request_advance(t0);
        assert_eq!(engine.next_deadline(), Some(t0 + ms(200)));
        engine.tick(t0 + ms(200), &favorites);
        assert_eq!(engine.next_deadline(), Some(t0 + ms(500)));
    }
}
