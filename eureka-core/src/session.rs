//! EurekaSession - the application context.
//!
//! One session owns every piece of mutable state (navigation engine and deck,
//! gesture recognizer, favorites, notifications, share chain) for the life of
//! the process. It is built once at startup and handed to whatever runs the
//! event loop.

use crate::catalog::{CatalogError, FactCatalog};
use crate::config::EurekaConfig;
use crate::deck::DeckSelector;
use crate::fact::{Category, Fact};
use crate::favorites::FavoritesStore;
use crate::gesture::{Gesture, GestureRecognizer};
use crate::navigation::{Effect, NavigationEngine, NavigationState, Outcome};
use crate::notify::Notifications;
use crate::persist::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::share::{ShareChain, ShareOutcome, ShareRequest};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Shown after a fact is added to favorites.
pub const MSG_FAVORITE_ADDED: &str = "❤️ Saved to favorites!";
/// Shown after a fact is removed from favorites.
pub const MSG_FAVORITE_REMOVED: &str = "💔 Removed from favorites";
/// Shown after a fact is copied to the clipboard.
pub const MSG_COPIED: &str = "📋 Copied to clipboard!";

/// Errors from opening a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// The single owner of all navigation, gesture and favorites state.
pub struct EurekaSession {
    engine: NavigationEngine,
    gestures: GestureRecognizer,
    favorites: FavoritesStore,
    notifications: Notifications,
    share: ShareChain,
    share_link: String,
}

impl EurekaSession {
    /// Open a session from configuration.
    ///
    /// Loads the configured catalog (or the built-in one) and favorites file
    /// (or an in-memory store). Favorites never fail to load; a bad catalog
    /// file does.
    pub async fn open(config: &EurekaConfig, share: ShareChain) -> Result<Self, SessionError> {
        let catalog = match &config.catalog_path {
            Some(path) => FactCatalog::load(path).await?,
            None => FactCatalog::builtin(),
        };

        let store: Arc<dyn KeyValueStore> = match &config.favorites_path {
            Some(path) => Arc::new(JsonFileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        };

        tracing::info!(
            facts = catalog.len(),
            categories = catalog.categories().len(),
            persistent = config.favorites_path.is_some(),
            "opening session"
        );

        Ok(Self::new(config, catalog, store, share).await)
    }

    /// Build a session from already-loaded parts.
    pub async fn new(
        config: &EurekaConfig,
        catalog: FactCatalog,
        store: Arc<dyn KeyValueStore>,
        share: ShareChain,
    ) -> Self {
        let deck = DeckSelector::new(Arc::new(catalog));
        Self::with_deck(config, deck, store, share).await
    }

    /// Build a session around a prepared deck (e.g. one with a fixed seed).
    pub async fn with_deck(
        config: &EurekaConfig,
        deck: DeckSelector,
        store: Arc<dyn KeyValueStore>,
        share: ShareChain,
    ) -> Self {
        let favorites = FavoritesStore::load_with_key(store, config.favorites_key.clone()).await;

        Self {
            engine: NavigationEngine::with_deck(deck, config.timings),
            gestures: GestureRecognizer::new(config.thresholds),
            favorites,
            notifications: Notifications::new(config.notification_ttl),
            share,
            share_link: config.share_link.clone(),
        }
    }

    /// Select `"all"` and render the first card.
    pub fn start(&mut self) -> Vec<Effect> {
        self.engine.start(&self.favorites)
    }

    /// Explicit "next fact" action.
    pub fn next(&mut self, now: Instant) -> Outcome {
        self.engine.request_advance(now)
    }

    /// Re-scope the deck to a category.
    pub fn set_category(&mut self, category: impl Into<Category>) -> Outcome {
        self.engine
            .request_category_change(category.into(), &self.favorites)
    }

    /// Advance timers: transition phases and notification expiry.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        self.notifications.tick(now);
        self.engine.tick(now, &self.favorites)
    }

    /// Toggle the favorite state of the card on screen.
    ///
    /// Returns the refreshed favorite indicator, or `None` when no fact is
    /// displayed.
    pub async fn toggle_favorite(&mut self, now: Instant) -> Option<Effect> {
        let fact_id = self.engine.displayed_fact()?.id();

        let favorited = self.favorites.toggle(&fact_id).await;
        let message = if favorited {
            MSG_FAVORITE_ADDED
        } else {
            MSG_FAVORITE_REMOVED
        };
        self.notifications.push(message, now);

        self.engine.refresh_favorite(&self.favorites)
    }

    /// Show a transient message for the configured notification window.
    pub fn notify(&mut self, message: impl Into<String>, now: Instant) {
        self.notifications.push(message, now);
    }

    /// Hide every live notification.
    pub fn dismiss_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Share the card on screen through the fallback chain.
    pub async fn share_current(&mut self, now: Instant) -> ShareOutcome {
        let Some(fact) = self.engine.displayed_fact() else {
            return ShareOutcome::NothingToShare;
        };
        let request = ShareRequest::for_fact(fact, self.share_link.clone());

        let outcome = self.share.share(&request).await;
        if outcome == ShareOutcome::Copied {
            self.notifications.push(MSG_COPIED, now);
        }
        outcome
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.gestures.touch_start(x, y);
    }

    /// Returns `true` when native scrolling should be suppressed.
    pub fn touch_move(&mut self, x: f32, y: f32) -> bool {
        self.gestures.touch_move(x, y)
    }

    /// Finish a touch. `Some` when it was recognized as a swipe.
    pub fn touch_end(&mut self, x: f32, now: Instant) -> Option<Outcome> {
        let gesture = self.gestures.touch_end(x)?;
        Some(self.handle_gesture(gesture, now))
    }

    pub fn touch_cancel(&mut self) {
        self.gestures.touch_cancel();
    }

    pub fn mouse_down(&mut self, x: f32) {
        self.gestures.mouse_down(x);
    }

    /// Finish a mouse drag. `Some` when it was recognized as a swipe.
    pub fn mouse_up(&mut self, x: f32, now: Instant) -> Option<Outcome> {
        let gesture = self.gestures.mouse_up(x)?;
        Some(self.handle_gesture(gesture, now))
    }

    fn handle_gesture(&mut self, gesture: Gesture, now: Instant) -> Outcome {
        match gesture {
            Gesture::Advance => self.next(now),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn catalog(&self) -> &Arc<FactCatalog> {
        self.engine.deck().catalog()
    }

    pub fn engine(&self) -> &NavigationEngine {
        &self.engine
    }

    pub fn state(&self) -> NavigationState {
        self.engine.state()
    }

    /// The fact on screen.
    pub fn displayed_fact(&self) -> Option<&Fact> {
        self.engine.displayed_fact()
    }

    /// Whether the fact on screen is a favorite.
    pub fn displayed_is_favorite(&self) -> bool {
        self.displayed_fact()
            .map(|fact| self.favorites.contains(&fact.id()))
            .unwrap_or(false)
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    /// Earliest pending timer across transitions and notifications.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.engine.next_deadline(), self.notifications.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl std::fmt::Debug for EurekaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EurekaSession")
            .field("state", &self.engine.state())
            .field("favorites", &self.favorites.len())
            .field("share", &self.share)
            .finish_non_exhaustive()
    }
}
