//! Testing utilities for the fact deck.
//!
//! This module provides tools for integration testing:
//! - Small deterministic catalogs
//! - `FailingStore` for exercising best-effort persistence
//! - `ScriptedShareTarget` for driving the share fallback chain
//! - `TestHarness` for scripted sessions on a virtual clock
//! - Assertion helpers for verifying deck state

use crate::catalog::FactCatalog;
use crate::config::EurekaConfig;
use crate::deck::DeckSelector;
use crate::fact::{CategoryInfo, Fact};
use crate::headless::HeadlessDeck;
use crate::persist::{KeyValueStore, MemoryStore, PersistError};
use crate::session::EurekaSession;
use crate::share::{ShareChain, ShareError, ShareRequest, ShareTarget};
use async_trait::async_trait;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

/// Seed used by [`TestHarness::new`].
pub const DEFAULT_SEED: u64 = 7;

/// Five facts: three `science`, two `history`.
pub fn sample_catalog() -> FactCatalog {
    let facts = vec![
        Fact::new(
            "science",
            "Honey never spoils",
            "Edible honey has been found in ancient tombs.",
            "🍯",
        ),
        Fact::new(
            "science",
            "Bananas are berries",
            "Botanically, strawberries are not.",
            "🍌",
        ),
        Fact::new(
            "science",
            "Hot water can freeze faster",
            "Known as the Mpemba effect.",
            "🧊",
        ),
        Fact::new(
            "history",
            "Cleopatra and the Moon landing",
            "She lived closer in time to it than to the Great Pyramid.",
            "🏺",
        )
        .with_era("69-30 BC"),
        Fact::new(
            "history",
            "Oxford is older than the Aztecs",
            "Teaching there began by 1096.",
            "🎓",
        )
        .with_location("Oxford, England"),
    ];
    let categories = vec![
        CategoryInfo::new("science", "🔬", "Science"),
        CategoryInfo::new("history", "📜", "History"),
        CategoryInfo::new("art", "🎨", "Art"),
    ];
    FactCatalog::new(facts, categories).expect("sample catalog is valid")
}

/// A catalog holding exactly one fact.
pub fn single_fact_catalog() -> FactCatalog {
    FactCatalog::new(
        vec![Fact::new(
            "space",
            "Footprints on the Moon",
            "With no wind they can last for millions of years.",
            "👣",
        )],
        vec![CategoryInfo::new("space", "🚀", "Space")],
    )
    .expect("single fact catalog is valid")
}

/// A storage medium that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Err(PersistError::Unavailable("storage disabled".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Unavailable("storage disabled".to_string()))
    }
}

/// A share target with a fixed result that records every request.
///
/// Clones share the request log, so a test can keep one handle and give the
/// other to a [`ShareChain`].
#[derive(Debug, Clone)]
pub struct ScriptedShareTarget {
    name: String,
    result: Result<(), ShareError>,
    requests: Arc<Mutex<Vec<ShareRequest>>>,
}

impl ScriptedShareTarget {
    pub fn succeeding(name: impl Into<String>) -> Self {
        Self::with_result(name, Ok(()))
    }

    pub fn failing(name: impl Into<String>, error: ShareError) -> Self {
        Self::with_result(name, Err(error))
    }

    fn with_result(name: impl Into<String>, result: Result<(), ShareError>) -> Self {
        Self {
            name: name.into(),
            result,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request this target has seen, in order.
    pub fn requests(&self) -> Vec<ShareRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ShareTarget for ScriptedShareTarget {
    fn name(&self) -> &str {
        &self.name
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.result.clone()
    }
}

/// Test harness for scripted deck sessions.
///
/// Uses a seeded deck, an in-memory favorites store and a clipboard-only
/// share chain. Derefs to [`HeadlessDeck`] for driving the session.
pub struct TestHarness {
    deck: HeadlessDeck,
    store: Arc<MemoryStore>,
    clipboard: ScriptedShareTarget,
}

impl TestHarness {
    /// Harness over [`sample_catalog`] with [`DEFAULT_SEED`].
    pub async fn new() -> Self {
        Self::with_catalog(sample_catalog(), DEFAULT_SEED).await
    }

    /// Harness over any catalog and seed.
    pub async fn with_catalog(catalog: FactCatalog, seed: u64) -> Self {
        Self::with_store(catalog, seed, Arc::new(MemoryStore::new())).await
    }

    /// Harness whose favorites live in `store`, e.g. to simulate a restart.
    pub async fn with_store(catalog: FactCatalog, seed: u64, store: Arc<MemoryStore>) -> Self {
        let clipboard = ScriptedShareTarget::succeeding("clipboard");
        let deck = DeckSelector::with_seed(Arc::new(catalog), seed);
        let session = EurekaSession::with_deck(
            &EurekaConfig::default(),
            deck,
            store.clone(),
            ShareChain::new().with_clipboard(clipboard.clone()),
        )
        .await;

        Self {
            deck: HeadlessDeck::from_session(session),
            store,
            clipboard,
        }
    }

    /// Title of the fact on screen.
    pub fn displayed_title(&self) -> Option<String> {
        self.deck.session().displayed_fact().map(|f| f.title.clone())
    }

    /// Advance and wait for the transition to finish.
    pub fn next_settled(&mut self) -> Option<String> {
        self.deck.next();
        self.deck.settle();
        self.displayed_title()
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn clipboard(&self) -> &ScriptedShareTarget {
        &self.clipboard
    }
}

impl Deref for TestHarness {
    type Target = HeadlessDeck;

    fn deref(&self) -> &HeadlessDeck {
        &self.deck
    }
}

impl DerefMut for TestHarness {
    fn deref_mut(&mut self) -> &mut HeadlessDeck {
        &mut self.deck
    }
}

// =============================================================================
// Assertion Helpers
// =============================================================================

/// Assert the fact on screen has this title.
pub fn assert_displayed(harness: &TestHarness, title: &str) {
    assert_eq!(
        harness.displayed_title().as_deref(),
        Some(title),
        "Expected '{title}' on screen"
    );
}

/// Assert the empty state is shown.
pub fn assert_empty_state(harness: &TestHarness) {
    assert!(
        harness.displayed_title().is_none(),
        "Expected the empty state, found {:?}",
        harness.displayed_title()
    );
}

/// Assert navigation input is being dropped.
pub fn assert_locked(harness: &TestHarness) {
    assert!(harness.status().locked, "Expected a transition in flight");
}

/// Assert navigation input is accepted.
pub fn assert_idle(harness: &TestHarness) {
    assert!(!harness.status().locked, "Expected the deck to be idle");
}

/// Assert the most recent notification.
pub fn assert_notification(harness: &TestHarness, message: &str) {
    assert_eq!(
        harness.status().notification.as_deref(),
        Some(message),
        "Expected notification '{message}'"
    );
}
