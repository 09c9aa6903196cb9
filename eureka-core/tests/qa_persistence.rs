//! QA tests for favorites persistence.
//!
//! These tests verify favorites survive a restart and that a broken medium
//! never breaks the session.
//! Run with: `cargo test -p eureka-core --test qa_persistence`

use eureka_core::favorites::{FavoritesStore, FAVORITES_KEY};
use eureka_core::persist::{JsonFileStore, KeyValueStore, MemoryStore};
use eureka_core::testing::{assert_notification, sample_catalog, FailingStore, TestHarness};
use eureka_core::session::{MSG_FAVORITE_ADDED, MSG_FAVORITE_REMOVED};
use eureka_core::{EurekaConfig, FactId, HeadlessDeck, ShareChain};
use std::sync::Arc;
use tempfile::TempDir;

// =============================================================================
// TEST 1: Favorites survive a restart
// =============================================================================

#[tokio::test]
async fn test_favorites_survive_restart() {
    let store = Arc::new(MemoryStore::new());

    let mut harness = TestHarness::with_store(sample_catalog(), 1, store.clone()).await;
    let id = harness.session().displayed_fact().unwrap().id();
    harness.favorite().await;
    drop(harness);

    // A different seed shows a different order, but identity is by content.
    let harness = TestHarness::with_store(sample_catalog(), 2, store).await;
    assert!(harness.session().favorites().contains(&id));
}

#[tokio::test]
async fn test_favorites_file_roundtrip() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("nested").join("favorites.json");
    let config = EurekaConfig::default().with_favorites_path(&path);

    let mut deck = HeadlessDeck::open(&config, ShareChain::new())
        .await
        .expect("Failed to open deck");
    let id = deck.session().displayed_fact().unwrap().id();
    deck.favorite().await;

    let raw = JsonFileStore::new(&path)
        .get(FAVORITES_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw, format!("[\"{}\"]", id));

    let reopened = HeadlessDeck::open(&config, ShareChain::new())
        .await
        .expect("Failed to reopen deck");
    assert!(reopened.session().favorites().contains(&id));
}

// =============================================================================
// TEST 2: Broken media
// =============================================================================

#[tokio::test]
async fn test_read_failure_loads_empty() {
    let favorites = FavoritesStore::load(Arc::new(FailingStore)).await;
    assert!(favorites.is_empty());
    assert!(!favorites.contains(&FactId::from("science-honey-never-spoils")));
}

#[tokio::test]
async fn test_corrupt_file_loads_empty() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("favorites.json");
    tokio::fs::write(&path, "not json at all").await.unwrap();

    let favorites = FavoritesStore::load(Arc::new(JsonFileStore::new(&path))).await;
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_write_failure_keeps_session_interactive() {
    let config = EurekaConfig::default();
    let catalog = sample_catalog();
    let session =
        eureka_core::EurekaSession::new(&config, catalog, Arc::new(FailingStore), ShareChain::new())
            .await;
    let mut deck = HeadlessDeck::from_session(session);

    let effect = deck.favorite().await;
    assert!(effect.is_some());
    assert!(deck.status().favorite);

    deck.next();
    deck.settle();
    assert!(!deck.status().locked);
}

// =============================================================================
// TEST 3: Toggle messages
// =============================================================================

#[tokio::test]
async fn test_toggle_twice_restores_membership() {
    let mut harness = TestHarness::new().await;

    harness.favorite().await;
    assert_notification(&harness, MSG_FAVORITE_ADDED);
    harness.favorite().await;
    assert_notification(&harness, MSG_FAVORITE_REMOVED);

    assert_eq!(harness.status().favorites, 0);
    let stored = harness.store().get(FAVORITES_KEY).await.unwrap().unwrap();
    assert_eq!(stored, "[]");
}
