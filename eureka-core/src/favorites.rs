//! Favorite facts, persisted as a JSON array of ids under a single key.
//!
//! Favorites are best-effort: read or parse failures load as an empty set and
//! write failures are logged and swallowed. The in-memory set stays the
//! source of truth for the rest of the session either way.

use crate::fact::FactId;
use crate::navigation::FavoriteLookup;
use crate::persist::KeyValueStore;
use std::sync::Arc;

/// Storage key used when none is configured.
pub const FAVORITES_KEY: &str = "eureka-favorites";

/// The favorite set plus the medium it is written to.
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    /// Insertion order is kept so the persisted array is stable.
    ids: Vec<FactId>,
}

impl FavoritesStore {
    /// Load favorites stored under [`FAVORITES_KEY`].
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_key(store, FAVORITES_KEY).await
    }

    /// Load favorites stored under `key`. Never fails.
    pub async fn load_with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let ids = match store.get(&key).await {
            Ok(Some(raw)) => parse_ids(&raw).unwrap_or_else(|e| {
                tracing::warn!(%key, error = %e, "ignoring malformed favorites");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(%key, error = %e, "could not read favorites");
                Vec::new()
            }
        };
        tracing::debug!(count = ids.len(), "favorites loaded");

        Self { store, key, ids }
    }

    /// Add `id` if absent, remove it if present, then persist.
    ///
    /// Returns whether `id` is a favorite afterwards.
    pub async fn toggle(&mut self, id: &FactId) -> bool {
        let favorited = match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.clone());
                true
            }
        };

        self.persist().await;
        favorited
    }

    /// Write the current set to the medium. Failures are logged only.
    pub async fn persist(&self) {
        let serialized = match serde_json::to_string(&self.ids) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize favorites");
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &serialized).await {
            tracing::warn!(key = %self.key, error = %e, "could not save favorites");
        }
    }

    pub fn contains(&self, id: &FactId) -> bool {
        self.ids.contains(id)
    }

    /// Favorite ids in the order they were added.
    pub fn ids(&self) -> &[FactId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FavoriteLookup for FavoritesStore {
    fn is_favorite(&self, id: &FactId) -> bool {
        self.contains(id)
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

/// Parse a stored array, dropping duplicates.
fn parse_ids(raw: &str) -> Result<Vec<FactId>, serde_json::Error> {
    let parsed: Vec<FactId> = serde_json::from_str(raw)?;
    let mut ids = Vec::with_capacity(parsed.len());
    for id in parsed {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
