//! Eureka: a deck of fun facts with timed card transitions.
//!
//! This crate provides:
//! - The fact catalog and category-filtered, shuffled decks
//! - A navigation engine with a two-phase transition lock
//! - Swipe recognition for touch and mouse input
//! - Persisted favorites, sharing with fallbacks, and transient notifications
//!
//! Nothing here draws anything. Frontends feed input and a clock into an
//! [`EurekaSession`] and render the [`Effect`]s it returns.
//!
//! # Quick Start
//!
//! ```ignore
//! use eureka_core::{EurekaConfig, EurekaSession, ShareChain};
//! use std::time::Instant;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EurekaConfig::default().with_favorites_path("favorites.json");
//!     let mut session = EurekaSession::open(&config, ShareChain::new()).await?;
//!
//!     for effect in session.start() {
//!         println!("{effect:?}");
//!     }
//!
//!     session.next(Instant::now());
//!     session.toggle_favorite(Instant::now()).await;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod deck;
pub mod fact;
pub mod favorites;
pub mod gesture;
pub mod headless;
pub mod navigation;
pub mod notify;
pub mod persist;
pub mod session;
pub mod share;
pub mod testing;

// Primary public API
pub use catalog::{CatalogError, FactCatalog};
pub use config::{ConfigError, EurekaConfig};
pub use deck::DeckSelector;
pub use fact::{Category, CategoryInfo, Fact, FactId};
pub use favorites::FavoritesStore;
pub use gesture::{Gesture, GestureRecognizer, GestureThresholds};
pub use headless::{DeckStatus, HeadlessDeck};
pub use navigation::{DropReason, Effect, NavigationEngine, NavigationState, Outcome, TransitionTimings};
pub use notify::{Notification, Notifications};
pub use persist::{JsonFileStore, KeyValueStore, MemoryStore, PersistError};
pub use session::{EurekaSession, SessionError};
pub use share::{ShareChain, ShareError, ShareOutcome, ShareRequest, ShareTarget};
pub use testing::TestHarness;
