//! Application configuration.
//!
//! Defaults are overridden, in order, by an optional TOML file, then by
//! `EUREKA_*` environment variables, then by whatever the caller sets with the
//! `with_*` builders. Every file section and key is optional:
//!
//! ```toml
//! [transition]
//! outgoing_ms = 300
//! incoming_ms = 300
//!
//! [gestures]
//! touch_direction_lock = 30.0
//! touch_fire = 50.0
//! mouse_fire = 100.0
//!
//! [notifications]
//! ttl_ms = 2000
//!
//! [favorites]
//! key = "eureka-favorites"
//! path = "favorites.json"
//!
//! [catalog]
//! path = "facts.json"
//!
//! [share]
//! link = "https://eureka.example"
//! ```

use crate::favorites::FAVORITES_KEY;
use crate::gesture::GestureThresholds;
use crate::navigation::TransitionTimings;
use crate::notify::DEFAULT_NOTIFICATION_TTL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

/// Link appended to shared facts unless configured otherwise.
pub const DEFAULT_SHARE_LINK: &str = "https://github.com/eureka-facts/eureka";

/// Environment variable naming the favorites file.
pub const ENV_FAVORITES_PATH: &str = "EUREKA_FAVORITES_PATH";
/// Environment variable naming a JSON catalog to load instead of the built-in one.
pub const ENV_CATALOG: &str = "EUREKA_CATALOG";
/// Environment variable overriding the shared link.
pub const ENV_SHARE_LINK: &str = "EUREKA_SHARE_LINK";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EurekaConfig {
    /// Durations of the two transition phases.
    pub timings: TransitionTimings,

    /// Gesture recognition thresholds.
    pub thresholds: GestureThresholds,

    /// How long transient notifications stay visible.
    pub notification_ttl: Duration,

    /// Key the favorites array is stored under.
    pub favorites_key: String,

    /// File backing the favorites store. `None` keeps favorites in memory.
    pub favorites_path: Option<PathBuf>,

    /// JSON catalog to load. `None` uses the built-in catalog.
    pub catalog_path: Option<PathBuf>,

    /// Link included in shared facts.
    pub share_link: String,
}

impl Default for EurekaConfig {
    fn default() -> Self {
        Self {
            timings: TransitionTimings::default(),
            thresholds: GestureThresholds::default(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            favorites_key: FAVORITES_KEY.to_string(),
            favorites_path: None,
            catalog_path: None,
            share_link: DEFAULT_SHARE_LINK.to_string(),
        }
    }
}

impl EurekaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text on top of the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Self::default();
        file.apply(&mut config)?;
        Ok(config)
    }

    /// Load a TOML file on top of the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&text)
    }

    /// Apply `EUREKA_*` environment overrides.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn with_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty(ENV_FAVORITES_PATH) {
            self.favorites_path = Some(PathBuf::from(path));
        }
        if let Some(path) = non_empty(ENV_CATALOG) {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(link) = non_empty(ENV_SHARE_LINK) {
            self.share_link = link;
        }
        self
    }

    /// Set the transition phase durations.
    pub fn with_timings(mut self, timings: TransitionTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the gesture thresholds.
    pub fn with_thresholds(mut self, thresholds: GestureThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set how long notifications stay visible.
    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    /// Set the favorites storage key.
    pub fn with_favorites_key(mut self, key: impl Into<String>) -> Self {
        self.favorites_key = key.into();
        self
    }

    /// Persist favorites to this file.
    pub fn with_favorites_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.favorites_path = Some(path.into());
        self
    }

    /// Load the catalog from this JSON file.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Set the link included in shared facts.
    pub fn with_share_link(mut self, link: impl Into<String>) -> Self {
        self.share_link = link.into();
        self
    }
}

/// On-disk shape: every section and key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    transition: TransitionSection,
    gestures: GestureSection,
    notifications: NotificationSection,
    favorites: FavoritesSection,
    catalog: CatalogSection,
    share: ShareSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TransitionSection {
    outgoing_ms: Option<u64>,
    incoming_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GestureSection {
    touch_direction_lock: Option<f32>,
    touch_fire: Option<f32>,
    mouse_fire: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NotificationSection {
    ttl_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FavoritesSection {
    key: Option<String>,
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ShareSection {
    link: Option<String>,
}

impl ConfigFile {
    fn apply(self, config: &mut EurekaConfig) -> Result<(), ConfigError> {
        if let Some(ms) = self.transition.outgoing_ms {
            config.timings.outgoing = Duration::from_millis(ms);
        }
        if let Some(ms) = self.transition.incoming_ms {
            config.timings.incoming = Duration::from_millis(ms);
        }

        let g = self.gestures;
        for (field, value, slot) in [
            ("gestures.touch_direction_lock", g.touch_direction_lock, &mut config.thresholds.touch_direction_lock),
            ("gestures.touch_fire", g.touch_fire, &mut config.thresholds.touch_fire),
            ("gestures.mouse_fire", g.mouse_fire, &mut config.thresholds.mouse_fire),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidValue {
                        field,
                        reason: format!("{value} is not a non-negative distance"),
                    });
                }
                *slot = value;
            }
        }

        if let Some(ms) = self.notifications.ttl_ms {
            config.notification_ttl = Duration::from_millis(ms);
        }
        if let Some(key) = self.favorites.key {
            if key.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "favorites.key",
                    reason: "must not be empty".to_string(),
                });
            }
            config.favorites_key = key;
        }
        if let Some(path) = self.favorites.path {
            config.favorites_path = Some(path);
        }
        if let Some(path) = self.catalog.path {
            config.catalog_path = Some(path);
        }
        if let Some(link) = self.share.link {
            config.share_link = link;
        }
        Ok(())
    }
}
