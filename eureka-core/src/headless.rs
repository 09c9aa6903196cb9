//! Headless deck interface for programmatic use.
//!
//! Drives an [`EurekaSession`] on a virtual clock, so scripts and tests can
//! step through transitions without waiting on wall time. It is designed for:
//! - Automated end-to-end testing
//! - The `--headless` line protocol of the binary
//! - Coding agents browsing the deck
//!
//! # Example
//!
//! ```ignore
//! use eureka_core::{EurekaConfig, HeadlessDeck, ShareChain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut deck = HeadlessDeck::open(&EurekaConfig::default(), ShareChain::new()).await?;
//!
//!     deck.next();
//!     deck.settle();
//!     println!("{}", deck.status());
//!
//!     deck.favorite().await;
//!     Ok(())
//! }
//! ```

use crate::config::EurekaConfig;
use crate::fact::Category;
use crate::navigation::{Effect, Outcome};
use crate::session::{EurekaSession, SessionError};
use crate::share::{ShareChain, ShareOutcome};
use std::fmt;
use std::time::{Duration, Instant};

/// Where simulated pointer gestures start.
const POINTER_ORIGIN: (f32, f32) = (400.0, 300.0);

/// Snapshot of what the screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckStatus {
    /// Selected category key.
    pub category: String,
    /// Deck position (already advanced while a transition is in flight).
    pub position: usize,
    /// Number of facts in the current deck.
    pub deck_len: usize,
    /// Whether navigation input is currently dropped.
    pub locked: bool,
    /// Title of the fact on screen, if any.
    pub title: Option<String>,
    /// Whether the fact on screen is a favorite.
    pub favorite: bool,
    /// Total number of favorites.
    pub favorites: usize,
    /// Most recent live notification.
    pub notification: Option<String>,
}

impl fmt::Display for DeckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "category={} position={}/{} locked={} favorite={} favorites={}",
            self.category, self.position, self.deck_len, self.locked, self.favorite, self.favorites
        )?;
        match &self.title {
            Some(title) => write!(f, " title={title:?}")?,
            None => write!(f, " title=<empty>")?,
        }
        if let Some(note) = &self.notification {
            write!(f, " notification={note:?}")?;
        }
        Ok(())
    }
}

/// A deck driven by a virtual clock.
pub struct HeadlessDeck {
    session: EurekaSession,
    epoch: Instant,
    elapsed: Duration,
    /// Every effect emitted since the last drain.
    effects: Vec<Effect>,
}

impl HeadlessDeck {
    /// Open a session from configuration and render the first card.
    pub async fn open(config: &EurekaConfig, share: ShareChain) -> Result<Self, SessionError> {
        let session = EurekaSession::open(config, share).await?;
        Ok(Self::from_session(session))
    }

    /// Wrap an existing session and render the first card.
    pub fn from_session(mut session: EurekaSession) -> Self {
        let effects = session.start();
        Self {
            session,
            epoch: Instant::now(),
            elapsed: Duration::ZERO,
            effects,
        }
    }

    /// The current virtual instant.
    pub fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }

    /// Virtual time since the deck was opened.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Move the clock forward and fire whatever timers came due.
    pub fn advance_clock(&mut self, by: Duration) -> Vec<Effect> {
        self.elapsed += by;
        let now = self.now();
        let effects = self.session.tick(now);
        self.effects.extend(effects.iter().cloned());
        effects
    }

    /// Run the clock until no transition is pending.
    pub fn settle(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some(deadline) = self.session.engine().next_deadline() {
            let wait = deadline.saturating_duration_since(self.now());
            effects.extend(self.advance_clock(wait));
        }
        effects
    }

    /// Request the next fact. Does not wait for the transition.
    pub fn next(&mut self) -> Outcome {
        let outcome = self.session.next(self.now());
        self.record(&outcome);
        outcome
    }

    /// Select a category.
    pub fn category(&mut self, category: impl Into<Category>) -> Outcome {
        let outcome = self.session.set_category(category);
        self.record(&outcome);
        outcome
    }

    /// Toggle the favorite state of the fact on screen.
    pub async fn favorite(&mut self) -> Option<Effect> {
        let now = self.now();
        let effect = self.session.toggle_favorite(now).await;
        self.effects.extend(effect.iter().cloned());
        effect
    }

    /// Share the fact on screen.
    pub async fn share(&mut self) -> ShareOutcome {
        let now = self.now();
        self.session.share_current(now).await
    }

    /// A touch that moves by `(dx, dy)` and lifts.
    ///
    /// `Some` when the touch was recognized as a swipe.
    pub fn swipe(&mut self, dx: f32, dy: f32) -> Option<Outcome> {
        let (x0, y0) = POINTER_ORIGIN;
        self.session.touch_start(x0, y0);
        self.session.touch_move(x0 + dx, y0 + dy);
        let outcome = self.session.touch_end(x0 + dx, self.now());
        if let Some(outcome) = &outcome {
            self.record(outcome);
        }
        outcome
    }

    /// A primary-button drag by `dx`.
    ///
    /// `Some` when the drag was recognized as a swipe.
    pub fn drag(&mut self, dx: f32) -> Option<Outcome> {
        let (x0, _) = POINTER_ORIGIN;
        self.session.mouse_down(x0);
        let outcome = self.session.mouse_up(x0 + dx, self.now());
        if let Some(outcome) = &outcome {
            self.record(outcome);
        }
        outcome
    }

    pub fn status(&self) -> DeckStatus {
        let state = self.session.state();
        DeckStatus {
            category: state.category.to_string(),
            position: state.position,
            deck_len: self.session.engine().deck().len(),
            locked: state.locked,
            title: self.session.displayed_fact().map(|f| f.title.clone()),
            favorite: self.session.displayed_is_favorite(),
            favorites: self.session.favorites().len(),
            notification: self
                .session
                .notifications()
                .latest()
                .map(|n| n.message.clone()),
        }
    }

    /// Effects emitted since the last call.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn session(&self) -> &EurekaSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EurekaSession {
        &mut self.session
    }

    fn record(&mut self, outcome: &Outcome) {
        if let Outcome::Accepted(effects) = outcome {
            self.effects.extend(effects.iter().cloned());
        }
    }
}

impl fmt::Debug for HeadlessDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessDeck")
            .field("elapsed", &self.elapsed)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
