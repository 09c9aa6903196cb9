//! Main application state and logic

use std::time::Instant;

use eureka_core::navigation::{DropReason, Effect, Outcome};
use eureka_core::{Category, EurekaSession, Fact, ShareOutcome};

use crate::effects::process_effect;
use crate::ui::theme::DeckTheme;
use crate::ui::Overlay;

/// Emoji for the unfiltered deck.
const ALL_EMOJI: &str = "✨";
/// Emoji shown for categories without presentation data.
pub const FALLBACK_EMOJI: &str = "🤔";
/// Shown while a share is awaited.
const SHARING: &str = "Sharing...";

/// Which half of a transition the card is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cue {
    #[default]
    Settled,
    Outgoing,
    Incoming,
}

/// What the card area shows
#[derive(Debug, Clone)]
pub enum CardView {
    Fact {
        fact: Fact,
        position: usize,
        deck_len: usize,
    },
    Empty {
        category: Category,
    },
}

/// One row of the category panel
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub key: Category,
    pub emoji: String,
    pub label: String,
    pub count: usize,
}

/// Main application state
pub struct App {
    pub session: EurekaSession,

    // Rendered state, driven by effects
    pub card: Option<CardView>,
    pub cue: Cue,
    pub favorited: bool,
    pub category: Category,
    pub deck_len: usize,

    // UI state
    pub theme: DeckTheme,
    overlay: Option<Overlay>,

    // Shown while an async action runs, ahead of notifications
    busy: Option<&'static str>,
    pub should_quit: bool,
}

impl App {
    /// Create the application and render the first card
    pub fn new(session: EurekaSession) -> Self {
        let mut app = Self {
            session,
            card: None,
            cue: Cue::default(),
            favorited: false,
            category: Category::all(),
            deck_len: 0,
            theme: DeckTheme::default(),
            overlay: None,
            busy: None,
            should_quit: false,
        };

        let effects = app.session.start();
        app.apply(&effects);
        app
    }

    /// Feed effects to the view
    pub fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            process_effect(self, effect);
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Request the next fact. Dropped silently mid-transition.
    pub fn next_fact(&mut self, now: Instant) {
        let outcome = self.session.next(now);
        self.apply_outcome(outcome);
    }

    /// Switch the deck to a category
    pub fn select_category(&mut self, category: Category) {
        let outcome = self.session.set_category(category);
        if outcome == Outcome::Dropped(DropReason::Transitioning) {
            self.set_status("Wait for the card to settle");
        }
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        if let Outcome::Accepted(effects) = outcome {
            self.apply(&effects);
        }
    }

    /// Primary mouse button pressed at a column
    pub fn mouse_down(&mut self, column: u16) {
        self.session.mouse_down(f32::from(column));
    }

    /// Primary mouse button released at a column
    pub fn mouse_up(&mut self, column: u16, now: Instant) {
        if let Some(outcome) = self.session.mouse_up(f32::from(column), now) {
            self.apply_outcome(outcome);
        }
    }

    // =========================================================================
    // Favorites and sharing
    // =========================================================================

    pub async fn toggle_favorite(&mut self) {
        if let Some(effect) = self.session.toggle_favorite(Instant::now()).await {
            process_effect(self, &effect);
        }
    }

    /// Mark a share as in flight until [`App::share`] returns
    pub fn begin_share(&mut self) {
        self.busy = Some(SHARING);
    }

    pub async fn share(&mut self) {
        let outcome = self.session.share_current(Instant::now()).await;
        self.busy = None;
        match outcome {
            ShareOutcome::Shared => self.set_status("Shared"),
            // the session already shows a notification
            ShareOutcome::Copied => {}
            ShareOutcome::MailComposeOpened => self.set_status("✉️ Opened your mail client"),
            ShareOutcome::Exhausted => self.set_status("Could not share this fact"),
            ShareOutcome::NothingToShare => self.set_status("Nothing to share here"),
        }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// "all" followed by every catalog category, in catalog order
    pub fn category_entries(&self) -> Vec<CategoryEntry> {
        let catalog = self.session.catalog();

        let mut entries = vec![CategoryEntry {
            key: Category::all(),
            emoji: ALL_EMOJI.to_string(),
            label: "All".to_string(),
            count: catalog.len(),
        }];
        entries.extend(catalog.categories().iter().map(|info| CategoryEntry {
            key: info.key.clone(),
            emoji: info.emoji.clone(),
            label: info.label.clone(),
            count: catalog.count_in(&info.key),
        }));
        entries
    }

    /// Emoji and label for a category
    pub fn category_display(&self, category: &Category) -> (String, String) {
        if category.is_all() {
            return (ALL_EMOJI.to_string(), "All".to_string());
        }
        match self.session.catalog().category_info(category) {
            Some(info) => (info.emoji.clone(), info.label.clone()),
            None => (FALLBACK_EMOJI.to_string(), category.to_string()),
        }
    }

    pub fn open_categories(&mut self) {
        let cursor = self
            .category_entries()
            .iter()
            .position(|e| e.key == self.category)
            .unwrap_or(0);
        self.overlay = Some(Overlay::Categories { cursor });
    }

    /// Toggle the category panel
    pub fn toggle_categories(&mut self) {
        if matches!(self.overlay, Some(Overlay::Categories { .. })) {
            self.overlay = None;
        } else {
            self.open_categories();
        }
    }

    pub fn move_category_cursor(&mut self, delta: isize) {
        let len = self.category_entries().len();
        if let Some(Overlay::Categories { cursor }) = &mut self.overlay {
            let next = (*cursor as isize + delta).rem_euclid(len as isize);
            *cursor = next as usize;
        }
    }

    /// Select the entry under the cursor (or at `index`) and close the panel
    pub fn choose_category(&mut self, index: Option<usize>) {
        let Some(Overlay::Categories { cursor }) = self.overlay else {
            return;
        };
        let entries = self.category_entries();
        let Some(entry) = entries.get(index.unwrap_or(cursor)) else {
            return;
        };

        self.overlay = None;
        self.select_category(entry.key.clone());
    }

    // =========================================================================
    // Overlays and status
    // =========================================================================

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Some(Overlay::Help) => None,
            _ => Some(Overlay::Help),
        };
    }

    /// Show a message for the notification window
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.session.notify(message, Instant::now());
    }

    /// Hide every message
    pub fn clear_status(&mut self) {
        self.busy = None;
        self.session.dismiss_notifications();
    }

    /// Message for the status bar: a running action, else the newest notification
    pub fn banner(&self) -> Option<&str> {
        self.busy.or_else(|| {
            self.session
                .notifications()
                .latest()
                .map(|n| n.message.as_str())
        })
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Fire due timers
    pub fn tick(&mut self, now: Instant) {
        let effects = self.session.tick(now);
        self.apply(&effects);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }
}
