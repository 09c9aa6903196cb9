//! Transient user-facing confirmations ("Copied!", "Saved to favorites").
//!
//! Each message is shown for a fixed window and then dropped by `tick`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays visible when nothing else is configured.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of live notifications, oldest first.
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    items: VecDeque<Notification>,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            items: VecDeque::new(),
        }
    }

    /// Show `message` until `now + ttl`.
    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        self.items.push_back(Notification {
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Drop expired notifications. Returns how many were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|n| n.expires_at > now);
        before - self.items.len()
    }

    /// The most recent live notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every notification at once.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Earliest expiry, so an event loop knows when to wake up.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.items.iter().map(|n| n.expires_at).min()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires_after_ttl() {
        let mut notes = Notifications::default();
        let t0 = Instant::now();
        notes.push("📋 Copied to clipboard!", t0);

        assert_eq!(notes.tick(t0 + Duration::from_millis(1999)), 0);
        assert_eq!(notes.latest().unwrap().message, "📋 Copied to clipboard!");
        assert_eq!(notes.tick(t0 + Duration::from_millis(2000)), 1);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_notifications_expire_independently() {
        let mut notes = Notifications::new(Duration::from_millis(100));
        let t0 = Instant::now();
        notes.push("first", t0);
        notes.push("second", t0 + Duration::from_millis(50));
        assert_eq!(notes.next_deadline(), Some(t0 + Duration::from_millis(100)));

        notes.tick(t0 + Duration::from_millis(120));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.latest().unwrap().message, "second");
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut notes = Notifications::default();
        let t0 = Instant::now();
        notes.push("first", t0);
        notes.push("second", t0);
        notes.clear();
        assert!(notes.latest().is_none());
        assert_eq!(notes.next_deadline(), None);
    }
}
