//! Swipe and drag recognition.
//!
//! Raw pointer streams are reduced to a single semantic signal,
//! [`Gesture::Advance`], fired by a leftward swipe (finger or cursor moving
//! right-to-left). Two pointer families are tracked independently:
//!
//! - Touch: a gesture only counts once a move shows it is horizontal
//!   (`dx > dy` and `dx` past the direction lock). From then on the caller
//!   should suppress native scrolling. On release it fires if the signed
//!   displacement `x0 - x_end` exceeds the touch fire threshold.
//! - Mouse: press and release only; fires if `x0 - x_release` exceeds the
//!   mouse fire threshold.
//!
//! Right swipes and short moves do nothing. Tracking state is cleared on
//! every release.

use serde::{Deserialize, Serialize};

/// Distances that decide when a pointer stream becomes a gesture.
///
/// Units are whatever the input source reports: pixels for touch screens,
/// cells for a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Horizontal travel needed before a touch is classified as a swipe.
    pub touch_direction_lock: f32,
    /// Leftward travel at release needed for a classified touch to fire.
    pub touch_fire: f32,
    /// Leftward travel at release needed for a mouse drag to fire.
    pub mouse_fire: f32,
}

impl GestureThresholds {
    pub const PIXEL_TOUCH_DIRECTION_LOCK: f32 = 30.0;
    pub const PIXEL_TOUCH_FIRE: f32 = 50.0;
    pub const PIXEL_MOUSE_FIRE: f32 = 100.0;

    /// Nominal width of one terminal cell, in pixels.
    pub const PIXELS_PER_CELL: f32 = 10.0;

    /// Convert pixel thresholds to terminal cells.
    pub fn in_cells(self) -> Self {
        Self {
            touch_direction_lock: self.touch_direction_lock / Self::PIXELS_PER_CELL,
            touch_fire: self.touch_fire / Self::PIXELS_PER_CELL,
            mouse_fire: self.mouse_fire / Self::PIXELS_PER_CELL,
        }
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            touch_direction_lock: Self::PIXEL_TOUCH_DIRECTION_LOCK,
            touch_fire: Self::PIXEL_TOUCH_FIRE,
            mouse_fire: Self::PIXEL_MOUSE_FIRE,
        }
    }
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Move to the next fact.
    Advance,
}

#[derive(Debug, Clone, Copy)]
struct TouchTrack {
    x0: f32,
    y0: f32,
    is_swipe: bool,
}

#[derive(Debug, Clone, Copy)]
struct MouseTrack {
    x0: f32,
}

/// Stateful recognizer for touch and mouse pointer streams.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    thresholds: GestureThresholds,
    touch: Option<TouchTrack>,
    mouse: Option<MouseTrack>,
}

impl GestureRecognizer {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            touch: None,
            mouse: None,
        }
    }

    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    /// A finger touched down.
    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.touch = Some(TouchTrack {
            x0: x,
            y0: y,
            is_swipe: false,
        });
    }

    /// A finger moved. Returns `true` when native scrolling should be
    /// suppressed because the touch is a horizontal swipe.
    pub fn touch_move(&mut self, x: f32, y: f32) -> bool {
        let lock = self.thresholds.touch_direction_lock;
        let Some(track) = self.touch.as_mut() else {
            return false;
        };

        let dx = (x - track.x0).abs();
        let dy = (y - track.y0).abs();
        if dx > dy && dx > lock {
            track.is_swipe = true;
        }
        track.is_swipe
    }

    /// The finger lifted at `x`.
    pub fn touch_end(&mut self, x: f32) -> Option<Gesture> {
        let track = self.touch.take()?;
        if !track.is_swipe {
            return None;
        }

        let diff = track.x0 - x;
        if diff > self.thresholds.touch_fire {
            tracing::debug!(diff, "touch swipe recognized");
            Some(Gesture::Advance)
        } else {
            None
        }
    }

    /// The touch was interrupted by the platform.
    pub fn touch_cancel(&mut self) {
        self.touch = None;
    }

    /// A mouse button went down at `x`.
    pub fn mouse_down(&mut self, x: f32) {
        self.mouse = Some(MouseTrack { x0: x });
    }

    /// The mouse button was released at `x`.
    pub fn mouse_up(&mut self, x: f32) -> Option<Gesture> {
        let track = self.mouse.take()?;

        let diff = track.x0 - x;
        if diff > self.thresholds.mouse_fire {
            tracing::debug!(diff, "mouse drag recognized");
            Some(Gesture::Advance)
        } else {
            None
        }
    }

    /// Whether a touch is classified as a horizontal swipe right now.
    pub fn is_swiping(&self) -> bool {
        self.touch.is_some_and(|t| t.is_swipe)
    }

    /// Whether any pointer is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.touch.is_some() || self.mouse.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> GestureRecognizer {
        GestureRecognizer::new(GestureThresholds::default())
    }

    #[test]
    fn test_thresholds_in_cells() {
        let cells = GestureThresholds::default().in_cells();
        assert_eq!(cells.touch_direction_lock, 3.0);
        assert_eq!(cells.touch_fire, 5.0);
        assert_eq!(cells.mouse_fire, 10.0);

        let mut g = GestureRecognizer::new(cells);
        g.mouse_down(40.0);
        assert!(g.mouse_up(30.0).is_none());
        g.mouse_down(40.0);
        assert_eq!(g.mouse_up(29.0), Some(Gesture::Advance));
    }

    #[test]
    fn test_left_swipe_fires() {
        let mut g = recognizer();
        g.touch_start(300.0, 100.0);
        assert!(g.touch_move(260.0, 102.0));
        assert_eq!(g.touch_end(240.0), Some(Gesture::Advance));
        assert!(!g.is_tracking());
    }

    #[test]
    fn test_small_move_never_classifies() {
        let mut g = recognizer();
        g.touch_start(300.0, 100.0);
        assert!(!g.touch_move(295.0, 102.0));
        // end displacement is irrelevant without classification
        assert_eq!(g.touch_end(0.0), None);
    }

    #[test]
    fn test_vertical_move_does_not_classify() {
        let mut g = recognizer();
        g.touch_start(300.0, 100.0);
        assert!(!g.touch_move(260.0, 200.0));
        assert_eq!(g.touch_end(200.0), None);
    }

    #[test]
    fn test_classification_is_sticky() {
        let mut g = recognizer();
        g.touch_start(300.0, 100.0);
        assert!(g.touch_move(250.0, 100.0));
        // drifting vertically afterwards keeps it a swipe
        assert!(g.touch_move(250.0, 300.0));
        assert!(g.is_swiping());
    }

    #[test]
    fn test_right_swipe_is_noop() {
        let mut g = recognizer();
        g.touch_start(100.0, 100.0);
        assert!(g.touch_move(200.0, 100.0));
        assert_eq!(g.touch_end(200.0), None);
    }

    #[test]
    fn test_classified_but_under_fire_threshold() {
        let mut g = recognizer();
        g.touch_start(300.0, 100.0);
        assert!(g.touch_move(260.0, 100.0));
        // came back: net 40 < 50
        assert_eq!(g.touch_end(260.0), None);
    }

    #[test]
    fn test_touch_end_resets_state() {
        let mut g = recognizer();
        g.touch_start(300.0, 100.0);
        g.touch_move(200.0, 100.0);
        g.touch_end(290.0);
        // a stray end without a start does nothing
        assert_eq!(g.touch_end(0.0), None);
        assert!(!g.touch_move(0.0, 0.0));
    }

    #[test]
    fn test_touch_cancel() {
        let mut g = recognizer();
        g.touch_start(300.0, 100.0);
        g.touch_move(200.0, 100.0);
        g.touch_cancel();
        assert_eq!(g.touch_end(100.0), None);
    }

    #[test]
    fn test_mouse_drag_thresholds() {
        let mut g = recognizer();
        g.mouse_down(500.0);
        assert_eq!(g.mouse_up(400.0), None); // exactly 100 is not enough
        g.mouse_down(500.0);
        assert_eq!(g.mouse_up(399.0), Some(Gesture::Advance));
        g.mouse_down(100.0);
        assert_eq!(g.mouse_up(400.0), None);
        assert_eq!(g.mouse_up(0.0), None);
    }

    #[test]
    fn test_touch_and_mouse_are_independent() {
        let mut g = recognizer();
        g.touch_start(300.0, 0.0);
        g.mouse_down(500.0);
        g.touch_move(200.0, 0.0);
        assert_eq!(g.mouse_up(350.0), Some(Gesture::Advance));
        assert_eq!(g.touch_end(200.0), Some(Gesture::Advance));
    }

    #[test]
    fn test_thresholds_are_tunable() {
        let mut g = GestureRecognizer::new(GestureThresholds {
            touch_direction_lock: 5.0,
            touch_fire: 8.0,
            mouse_fire: 2.0,
        });
        g.touch_start(20.0, 0.0);
        assert!(g.touch_move(14.0, 0.0));
        assert_eq!(g.touch_end(11.0), Some(Gesture::Advance));
        g.mouse_down(10.0);
        assert_eq!(g.mouse_up(7.0), Some(Gesture::Advance));
    }
}
