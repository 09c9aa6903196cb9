//! Event handling for the Eureka TUI

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;
use crate::ui::Overlay;

/// Work that has to be awaited by the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    ToggleFavorite,
    Share,
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    Pending(PendingAction),
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
///
/// A left-button drag toward the left edge advances, like a swipe.
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    if app.has_overlay() {
        return EventResult::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.mouse_down(mouse.column);
            EventResult::Continue
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.mouse_up(mouse.column, Instant::now());
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.overlay() {
        Some(Overlay::Help) => handle_help_key(app, key),
        Some(Overlay::Categories { .. }) => handle_category_key(app, key),
        None => handle_deck_key(app, key),
    }
}

/// Handle keys while the card is in front
fn handle_deck_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Char(' ') => {
            app.next_fact(Instant::now());
            EventResult::NeedsRedraw
        }
        KeyCode::Char('c') | KeyCode::Tab => {
            app.toggle_categories();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('f') => EventResult::Pending(PendingAction::ToggleFavorite),
        KeyCode::Char('s') => EventResult::Pending(PendingAction::Share),
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Esc => {
            app.clear_status();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

/// Handle keys in the category panel
fn handle_category_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_category_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_category_cursor(-1),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_category(None),
        KeyCode::Char(c @ '0'..='9') => {
            let index = c as usize - '0' as usize;
            app.choose_category(Some(index));
        }
        KeyCode::Esc | KeyCode::Char('c') | KeyCode::Tab => app.close_overlay(),
        KeyCode::Char('q') => return EventResult::Quit,
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Any key closes help
fn handle_help_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,
        _ => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
    }
}
