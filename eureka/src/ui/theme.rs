//! Color theme and styling for the Eureka TUI

use ratatui::style::{Color, Modifier, Style};

use crate::app::Cue;

/// Deck UI color theme
#[derive(Debug, Clone)]
pub struct DeckTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Card colors
    pub title: Color,
    pub description: Color,
    pub meta: Color,
    pub incoming: Color,

    // Favorite indicator
    pub favorite_on: Color,
    pub favorite_off: Color,

    // Status colors
    pub notification: Color,
    pub hint: Color,
}

impl Default for DeckTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            title: Color::Yellow,
            description: Color::White,
            meta: Color::Gray,
            incoming: Color::LightCyan,

            favorite_on: Color::LightRed,
            favorite_off: Color::DarkGray,

            notification: Color::LightGreen,
            hint: Color::DarkGray,
        }
    }
}

impl DeckTheme {
    /// Get card border style for the current transition cue
    pub fn card_border_style(&self, cue: Cue) -> Style {
        match cue {
            Cue::Settled => Style::default().fg(self.border_focused),
            Cue::Outgoing => Style::default()
                .fg(self.border)
                .add_modifier(Modifier::DIM),
            Cue::Incoming => Style::default()
                .fg(self.incoming)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for the fact title
    pub fn title_style(&self, cue: Cue) -> Style {
        let style = Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD);
        if cue == Cue::Outgoing {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    /// Get style for the fact body
    pub fn description_style(&self, cue: Cue) -> Style {
        let style = Style::default().fg(self.description);
        if cue == Cue::Outgoing {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    /// Get style for era/location lines
    pub fn meta_style(&self) -> Style {
        Style::default()
            .fg(self.meta)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for the heart
    pub fn favorite_style(&self, favorited: bool) -> Style {
        if favorited {
            Style::default()
                .fg(self.favorite_on)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.favorite_off)
        }
    }

    /// Get style for transient notifications
    pub fn notification_style(&self) -> Style {
        Style::default()
            .fg(self.notification)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for hints and secondary text
    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint).add_modifier(Modifier::DIM)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get style for an entry in a selectable list
    pub fn list_item_style(&self, selected: bool, active: bool) -> Style {
        let style = Style::default().fg(if active {
            self.border_focused
        } else {
            self.foreground
        });

        if selected {
            style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            style
        }
    }
}
