//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::theme::DeckTheme;

/// Status bar widget: favorite indicator, deck counter and banner
pub struct StatusBarWidget<'a> {
    theme: &'a DeckTheme,
    favorited: bool,
    favorites: usize,
    locked: bool,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(theme: &'a DeckTheme) -> Self {
        Self {
            theme,
            favorited: false,
            favorites: 0,
            locked: false,
            message: None,
        }
    }

    pub fn favorited(mut self, favorited: bool) -> Self {
        self.favorited = favorited;
        self
    }

    pub fn favorites(mut self, count: usize) -> Self {
        self.favorites = count;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let heart = if self.favorited { "♥" } else { "♡" };

        let mut spans = vec![
            Span::styled(
                format!(" {heart} "),
                self.theme.favorite_style(self.favorited),
            ),
            Span::styled(
                format!("{} saved", self.favorites),
                self.theme.hint_style(),
            ),
        ];

        if self.locked {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("…", self.theme.hint_style()));
        }

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, self.theme.notification_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget<'a> {
    theme: &'a DeckTheme,
    categories_open: bool,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(theme: &'a DeckTheme) -> Self {
        Self {
            theme,
            categories_open: false,
        }
    }

    pub fn categories_open(mut self, open: bool) -> Self {
        self.categories_open = open;
        self
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = if self.categories_open {
            vec![
                ("j/k:move", true),
                ("Enter:select", true),
                ("0-9:jump", true),
                ("Esc:close", false),
            ]
        } else {
            vec![
                ("→/Space:next", true),
                ("drag ←:next", false),
                ("c:categories", true),
                ("f:favorite", true),
                ("s:share", true),
                ("?:help", false),
                ("q:quit", false),
            ]
        };

        let mut spans = Vec::with_capacity(hotkeys.len() * 2);
        for (i, (key, primary)) in hotkeys.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if primary {
                Style::default().fg(self.theme.foreground)
            } else {
                self.theme.hint_style()
            };
            spans.push(Span::styled(key, style.add_modifier(Modifier::BOLD)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
