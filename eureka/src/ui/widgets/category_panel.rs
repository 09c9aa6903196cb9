//! Category panel widget for choosing a deck

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use eureka_core::Category;

use crate::app::CategoryEntry;
use crate::ui::theme::DeckTheme;

/// Popup list of categories with fact counts
pub struct CategoryPanelWidget<'a> {
    entries: &'a [CategoryEntry],
    active: &'a Category,
    cursor: usize,
    theme: &'a DeckTheme,
}

impl<'a> CategoryPanelWidget<'a> {
    pub fn new(entries: &'a [CategoryEntry], active: &'a Category, theme: &'a DeckTheme) -> Self {
        Self {
            entries,
            active,
            cursor: 0,
            theme,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    /// Rows needed to show every entry inside the border
    pub fn height(entries: &[CategoryEntry]) -> u16 {
        entries.len() as u16 + 2
    }
}

impl Widget for CategoryPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Categories ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                // digits select directly; "all" sits on 0
                let shortcut = if i < 10 { format!("{i}") } else { " ".to_string() };
                let active = &entry.key == self.active;
                let marker = if active { "●" } else { " " };
                Line::from(vec![
                    Span::styled(format!(" {shortcut} "), self.theme.hint_style()),
                    Span::styled(
                        format!("{marker} {} {} ({})", entry.emoji, entry.label, entry.count),
                        self.theme.list_item_style(i == self.cursor, active),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
