//! Fact card widget: the card in the middle of the screen

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::app::{CardView, Cue};
use crate::ui::theme::DeckTheme;

/// Renders the current fact, or the empty state for a category
pub struct FactCardWidget<'a> {
    view: &'a CardView,
    theme: &'a DeckTheme,
    cue: Cue,
    empty_emoji: &'a str,
    category_label: &'a str,
}

impl<'a> FactCardWidget<'a> {
    pub fn new(view: &'a CardView, theme: &'a DeckTheme) -> Self {
        Self {
            view,
            theme,
            cue: Cue::Settled,
            empty_emoji: crate::app::FALLBACK_EMOJI,
            category_label: "",
        }
    }

    pub fn cue(mut self, cue: Cue) -> Self {
        self.cue = cue;
        self
    }

    /// Emoji and label of the selected category
    pub fn category(mut self, emoji: &'a str, label: &'a str) -> Self {
        self.empty_emoji = emoji;
        self.category_label = label;
        self
    }

    fn fact_lines(&self) -> (String, Vec<Line<'a>>) {
        let CardView::Fact {
            fact,
            position,
            deck_len,
        } = self.view
        else {
            return (String::new(), Vec::new());
        };

        let mut lines = vec![
            Line::from(fact.emoji.as_str()),
            Line::default(),
            Line::from(Span::styled(
                fact.title.as_str(),
                self.theme.title_style(self.cue),
            )),
            Line::default(),
            Line::from(Span::styled(
                fact.description.as_str(),
                self.theme.description_style(self.cue),
            )),
        ];

        let mut meta = Vec::new();
        if let Some(era) = &fact.era {
            meta.push(format!("📅 {era}"));
        }
        if let Some(location) = &fact.location {
            meta.push(format!("📍 {location}"));
        }
        if !meta.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                meta.join("   "),
                self.theme.meta_style(),
            )));
        }

        (format!(" {} / {} ", position + 1, deck_len), lines)
    }

    fn empty_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(self.empty_emoji),
            Line::default(),
            Line::from(Span::styled(
                "No facts in this category yet.",
                self.theme.description_style(Cue::Settled),
            )),
            Line::from(Span::styled(
                "Try another category! (c)",
                self.theme.hint_style(),
            )),
        ]
    }
}

impl Widget for FactCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (counter, lines) = match self.view {
            CardView::Fact { .. } => self.fact_lines(),
            CardView::Empty { .. } => (String::new(), self.empty_lines()),
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.card_border_style(self.cue))
            .padding(Padding::new(2, 2, 1, 1));
        let label = match self.view {
            CardView::Empty { category } if self.category_label.is_empty() => category.as_str(),
            _ => self.category_label,
        };
        if !label.is_empty() {
            block = block.title(format!(" {} {} ", self.empty_emoji, label));
        }
        if !counter.is_empty() {
            block = block.title_bottom(Line::from(counter).right_aligned());
        }

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
