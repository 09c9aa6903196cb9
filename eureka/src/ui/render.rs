//! Render orchestration for the Eureka TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{CategoryPanelWidget, FactCardWidget, HotkeyBarWidget, StatusBarWidget};

/// Width of the category panel popup
const CATEGORY_PANEL_WIDTH: u16 = 36;

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Categories { cursor: usize },
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);
    render_card(frame, app, layout.card_area);
    render_status_bar(frame, app, layout.status_bar);

    let hotkeys = HotkeyBarWidget::new(&app.theme)
        .categories_open(matches!(app.overlay(), Some(Overlay::Categories { .. })));
    frame.render_widget(hotkeys, layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, *overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (emoji, label) = app.category_display(&app.category);
    let line = Line::from(vec![
        Span::styled(
            " 💡 Eureka ",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· {emoji} {label} ({} facts)", app.deck_len),
            app.theme.hint_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the fact card or the empty state
fn render_card(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.card else {
        return;
    };
    let (emoji, label) = app.category_display(&app.category);
    let card = FactCardWidget::new(view, &app.theme)
        .cue(app.cue)
        .category(&emoji, &label);
    frame.render_widget(card, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_widget = StatusBarWidget::new(&app.theme)
        .favorited(app.favorited)
        .favorites(app.session.favorites().len())
        .locked(app.session.engine().is_locked())
        .message(app.banner());

    frame.render_widget(status_widget, area);
}

/// Render overlay popup
fn render_overlay(frame: &mut Frame, app: &App, overlay: Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
        Overlay::Categories { cursor } => {
            let entries = app.category_entries();
            let popup_area = centered_rect_fixed(
                CATEGORY_PANEL_WIDTH,
                CategoryPanelWidget::height(&entries),
                area,
            );
            let panel = CategoryPanelWidget::new(&entries, &app.category, &app.theme).cursor(cursor);
            frame.render_widget(panel, popup_area);
        }
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(48, 16, area);
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default()
        .fg(app.theme.border_focused)
        .add_modifier(Modifier::BOLD);
    let rows = [
        ("→ l n Space", "Next fact"),
        ("drag left", "Next fact (mouse)"),
        ("c Tab", "Open / close categories"),
        ("0-9", "Pick a category (panel open)"),
        ("f", "Save / remove favorite"),
        ("s", "Share this fact"),
        ("Esc", "Dismiss message"),
        ("?", "Toggle this help"),
        ("q Ctrl-C", "Quit"),
    ];

    let mut lines = vec![Line::default()];
    lines.extend(rows.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(format!("  {keys:<14}"), key_style),
            Span::raw(*action),
        ])
    }));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        app.theme.hint_style(),
    )));

    let help = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(true)),
        );
    frame.render_widget(help, popup_area);
}
