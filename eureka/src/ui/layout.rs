//! Layout calculations for the Eureka TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the fact card gets, in cells
const CARD_MAX_WIDTH: u16 = 72;

/// Calculate the main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub card_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(8),    // Card
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        let content = main_chunks[1];
        let width = content.width.min(CARD_MAX_WIDTH);
        let card_area = Rect::new(
            content.x + (content.width - width) / 2,
            content.y,
            width,
            content.height,
        );

        Self {
            title_area: main_chunks[0],
            card_area,
            status_bar: main_chunks[2],
            hotkey_bar: main_chunks[3],
        }
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_is_centered_and_capped() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 120, 30));
        assert_eq!(layout.card_area.width, CARD_MAX_WIDTH);
        assert_eq!(layout.card_area.x, 24);
        assert_eq!(layout.title_area.height, 1);
        assert_eq!(layout.card_area.height, 27);
    }

    #[test]
    fn test_narrow_terminal_uses_full_width() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 40, 20));
        assert_eq!(layout.card_area.width, 40);
        assert_eq!(layout.card_area.x, 0);
    }

    #[test]
    fn test_popup_never_exceeds_area() {
        let popup = centered_rect_fixed(50, 20, Rect::new(0, 0, 30, 10));
        assert_eq!(popup, Rect::new(0, 0, 30, 10));
    }
}
