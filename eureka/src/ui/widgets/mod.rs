//! TUI widgets for the fact deck

pub mod category_panel;
pub mod fact_card;
pub mod status_bar;

pub use category_panel::CategoryPanelWidget;
pub use fact_card::FactCardWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
