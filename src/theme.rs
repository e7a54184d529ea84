//! Centralized colors and styles for the picker
//!
//! All widgets take their styling from here rather than hardcoding colors.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette
pub struct Colors;

impl Colors {
    /// Default foreground text
    pub const FG_PRIMARY: Color = Color::White;

    /// Muted text (status bar, pagination, help)
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Title bar background
    pub const TITLE_BG: Color = Color::Indexed(62);

    /// Title bar foreground
    pub const TITLE_FG: Color = Color::Indexed(230);

    /// Highlighted list entry (xterm 170, orchid)
    pub const SELECTED: Color = Color::Indexed(170);

    /// Spinner glyphs (xterm 205, hot pink)
    pub const SPINNER: Color = Color::Indexed(205);

    /// Active pagination dot
    pub const PAGE_ACTIVE: Color = Color::Gray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Colors::TITLE_FG)
            .bg(Colors::TITLE_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default().fg(Colors::SELECTED)
    }

    pub fn spinner() -> Style {
        Style::default().fg(Colors::SPINNER)
    }

    pub fn page_active() -> Style {
        Style::default().fg(Colors::PAGE_ACTIVE)
    }
}

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Left padding of unselected entries
pub const ITEM_PADDING: u16 = 4;

/// Left padding of the selected entry, which also carries the `> ` marker
pub const SELECTED_PADDING: u16 = 2;

/// Initial list width before the first resize event
pub const DEFAULT_LIST_WIDTH: u16 = 30;

/// Rows the list view occupies, chrome included
pub const LIST_HEIGHT: u16 = 20;

/// Rows taken by title, status bar, pagination and help
pub const LIST_CHROME_ROWS: u16 = 7;
