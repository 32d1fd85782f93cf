// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Picks Bar (5 rows)                                |
// +--------------------------------------------------+
// | Exposure Bar (3 rows)                             |
// +--------------------------------------------------+
// | Main Panel (tabs: Available / Draft Log)          |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the picks bar including its border.
pub const PICKS_BAR_HEIGHT: u16 = 5;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: connection, round/pick, who is on the clock, clock.
    pub status_bar: Rect,
    /// Horizontal strip of pick cards.
    pub picks_bar: Rect,
    /// Stacked position exposure bar.
    pub exposure_bar: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // status bar
            Constraint::Length(PICKS_BAR_HEIGHT), // picks bar
            Constraint::Length(3),                // exposure bar
            Constraint::Min(5),                   // main panel
            Constraint::Length(1),                // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        picks_bar: vertical[1],
        exposure_bar: vertical[2],
        main_panel: vertical[3],
        help_bar: vertical[4],
    }
}

/// Width available for cards inside the bordered picks bar.
pub fn picks_bar_inner_width(area: Rect) -> u16 {
    build_layout(area).picks_bar.width.saturating_sub(2)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
