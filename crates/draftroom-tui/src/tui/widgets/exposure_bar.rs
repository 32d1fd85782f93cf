// Exposure bar widget: stacked bar of QB/RB/WR/TE share of completed picks.
//
// Cells not covered by the four buckets (kickers, defenses, IDP) are drawn
// as a dim remainder.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use draftroom_core::draft::exposure::PositionExposure;
use draftroom_core::draft::pick::Position;

use crate::tui::ViewState;

const FILLED: &str = "█";
const REMAINDER: &str = "░";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snap = &state.snapshot;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(&snap.exposure, snap.exposure_is_mine));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if snap.made_count == 0 {
        let empty = Paragraph::new("  No picks yet.").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    frame.render_widget(Paragraph::new(bar_line(&snap.exposure, inner.width)), inner);
}

/// Bucket colour in the stacked bar.
pub fn position_color(position: Position) -> Color {
    match position {
        Position::Quarterback => Color::Red,
        Position::RunningBack => Color::Green,
        Position::WideReceiver => Color::Blue,
        Position::TightEnd => Color::Yellow,
        _ => Color::DarkGray,
    }
}

/// One row of coloured cells, exactly `width` wide.
pub fn bar_line(exposure: &PositionExposure, width: u16) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0u16;
    for (position, cells) in exposure.segments(width) {
        if cells == 0 {
            continue;
        }
        used += cells;
        spans.push(Span::styled(
            FILLED.repeat(cells as usize),
            Style::default().fg(position_color(position)),
        ));
    }
    let rest = width.saturating_sub(used);
    if rest > 0 {
        spans.push(Span::styled(
            REMAINDER.repeat(rest as usize),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Block title with the rounded percentage of each bucket.
pub fn title(exposure: &PositionExposure, mine: bool) -> String {
    let scope = if mine { "My exposure" } else { "Room exposure" };
    let parts: Vec<String> = exposure
        .buckets()
        .iter()
        .map(|(pos, pct)| format!("{} {:.0}%", pos.display_str(), pct))
        .collect();
    format!("{}: {}", scope, parts.join(" "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn sample() -> PositionExposure {
        PositionExposure {
            qb: 25.0,
            rb: 50.0,
            wr: 25.0,
            te: 0.0,
        }
    }

    #[test]
    fn title_lists_buckets() {
        assert_eq!(
            title(&sample(), true),
            "My exposure: QB 25% RB 50% WR 25% TE 0%"
        );
        assert!(title(&PositionExposure::default(), false).starts_with("Room exposure"));
    }

    #[test]
    fn bar_fills_width_in_bucket_order() {
        let line = bar_line(&sample(), 20);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content.chars().count(), 5);
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
        assert_eq!(line.spans[1].content.chars().count(), 10);
        assert_eq!(line.spans[1].style.fg, Some(Color::Green));
        assert_eq!(line.spans[2].content.chars().count(), 5);
        assert_eq!(line.spans[2].style.fg, Some(Color::Blue));
    }

    #[test]
    fn uncovered_share_is_remainder() {
        let exposure = PositionExposure {
            qb: 50.0,
            rb: 0.0,
            wr: 0.0,
            te: 0.0,
        };
        let line = bar_line(&exposure, 10);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].content, REMAINDER.repeat(5));
        assert_eq!(line.spans[1].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn bar_is_exactly_width() {
        let exposure = PositionExposure {
            qb: 100.0 / 3.0,
            rb: 100.0 / 3.0,
            wr: 100.0 / 3.0,
            te: 0.0,
        };
        let line = bar_line(&exposure, 17);
        let cells: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
        assert_eq!(cells, 17);
    }

    #[test]
    fn position_colors() {
        assert_eq!(position_color(Position::Quarterback), Color::Red);
        assert_eq!(position_color(Position::RunningBack), Color::Green);
        assert_eq!(position_color(Position::WideReceiver), Color::Blue);
        assert_eq!(position_color(Position::TightEnd), Color::Yellow);
    }

    #[test]
    fn renders_empty_and_filled() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        state.snapshot.made_count = 4;
        state.snapshot.exposure = sample();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(1, 1)].symbol(), FILLED);
        assert_eq!(buffer[(1, 1)].fg, Color::Red);
    }
}
