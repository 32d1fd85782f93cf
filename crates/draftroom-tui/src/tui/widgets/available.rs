// Available players widget: undrafted players by projected points.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use draftroom_core::players::ProjectedPlayer;

use crate::tui::widgets::exposure_bar::position_color;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let players = &state.snapshot.available;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!("Available Players ({})", players.len()));

    if players.is_empty() {
        let paragraph = Paragraph::new("  No projections loaded.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders and header take three rows.
    let visible_rows = (area.height as usize).saturating_sub(3).max(1);
    let requested = state.scroll_offset.get("available").copied().unwrap_or(0);
    let scroll_offset = requested.min(players.len().saturating_sub(visible_rows));

    let header = Row::new(vec!["#", "Name", "Pos", "Team", "Pts", "PosRk"])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = players
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, p)| player_row(i + 1, p))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn player_row(rank: usize, p: &ProjectedPlayer) -> Row<'static> {
    Row::new(vec![
        Cell::from(rank.to_string()),
        Cell::from(p.name.clone()),
        Cell::from(p.position.display_str()).style(Style::default().fg(position_color(p.position))),
        Cell::from(p.team.clone()),
        Cell::from(format!("{:.1}", p.fantasy_points)),
        Cell::from(format_position_rank(p)),
    ])
}

/// e.g. "RB3", or "--" when the sheet has no rank.
pub fn format_position_rank(p: &ProjectedPlayer) -> String {
    match p.position_rank {
        Some(rank) => format!("{}{}", p.position.display_str(), rank),
        None => "--".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use draftroom_core::draft::pick::Position;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn player(name: &str, pts: f64, rank: Option<u32>) -> ProjectedPlayer {
        ProjectedPlayer {
            name: name.to_string(),
            position: Position::RunningBack,
            team: "ATL".to_string(),
            fantasy_points: pts,
            position_rank: rank,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn position_rank_format() {
        assert_eq!(format_position_rank(&player("A", 1.0, Some(3))), "RB3");
        assert_eq!(format_position_rank(&player("A", 1.0, None)), "--");
    }

    #[test]
    fn renders_empty_pool() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(screen_text(&terminal).contains("No projections loaded."));
    }

    #[test]
    fn renders_rows_and_respects_scroll() {
        let backend = TestBackend::new(60, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.snapshot.available = (1..=10)
            .map(|i| player(&format!("Player {i:02}"), 300.0 - i as f64, Some(i)))
            .collect();

        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Available Players (10)"));
        assert!(text.contains("Player 01"));
        assert!(text.contains("299.0"));

        // Scrolling past the end clamps to the last page.
        state.scroll_offset.insert("available".to_string(), 50);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(!text.contains("Player 01"));
        assert!(text.contains("Player 10"));
    }
}
