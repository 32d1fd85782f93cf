// Draft log widget: completed picks, most recent first.
//
// Each line: "{round}.{pick} {drafter}: {player} ({pos}, {team})"

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use draftroom_core::draft::timeline::PickCard;

use crate::tui::widgets::exposure_bar::position_color;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let border = Style::default().fg(Color::Cyan);
    let log: Vec<&PickCard> = state.snapshot.draft_log().collect();

    if log.is_empty() {
        let paragraph = Paragraph::new("  No picks yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title("Draft Log"),
            );
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = log.len();
    let requested = state.scroll_offset.get("draft_log").copied().unwrap_or(0);
    let scroll_offset = requested.min(total.saturating_sub(visible_rows));

    let items: Vec<ListItem> = log
        .iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|card| ListItem::new(log_line(card)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!("Draft Log ({})", total)),
    );
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Plain text for one completed pick.
pub fn format_pick(card: &PickCard) -> String {
    match &card.player {
        Some(p) => format!(
            "{} {}: {} ({}, {})",
            card.slot_label(),
            card.participant.name,
            p.name,
            p.position,
            p.team
        ),
        None => format!("{} {}: --", card.slot_label(), card.participant.name),
    }
}

fn log_line(card: &PickCard) -> Line<'static> {
    let color = card
        .player
        .as_ref()
        .and_then(|p| p.position())
        .map(position_color)
        .unwrap_or(Color::White);
    Line::from(Span::styled(format_pick(card), Style::default().fg(color)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::AppSnapshot;
    use crate::tui::tests::cards;
    use draftroom_core::draft::pick::Player;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn drafted_cards(made: u32) -> Vec<PickCard> {
        let mut all = cards(12, made + 1);
        for card in all.iter_mut().take(made as usize) {
            card.player = Some(Player {
                name: format!("Player {}", card.pick_number),
                position: "WR".to_string(),
                team: "MIA".to_string(),
                jersey_number: None,
            });
        }
        all
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
    fn format_pick_includes_slot_and_player() {
        let card = drafted_cards(3)[1].clone();
        assert_eq!(format_pick(&card), "1.02 Team 1: Player 2 (WR, MIA)");
    }

    #[test]
    fn renders_empty_log() {
        let backend = TestBackend::new(50, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(screen_text(&terminal).contains("No picks yet."));
    }

    #[test]
    fn renders_most_recent_first() {
        let backend = TestBackend::new(50, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.snapshot = AppSnapshot {
            cards: drafted_cards(5),
            current_pick_number: 6,
            total_slots: 12,
            made_count: 5,
            ..AppSnapshot::default()
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Draft Log (5)"));
        let newest = text.find("Player 5").unwrap();
        let oldest = text.find("Player 1 ").unwrap();
        assert!(newest < oldest);
    }
}
