// Picks bar widget: a horizontal strip of pick cards, one per slot.
//
// Cards sit at a fixed pitch; the viewport offset in `ViewState::picks_bar`
// decides which columns are visible. Cards cut by either edge are drawn
// partially.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use draftroom_core::draft::countdown::format_countdown;
use draftroom_core::draft::scroll::ScrollViewport;
use draftroom_core::draft::timeline::{CardState, PickCard};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snap = &state.snapshot;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Picks ({}/{})", snap.made_count, snap.total_slots));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if snap.cards.is_empty() {
        let waiting = Paragraph::new("  Waiting for participants...")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(waiting, inner);
        return;
    }

    let offset = state.picks_bar.offset();
    let view_right = offset + inner.width as u32;
    let card_width = state.auto_scroll.card_width();

    for card in &snap.cards {
        let left = state.auto_scroll.card_left(card.pick_number);
        let right = left + card_width;
        if right <= offset || left >= view_right {
            continue;
        }
        let vis_left = left.max(offset);
        let vis_right = right.min(view_right);
        let rect = Rect {
            x: inner.x + (vis_left - offset) as u16,
            y: inner.y,
            width: (vis_right - vis_left) as u16,
            height: inner.height,
        };
        let paragraph = Paragraph::new(card_lines(card, card_width as usize))
            .style(card_style(card.state))
            .scroll((0, (vis_left - left) as u16));
        frame.render_widget(paragraph, rect);
    }
}

/// Colours for each card state.
pub fn card_style(state: CardState) -> Style {
    match state {
        CardState::Completed => Style::default().fg(Color::Black).bg(Color::Gray),
        CardState::Current => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        CardState::Future => Style::default().fg(Color::Gray).bg(Color::DarkGray),
    }
}

/// The three text rows of a card, each padded to `width` columns:
/// slot and drafter, then player (or clock status), then position and team
/// (or the shot clock).
pub fn card_lines(card: &PickCard, width: usize) -> Vec<Line<'static>> {
    let header = format!("{} {}", card.slot_label(), card.participant.name);
    let (middle, bottom) = match card.state {
        CardState::Completed => match &card.player {
            Some(p) => (p.name.clone(), format!("{} {}", p.position, p.team)),
            None => ("Skipped".to_string(), String::new()),
        },
        CardState::Current => (
            "On the clock".to_string(),
            card.countdown.map(format_countdown).unwrap_or_default(),
        ),
        CardState::Future => (String::new(), String::new()),
    };

    [header, middle, bottom]
        .into_iter()
        .map(|s| Line::from(fit(&s, width)))
        .collect()
}

/// Truncate or pad to exactly `width` characters.
fn fit(s: &str, width: usize) -> String {
    let truncated: String = s.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
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
    use draftroom_core::draft::scroll::ScrollBehavior;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn state_with(n: u32, current: u32) -> ViewState {
        let mut state = ViewState::default();
        state.snapshot = AppSnapshot {
            cards: cards(n, current),
            current_pick_number: current,
            total_slots: n,
            made_count: current as usize - 1,
            ..AppSnapshot::default()
        };
        state.picks_bar.set_content_width(state.content_width());
        state
    }

    #[test]
    fn styles_by_state() {
        assert_eq!(card_style(CardState::Completed).bg, Some(Color::Gray));
        let current = card_style(CardState::Current);
        assert_eq!(current.bg, Some(Color::Yellow));
        assert!(current.add_modifier.contains(Modifier::BOLD));
        assert_eq!(card_style(CardState::Future).bg, Some(Color::DarkGray));
    }

    #[test]
    fn completed_card_shows_player() {
        let mut card = cards(4, 3)[0].clone();
        card.player = Some(Player {
            name: "Christian McCaffrey".to_string(),
            position: "RB".to_string(),
            team: "SF".to_string(),
            jersey_number: Some(23),
        });
        let lines = card_lines(&card, 14);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], "1.01 Team 0   ");
        assert_eq!(text[1], "Christian McCa");
        assert_eq!(text[2], "RB SF         ");
    }

    #[test]
    fn current_card_shows_clock() {
        let card = cards(4, 2)[1].clone();
        let text: Vec<String> = card_lines(&card, 14).iter().map(|l| l.to_string()).collect();
        assert_eq!(text[1].trim_end(), "On the clock");
        assert_eq!(text[2].trim_end(), "0:30");
    }

    #[test]
    fn renders_waiting_without_cards() {
        let backend = TestBackend::new(60, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(row_text(&terminal, 1).contains("Waiting for participants"));
    }

    #[test]
    fn renders_cards_from_offset() {
        let backend = TestBackend::new(62, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = state_with(40, 1);
        state.picks_bar.set_width(60);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let row = row_text(&terminal, 1);
        assert!(row.starts_with("│1.01 Team 0"), "{row}");
        assert!(row.contains("1.02 Team 1"), "{row}");

        // Scroll ten cards right: pick 11 is first.
        state.picks_bar.scroll_to(150, ScrollBehavior::Instant);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let row = row_text(&terminal, 1);
        assert!(row.starts_with("│3.03 Team 2"), "{row}");
        assert!(!row.contains("1.01"), "{row}");
    }

    #[test]
    fn partially_visible_card_is_clipped() {
        let backend = TestBackend::new(62, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = state_with(40, 1);
        state.picks_bar.set_width(60);
        state.picks_bar.scroll_to(5, ScrollBehavior::Instant);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let row = row_text(&terminal, 1);
        // First card starts five columns in.
        assert!(row.starts_with("│Team 0"), "{row}");
    }
}
