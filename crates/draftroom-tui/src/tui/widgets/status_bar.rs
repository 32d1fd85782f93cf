// Status bar widget: connection, draft progress, clock, tab indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftroom_core::draft::countdown::ClockPhase;

use crate::protocol::{AppSnapshot, ConnectionStatus, TabId};
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [dot] [round/pick] [on the clock] [clock] [my turn] | [tabs]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snap = &state.snapshot;
    let separator = || Span::styled(" | ", Style::default().fg(Color::Gray));

    let (dot, dot_color) = connection_indicator(state.connection_status);
    let mut spans = vec![
        Span::styled(format!(" {} ", dot), Style::default().fg(dot_color)),
        Span::styled(progress_text(snap), Style::default().fg(Color::White)),
    ];

    if let Some(name) = &snap.on_the_clock {
        spans.push(separator());
        spans.push(Span::styled(
            format!("On the clock: {}", name),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(separator());
    spans.push(Span::styled(snap.phase.label(), clock_style(&snap.phase)));

    if let Some(text) = my_turn_text(snap.picks_until_my_turn) {
        spans.push(separator());
        spans.push(Span::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(separator());
    spans.extend(tab_spans(state.active_tab));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the connection dot character and its color.
pub fn connection_indicator(status: ConnectionStatus) -> (&'static str, Color) {
    match status {
        ConnectionStatus::Connected => ("●", Color::Green),
        ConnectionStatus::Disconnected => ("●", Color::Red),
    }
}

/// `Round r · Pick p/total`, or a waiting message before seats are known.
pub fn progress_text(snap: &AppSnapshot) -> String {
    if snap.total_slots == 0 {
        return "Waiting for room".to_string();
    }
    match snap.current_round() {
        Some(round) => format!(
            "Round {} · Pick {}/{}",
            round, snap.current_pick_number, snap.total_slots
        ),
        None => format!("Pick {}/{}", snap.made_count, snap.total_slots),
    }
}

pub fn my_turn_text(picks_until: Option<u32>) -> Option<String> {
    match picks_until? {
        0 => Some("You're up!".to_string()),
        1 => Some("You pick next".to_string()),
        n => Some(format!("You pick in {}", n)),
    }
}

/// Shot clock turns red in the final ten seconds.
fn clock_style(phase: &ClockPhase) -> Style {
    match phase {
        ClockPhase::OnTheClock { seconds, .. } if *seconds <= 10 => {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        }
        ClockPhase::OnTheClock { .. } => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ClockPhase::Lobby { .. } => Style::default().fg(Color::Gray),
        ClockPhase::Complete => Style::default().fg(Color::Green),
    }
}

/// Tab indicator spans with the active tab highlighted, e.g.
/// "[1:Players] [2:Log]".
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [(TabId::Available, "1:Players"), (TabId::DraftLog, "2:Log")];

    let mut spans = Vec::new();
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::cards;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn connection_indicator_colors() {
        assert_eq!(connection_indicator(ConnectionStatus::Connected).1, Color::Green);
        assert_eq!(connection_indicator(ConnectionStatus::Disconnected).1, Color::Red);
    }

    #[test]
    fn progress_waits_for_room() {
        assert_eq!(progress_text(&AppSnapshot::default()), "Waiting for room");
    }

    #[test]
    fn progress_shows_round_and_pick() {
        let snap = AppSnapshot {
            cards: cards(40, 6),
            current_pick_number: 6,
            total_slots: 40,
            ..AppSnapshot::default()
        };
        assert_eq!(progress_text(&snap), "Round 2 · Pick 6/40");
    }

    #[test]
    fn progress_after_last_pick() {
        let snap = AppSnapshot {
            cards: cards(40, 41),
            current_pick_number: 41,
            total_slots: 40,
            made_count: 40,
            ..AppSnapshot::default()
        };
        assert_eq!(progress_text(&snap), "Pick 40/40");
    }

    #[test]
    fn my_turn_wording() {
        assert_eq!(my_turn_text(None), None);
        assert_eq!(my_turn_text(Some(0)).as_deref(), Some("You're up!"));
        assert_eq!(my_turn_text(Some(1)).as_deref(), Some("You pick next"));
        assert_eq!(my_turn_text(Some(7)).as_deref(), Some("You pick in 7"));
    }

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(TabId::DraftLog);
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(spans[2].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[2].content, "[2:Log]");
    }

    #[test]
    fn renders_clock_and_on_the_clock() {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.snapshot = AppSnapshot {
            cards: cards(40, 6),
            current_pick_number: 6,
            total_slots: 40,
            on_the_clock: Some("Team 1".to_string()),
            phase: ClockPhase::OnTheClock {
                pick_number: 6,
                seconds: 65,
            },
            picks_until_my_turn: Some(3),
            ..AppSnapshot::default()
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let text = line_text(&terminal);
        assert!(text.contains("Round 2 · Pick 6/40"), "{text}");
        assert!(text.contains("On the clock: Team 1"), "{text}");
        assert!(text.contains("1:05"), "{text}");
        assert!(text.contains("You pick in 3"), "{text}");
    }

    #[test]
    fn renders_lobby_countdown() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.snapshot.phase = ClockPhase::Lobby { seconds: 125 };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(line_text(&terminal).contains("Starts in 2:05"));
    }
}
