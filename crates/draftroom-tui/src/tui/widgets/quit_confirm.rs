// Quit confirmation overlay.
//
// A centered modal drawn over the dashboard while `ViewState::confirm_quit`
// is set. Picks are already on disk, so it reports how many will be replayed
// on the next start.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

const DIALOG_WIDTH: u16 = 32;
const DIALOG_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Leave draft room? ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    let bold = |color| Style::default().fg(color).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(format!("  {}", saved_text(state.snapshot.made_count))),
        Line::from(vec![
            Span::raw("  Quit? ("),
            Span::styled("y", bold(Color::Green)),
            Span::raw("/"),
            Span::styled("n", bold(Color::Red)),
            Span::raw(")"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

pub fn saved_text(made_count: usize) -> String {
    match made_count {
        0 => "No picks recorded yet.".to_string(),
        1 => "1 pick saved.".to_string(),
        n => format!("{} picks saved.", n),
    }
}

/// Centered rectangle of the given size, clamped to `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
