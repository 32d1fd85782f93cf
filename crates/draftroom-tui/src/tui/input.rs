// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the app
// loop, or into local ViewState mutations (tab switching, scrolling, picks
// bar navigation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::{TabId, UserCommand};

/// Lines moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app loop. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Press and Release on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('1') => view_state.active_tab = TabId::Available,
        KeyCode::Char('2') => view_state.active_tab = TabId::DraftLog,

        KeyCode::Up | KeyCode::Char('k') => scroll_up(view_state, 1),
        KeyCode::Down | KeyCode::Char('j') => scroll_down(view_state, 1),
        KeyCode::PageUp => scroll_up(view_state, PAGE_SIZE),
        KeyCode::PageDown => scroll_down(view_state, PAGE_SIZE),

        KeyCode::Left | KeyCode::Char('h') => view_state.scroll_picks_bar(-1),
        KeyCode::Right | KeyCode::Char('l') => view_state.scroll_picks_bar(1),
        KeyCode::Char('c') => view_state.recenter_picks_bar(),

        KeyCode::Char('q') => view_state.confirm_quit = true,

        _ => {}
    }
    None
}

/// In quit confirmation mode `y`/`q` confirm, `n`/Esc cancel, and every other
/// key is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn active_widget_key(view_state: &ViewState) -> &'static str {
    match view_state.active_tab {
        TabId::Available => "available",
        TabId::DraftLog => "draft_log",
    }
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
