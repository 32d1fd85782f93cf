// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `AppSnapshot` plus purely
// local state (tab, scroll offsets, picks bar viewport). The app loop pushes
// `UiUpdate` messages over an mpsc channel; the TUI applies them and
// re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use draftroom_core::draft::scroll::{AutoScrollController, ScrollBehavior, ScrollViewport};

use crate::protocol::{AppSnapshot, ConnectionStatus, TabId, UiUpdate, UserCommand};

use layout::{build_layout, picks_bar_inner_width, AppLayout};

/// Render tick interval (~30 fps).
const RENDER_TICK: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// PicksBarViewport
// ---------------------------------------------------------------------------

/// Horizontal viewport over the picks bar.
///
/// Smooth scrolls set a target that `tick` approaches over successive render
/// ticks; instant scrolls jump straight there. Offsets are clamped so the
/// window never runs past the last card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PicksBarViewport {
    offset: u32,
    target: u32,
    width: u32,
    content_width: u32,
}

impl PicksBarViewport {
    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
        self.clamp();
    }

    pub fn set_content_width(&mut self, content_width: u32) {
        self.content_width = content_width;
        self.clamp();
    }

    fn max_offset(&self) -> u32 {
        self.content_width.saturating_sub(self.width)
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        self.offset = self.offset.min(max);
        self.target = self.target.min(max);
    }

    /// Advance a smooth scroll by one frame. Returns true while moving.
    pub fn tick(&mut self) -> bool {
        if self.offset == self.target {
            return false;
        }
        let distance = self.offset.abs_diff(self.target);
        let step = distance.div_ceil(4);
        if self.offset < self.target {
            self.offset += step;
        } else {
            self.offset -= step;
        }
        true
    }
}

impl ScrollViewport for PicksBarViewport {
    fn offset(&self) -> u32 {
        self.offset
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) {
        let offset = offset.min(self.max_offset());
        self.target = offset;
        if behavior == ScrollBehavior::Instant {
            self.offset = offset;
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    /// Latest draft state from the app loop.
    pub snapshot: AppSnapshot,
    pub connection_status: ConnectionStatus,
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
    pub picks_bar: PicksBarViewport,
    pub auto_scroll: AutoScrollController,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(14, 1)
    }
}

impl ViewState {
    pub fn new(card_width: u16, card_gap: u16) -> Self {
        ViewState {
            snapshot: AppSnapshot::default(),
            connection_status: ConnectionStatus::Disconnected,
            active_tab: TabId::Available,
            scroll_offset: HashMap::new(),
            confirm_quit: false,
            picks_bar: PicksBarViewport::default(),
            auto_scroll: AutoScrollController::new(card_width as u32, card_gap as u32),
        }
    }

    /// Replace the draft state and follow the current pick.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.snapshot = snapshot;
        self.picks_bar.set_content_width(self.content_width());
        self.follow_current_pick();
    }

    /// Update the picks bar width from the terminal layout.
    ///
    /// The viewport has no width before the first draw, so a pick change seen
    /// then could not be scrolled to; any width change re-runs auto-scroll.
    pub fn set_picks_bar_width(&mut self, width: u16) {
        let width = width as u32;
        if width == self.picks_bar.width() {
            return;
        }
        debug!("Picks bar width {} -> {}", self.picks_bar.width(), width);
        self.picks_bar.set_width(width);
        self.auto_scroll.reset();
        self.follow_current_pick();
    }

    /// Total width of every card laid side by side.
    pub fn content_width(&self) -> u32 {
        let cards = self.snapshot.cards.len() as u32;
        if cards == 0 {
            return 0;
        }
        cards * self.auto_scroll.pitch() - self.auto_scroll.card_gap()
    }

    /// The card auto-scroll should track: the current pick, or the last card
    /// once the draft is complete.
    fn focus_pick(&self) -> Option<u32> {
        let cards = self.snapshot.cards.len() as u32;
        if cards == 0 {
            return None;
        }
        Some(self.snapshot.current_pick_number.clamp(1, cards))
    }

    fn follow_current_pick(&mut self) {
        if self.picks_bar.width() == 0 {
            return;
        }
        if let Some(pick) = self.focus_pick() {
            self.auto_scroll.on_pick_changed(pick, &mut self.picks_bar);
        }
    }

    /// Centre the picks bar on the current pick.
    pub fn recenter_picks_bar(&mut self) {
        if let Some(pick) = self.focus_pick() {
            self.auto_scroll.recenter(pick, &mut self.picks_bar);
        }
    }

    /// Move the picks bar by whole cards (negative scrolls left).
    pub fn scroll_picks_bar(&mut self, cards: i32) {
        let delta = cards.unsigned_abs() * self.auto_scroll.pitch();
        let from = self.picks_bar.target();
        let to = if cards < 0 {
            from.saturating_sub(delta)
        } else {
            from.saturating_add(delta)
        };
        self.picks_bar.scroll_to(to, ScrollBehavior::Instant);
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::ConnectionStatus(status) => state.connection_status = status,
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::picks_bar::render(frame, layout.picks_bar, state);
    widgets::exposure_bar::render(frame, layout.exposure_bar, state);
    render_main_panel(frame, &layout, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area(), state);
    }
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    match state.active_tab {
        TabId::Available => widgets::available::render(frame, layout.main_panel, state),
        TabId::DraftLog => widgets::draft_log::render(frame, layout.main_panel, state),
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.confirm_quit {
        " y:Confirm quit | n/Esc:Cancel"
    } else {
        " q:Quit | 1-2:Tabs | j/k:Scroll | h/l:Picks | c:Centre"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over UI updates, keyboard input and render ticks until the user
/// quits or the app loop goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(RENDER_TICK);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App loop is shutting down.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                view_state.picks_bar.tick();
                if let Err(e) = terminal.draw(|frame| {
                    view_state.set_picks_bar_width(picks_bar_inner_width(frame.area()));
                    render_frame(frame, &view_state);
                }) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
