// Messages exchanged between the app loop and the TUI.

use draftroom_core::draft::countdown::ClockPhase;
use draftroom_core::draft::exposure::PositionExposure;
use draftroom_core::draft::timeline::{CardState, PickCard};
use draftroom_core::players::ProjectedPlayer;

/// Feed connection state shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Tabs in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Available,
    DraftLog,
}

/// Everything the TUI needs to draw one frame of draft state.
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub draft_name: String,
    /// One card per pick slot. Empty until participants are known.
    pub cards: Vec<PickCard>,
    pub phase: ClockPhase,
    pub current_pick_number: u32,
    pub total_slots: u32,
    pub made_count: usize,
    /// Name of the participant on the clock.
    pub on_the_clock: Option<String>,
    pub exposure: PositionExposure,
    /// Whether `exposure` covers only the user's seat.
    pub exposure_is_mine: bool,
    pub picks_until_my_turn: Option<u32>,
    /// Undrafted players, best projection first.
    pub available: Vec<ProjectedPlayer>,
}

impl Default for AppSnapshot {
    fn default() -> Self {
        AppSnapshot {
            draft_name: String::new(),
            cards: Vec::new(),
            phase: ClockPhase::Lobby { seconds: 0 },
            current_pick_number: 1,
            total_slots: 0,
            made_count: 0,
            on_the_clock: None,
            exposure: PositionExposure::default(),
            exposure_is_mine: false,
            picks_until_my_turn: None,
            available: Vec::new(),
        }
    }
}

impl AppSnapshot {
    /// Completed cards, most recent first.
    pub fn draft_log(&self) -> impl Iterator<Item = &PickCard> {
        self.cards
            .iter()
            .rev()
            .filter(|c| c.state == CardState::Completed && c.player.is_some())
    }

    /// Round of the current pick, if it falls inside the draft.
    pub fn current_round(&self) -> Option<u32> {
        self.cards
            .get(self.current_pick_number.checked_sub(1)? as usize)
            .map(|c| c.round)
    }
}

/// Updates pushed from the app loop to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Snapshot(Box<AppSnapshot>),
    ConnectionStatus(ConnectionStatus),
}

/// Commands sent from the TUI to the app loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}
