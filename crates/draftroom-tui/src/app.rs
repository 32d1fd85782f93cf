// Application state and orchestration logic.
//
// The central event loop that coordinates feed events and user commands.
// It owns the draft room, persists new picks, and pushes UI updates to the
// TUI render loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use draftroom_core::config::Config;
use draftroom_core::db::Database;
use draftroom_core::draft::room::{DraftRoom, DraftSnapshot, SnapshotDiff};
use draftroom_core::feed::protocol::FeedMessage;
use draftroom_core::feed::{DraftFeed, FeedEvent};
use draftroom_core::players::{available, ProjectedPlayer};

use crate::protocol::{AppSnapshot, ConnectionStatus, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How long to wait without any feed message before treating the connection
/// as stale.
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(15);

/// How often to check for heartbeat timeout in the main event loop.
pub const HEARTBEAT_CHECK_INTERVAL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub room: DraftRoom,
    pub player_pool: Vec<ProjectedPlayer>,
    pub db: Database,
    /// Picks are stored under this id so a restart only replays the session
    /// in progress.
    pub draft_id: String,
    pub connection_status: ConnectionStatus,
    /// Time of the last feed event. `None` when not connected.
    pub last_ws_message_time: Option<Instant>,
}

impl AppState {
    pub fn new(
        config: Config,
        player_pool: Vec<ProjectedPlayer>,
        db: Database,
        draft_id: String,
    ) -> Self {
        let room = new_room(&config);
        AppState {
            config,
            room,
            player_pool,
            db,
            draft_id,
            connection_status: ConnectionStatus::Disconnected,
            last_ws_message_time: None,
        }
    }

    /// Apply a feed snapshot and persist any newly completed picks.
    ///
    /// A snapshot that changes or drops recorded picks belongs to a
    /// different draft; the room is reset under a fresh draft id and the
    /// snapshot applied to the empty room.
    pub fn apply_snapshot(&mut self, snapshot: DraftSnapshot) -> SnapshotDiff {
        let mut diff = self.room.apply_snapshot(snapshot.clone());
        if diff.contradicts_history() {
            warn!(
                "Snapshot does not continue draft {} ({} changed, {} missing), starting a new session",
                self.draft_id, diff.conflicts, diff.missing
            );
            self.start_new_session();
            diff = self.room.apply_snapshot(snapshot);
        }

        for pick in &diff.new_picks {
            if let Err(e) = self.db.record_pick(pick, &self.draft_id) {
                warn!("Failed to persist pick {}: {:#}", pick.pick_number, e);
            }
        }

        if diff.participants_changed {
            info!("Room seated with {} participants", self.room.participants().len());
        }
        if !diff.new_picks.is_empty() {
            info!(
                "{} new picks, {}/{} made",
                diff.new_picks.len(),
                self.room.made_count(),
                self.room.total_slots().unwrap_or(0)
            );
            if self.room.is_complete() {
                info!("Draft {} complete", self.draft_id);
            }
        }
        diff
    }

    fn start_new_session(&mut self) {
        self.draft_id = Database::generate_draft_id();
        if let Err(e) = self.db.set_draft_id(&self.draft_id) {
            warn!("Failed to store new draft id: {:#}", e);
        }
        self.room = new_room(&self.config);
    }

    /// Build the view model for the TUI.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let cards = match self.room.timeline() {
            Ok(cards) => cards,
            Err(e) => {
                debug!("No timeline yet: {}", e);
                Vec::new()
            }
        };

        AppSnapshot {
            draft_name: self.config.draft.name.clone(),
            cards,
            phase: self.room.clock_phase(),
            current_pick_number: self.room.timing().current_pick_number,
            total_slots: self.room.total_slots().unwrap_or(0),
            made_count: self.room.made_count(),
            on_the_clock: self.room.on_the_clock().map(|p| p.name.clone()),
            exposure: self.room.my_exposure(),
            exposure_is_mine: self.room.my_seat().is_some(),
            picks_until_my_turn: self.room.picks_until_my_turn(),
            available: available(&self.player_pool, self.room.picks())
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

fn new_room(config: &Config) -> DraftRoom {
    DraftRoom::new(
        config.draft.total_rounds,
        config.draft.order,
        config.draft.my_name.clone(),
    )
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until a quit command arrives or the feed
/// or command channel closes.
pub async fn run<F: DraftFeed>(
    mut feed: F,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    // Recovered picks are visible before the feed connects.
    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;

    let mut heartbeat_interval = tokio::time::interval(HEARTBEAT_CHECK_INTERVAL);
    // The first tick completes immediately.
    heartbeat_interval.tick().await;

    loop {
        tokio::select! {
            event = feed.next_event() => {
                match event {
                    Some(FeedEvent::Connected { addr }) => {
                        info!("Feed connected from {}", addr);
                        state.connection_status = ConnectionStatus::Connected;
                        state.last_ws_message_time = Some(Instant::now());
                        let _ = ui_tx.send(UiUpdate::ConnectionStatus(ConnectionStatus::Connected)).await;
                    }
                    Some(FeedEvent::Disconnected) => {
                        info!("Feed disconnected");
                        state.connection_status = ConnectionStatus::Disconnected;
                        state.last_ws_message_time = None;
                        let _ = ui_tx.send(UiUpdate::ConnectionStatus(ConnectionStatus::Disconnected)).await;
                    }
                    Some(FeedEvent::Message(msg)) => {
                        // Messages after a heartbeat timeout restore the connection.
                        if state.connection_status == ConnectionStatus::Disconnected
                            && state.last_ws_message_time.is_some()
                        {
                            info!("Feed connection restored");
                            state.connection_status = ConnectionStatus::Connected;
                            let _ = ui_tx.send(UiUpdate::ConnectionStatus(ConnectionStatus::Connected)).await;
                        }
                        if state.last_ws_message_time.is_some() {
                            state.last_ws_message_time = Some(Instant::now());
                        }
                        handle_feed_message(&mut state, msg, &ui_tx).await;
                    }
                    None => {
                        info!("Feed closed, shutting down");
                        break;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            _ = heartbeat_interval.tick() => {
                if state.connection_status == ConnectionStatus::Connected {
                    if let Some(last_time) = state.last_ws_message_time {
                        let elapsed = last_time.elapsed();
                        if elapsed > HEARTBEAT_TIMEOUT {
                            warn!(
                                "No feed message received for {:?}, marking connection as stale",
                                elapsed
                            );
                            state.connection_status = ConnectionStatus::Disconnected;
                            let _ = ui_tx
                                .send(UiUpdate::ConnectionStatus(ConnectionStatus::Disconnected))
                                .await;
                        }
                    }
                }
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Handle one decoded feed message.
async fn handle_feed_message(state: &mut AppState, msg: FeedMessage, ui_tx: &mpsc::Sender<UiUpdate>) {
    match msg {
        FeedMessage::DraftSnapshot { payload } => {
            let diff = state.apply_snapshot(payload.into_snapshot());
            if diff.is_empty() {
                debug!("Snapshot carried no changes");
            }
        }
        FeedMessage::ClockTick { payload } => {
            if state.room.apply_timing(payload.to_timing()) {
                debug!(
                    "Pick advanced to {}",
                    state.room.timing().current_pick_number
                );
            }
        }
        FeedMessage::Heartbeat { .. } => return,
    }

    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;
}

/// Replay picks stored under the current draft id into the room.
///
/// Returns `Ok(true)` if any picks were restored.
pub fn recover_from_db(state: &mut AppState) -> anyhow::Result<bool> {
    if !state.db.has_draft_in_progress(&state.draft_id)? {
        info!("No draft in progress for draft_id={}, starting fresh", state.draft_id);
        return Ok(false);
    }

    let picks = state.db.load_picks(&state.draft_id)?;
    let restored = state.room.restore_from_picks(picks)?;
    info!(
        "Crash recovery: restored {} picks for draft_id={}",
        restored, state.draft_id
    );
    Ok(restored > 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
