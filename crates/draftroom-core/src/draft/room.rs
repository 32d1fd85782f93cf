// Draft room state: participants, the pick book and timing, updated from
// feed snapshots.

use tracing::{debug, warn};

use super::countdown::ClockPhase;
use super::exposure::{aggregate, aggregate_for_seat, PositionExposure};
use super::order::{picks_until_turn, resolve_with_order, slot_count, DraftOrder};
use super::pick::{Participant, Pick, PickBook};
use super::timeline::{build_timeline, PickCard};
use super::DraftError;

/// Clock state as published by the feed. Read-only for the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftTimingState {
    pub current_pick_number: u32,
    pub timer_seconds_remaining: u32,
    pub pre_draft_countdown_seconds_remaining: u32,
    pub is_draft_active: bool,
}

impl Default for DraftTimingState {
    fn default() -> Self {
        DraftTimingState {
            current_pick_number: 1,
            timer_seconds_remaining: 0,
            pre_draft_countdown_seconds_remaining: 0,
            is_draft_active: false,
        }
    }
}

/// A consistent view of the room delivered by the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSnapshot {
    pub participants: Vec<Participant>,
    pub picks: Vec<Pick>,
    pub timing: DraftTimingState,
}

/// What changed when a snapshot was applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotDiff {
    /// Picks that gained a player in this snapshot, in pick order.
    pub new_picks: Vec<Pick>,
    /// Whether the current pick number moved.
    pub pick_advanced: bool,
    /// Whether the participant list was (re)established.
    pub participants_changed: bool,
    /// Malformed pick entries dropped from the snapshot.
    pub rejected: usize,
    /// Slots where the snapshot names a different player than before.
    pub conflicts: usize,
    /// Previously made picks the snapshot no longer carries.
    pub missing: usize,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.new_picks.is_empty()
            && !self.pick_advanced
            && !self.participants_changed
            && self.rejected == 0
            && !self.contradicts_history()
    }

    /// True when the snapshot cannot be a later state of the same draft:
    /// a made pick changed player or disappeared.
    pub fn contradicts_history(&self) -> bool {
        self.conflicts > 0 || self.missing > 0
    }
}

/// The complete state of one draft room.
#[derive(Debug, Clone)]
pub struct DraftRoom {
    participants: Vec<Participant>,
    picks: PickBook,
    timing: DraftTimingState,
    total_rounds: u32,
    order: DraftOrder,
    /// Display name of the user's seat, if configured.
    my_name: Option<String>,
}

impl DraftRoom {
    pub fn new(total_rounds: u32, order: DraftOrder, my_name: Option<String>) -> Self {
        DraftRoom {
            participants: Vec::new(),
            picks: PickBook::new(),
            timing: DraftTimingState::default(),
            total_rounds,
            order,
            my_name,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn picks(&self) -> &PickBook {
        &self.picks
    }

    pub fn timing(&self) -> &DraftTimingState {
        &self.timing
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn order(&self) -> DraftOrder {
        self.order
    }

    /// Apply a full snapshot from the feed.
    ///
    /// The snapshot's pick list replaces the book, so a slot is completed
    /// exactly when the latest snapshot carries a pick for it. The diff
    /// reports made picks that changed player or went missing relative to the
    /// previous book.
    ///
    /// Participants may only change before the first pick is made; after
    /// that the seat order is fixed and a differing list is ignored. A room
    /// restored from saved picks has no seats yet and takes the first list
    /// it sees.
    pub fn apply_snapshot(&mut self, snapshot: DraftSnapshot) -> SnapshotDiff {
        let mut diff = SnapshotDiff::default();

        if snapshot.participants != self.participants && !snapshot.participants.is_empty() {
            if self.participants.is_empty() || self.picks.made().next().is_none() {
                debug!("Seating {} participants", snapshot.participants.len());
                self.participants = snapshot.participants;
                diff.participants_changed = true;
            } else {
                warn!("Ignoring participant change after the draft started");
            }
        }

        diff.pick_advanced = self.apply_timing(snapshot.timing);

        let mut book = PickBook::new();
        let mut picks = snapshot.picks;
        picks.sort_by_key(|p| p.pick_number);
        for pick in picks {
            if let Err(e) = book.insert(pick) {
                warn!("Rejected pick from feed: {}", e);
                diff.rejected += 1;
            }
        }

        for before in self.picks.made() {
            let Some(had) = &before.player else { continue };
            match book.get(before.pick_number).and_then(|p| p.player.as_ref()) {
                None => {
                    warn!(
                        "Pick {} ({}) missing from snapshot",
                        before.pick_number, had.name
                    );
                    diff.missing += 1;
                }
                Some(now) if now != had => {
                    warn!(
                        "Pick {} changed from {} to {}",
                        before.pick_number, had.name, now.name
                    );
                    diff.conflicts += 1;
                }
                Some(_) => {}
            }
        }

        diff.new_picks = book
            .made()
            .filter(|p| !self.picks.get(p.pick_number).is_some_and(Pick::is_made))
            .cloned()
            .collect();

        self.picks = book;
        diff
    }

    /// Replace the timing state. Returns true when the current pick moved.
    pub fn apply_timing(&mut self, timing: DraftTimingState) -> bool {
        let advanced = timing.current_pick_number != self.timing.current_pick_number;
        self.timing = timing;
        advanced
    }

    /// Rebuild the pick book from saved picks (crash recovery).
    pub fn restore_from_picks(&mut self, picks: Vec<Pick>) -> Result<usize, DraftError> {
        self.picks.clear();
        for pick in picks {
            self.picks.insert(pick)?;
        }
        Ok(self.picks.len())
    }

    /// Total pick slots: seats x rounds.
    pub fn total_slots(&self) -> Result<u32, DraftError> {
        slot_count(self.participants.len(), self.total_rounds)
    }

    pub fn made_count(&self) -> usize {
        self.picks.made().count()
    }

    pub fn is_complete(&self) -> bool {
        match self.total_slots() {
            Ok(total) => total > 0 && self.made_count() as u64 >= u64::from(total),
            Err(_) => false,
        }
    }

    /// Participant on the clock, if the draft has seats and slots left.
    pub fn on_the_clock(&self) -> Option<&Participant> {
        let pick = self.timing.current_pick_number;
        if pick == 0 || pick > self.total_slots().ok()? {
            return None;
        }
        resolve_with_order(pick, &self.participants, self.order).ok()
    }

    pub fn clock_phase(&self) -> ClockPhase {
        ClockPhase::from_timing(&self.timing, self.total_slots().unwrap_or(0))
    }

    pub fn timeline(&self) -> Result<Vec<PickCard>, DraftError> {
        build_timeline(
            &self.participants,
            &self.picks,
            self.timing.current_pick_number,
            self.total_rounds,
            self.timing.timer_seconds_remaining,
            self.order,
        )
    }

    /// Exposure across every completed pick in the room.
    pub fn exposure(&self) -> PositionExposure {
        aggregate(self.picks.iter())
    }

    /// Seat index of the user, matched case-insensitively by name.
    pub fn my_seat(&self) -> Option<usize> {
        let name = self.my_name.as_deref()?;
        self.participants
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Exposure for the user's seat, falling back to the whole room.
    pub fn my_exposure(&self) -> PositionExposure {
        match self.my_seat() {
            Some(seat) => aggregate_for_seat(
                self.picks.iter(),
                seat,
                self.participants.len(),
                self.order,
            ),
            None => self.exposure(),
        }
    }

    /// Picks until the user's seat is on the clock.
    pub fn picks_until_my_turn(&self) -> Option<u32> {
        let seat = self.my_seat()?;
        picks_until_turn(
            seat,
            self.timing.current_pick_number,
            self.participants.len(),
            self.total_rounds,
            self.order,
        )
        .ok()
        .flatten()
    }
}
