// Wire messages published by the draft room feed.
//
// Every message is a JSON object tagged by `type`. Clock fields are signed on
// the wire; anything below zero is clamped before it reaches the room.

use serde::Deserialize;
use tracing::warn;

use crate::draft::pick::{Participant, Pick};
use crate::draft::room::{DraftSnapshot, DraftTimingState};

/// Messages received from the feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedMessage {
    /// Full state of the room.
    DraftSnapshot { payload: SnapshotPayload },
    /// Clock-only update between snapshots.
    ClockTick { payload: ClockPayload },
    /// Keep-alive; carries no state.
    Heartbeat {
        #[serde(default)]
        timestamp: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub picks: Vec<Pick>,
    #[serde(flatten)]
    pub clock: ClockPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockPayload {
    pub current_pick_number: i64,
    #[serde(default)]
    pub timer_seconds_remaining: i64,
    #[serde(default)]
    pub pre_draft_countdown_seconds_remaining: i64,
    #[serde(default)]
    pub is_draft_active: bool,
}

impl ClockPayload {
    /// Convert to room timing, clamping out-of-range values.
    pub fn to_timing(&self) -> DraftTimingState {
        let current_pick_number = if self.current_pick_number < 1 {
            warn!(
                "Feed sent pick number {}, treating as 1",
                self.current_pick_number
            );
            1
        } else {
            saturate(self.current_pick_number)
        };
        DraftTimingState {
            current_pick_number,
            timer_seconds_remaining: clamp_seconds(
                "timerSecondsRemaining",
                self.timer_seconds_remaining,
            ),
            pre_draft_countdown_seconds_remaining: clamp_seconds(
                "preDraftCountdownSecondsRemaining",
                self.pre_draft_countdown_seconds_remaining,
            ),
            is_draft_active: self.is_draft_active,
        }
    }
}

impl SnapshotPayload {
    pub fn into_snapshot(self) -> DraftSnapshot {
        DraftSnapshot {
            timing: self.clock.to_timing(),
            participants: self.participants,
            picks: self.picks,
        }
    }
}

/// Parse one text frame from the feed.
pub fn parse_message(json: &str) -> Result<FeedMessage, serde_json::Error> {
    serde_json::from_str(json)
}

fn clamp_seconds(field: &str, value: i64) -> u32 {
    if value < 0 {
        warn!("Feed sent negative {} ({}), clamping to 0", field, value);
        0
    } else {
        saturate(value)
    }
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
