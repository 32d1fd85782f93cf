// Participants, players, picks and the sparse pick book.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DraftError;

/// Football positions recognised by the draft room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    /// Individual defensive player (IDP leagues).
    DefensivePlayer,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the abbreviations the feed and projection sheets use:
    /// - "D/ST", "DST", "DEF" -> Defense
    /// - "K", "PK" -> Kicker
    /// - "DL", "LB", "DB", "ED", "DI", "CB", "S" -> DefensivePlayer
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" | "PK" => Some(Position::Kicker),
            "DST" | "D/ST" | "DEF" => Some(Position::Defense),
            "DL" | "LB" | "DB" | "ED" | "DI" | "CB" | "S" => Some(Position::DefensivePlayer),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DST",
            Position::DefensivePlayer => "IDP",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// A drafter seated in the room. Order is fixed for the whole draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Participant { name: name.into() }
    }
}

/// A drafted player as reported by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    /// Position string as reported by the feed (e.g. "RB", "D/ST").
    pub position: String,
    pub team: String,
    #[serde(default)]
    pub jersey_number: Option<u8>,
}

impl Player {
    /// Parsed position, if it is one we recognise.
    pub fn position(&self) -> Option<Position> {
        Position::from_str_pos(&self.position)
    }
}

/// A single pick slot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    /// Absolute pick number (1-indexed).
    pub pick_number: u32,
    /// The selected player. Goes from absent to present exactly once.
    #[serde(default)]
    pub player: Option<Player>,
    /// When the selection was observed.
    #[serde(default)]
    pub picked_at: Option<DateTime<Utc>>,
}

impl Pick {
    pub fn is_made(&self) -> bool {
        self.player.is_some()
    }
}

/// Picks keyed by pick number. Slots without an entry have not happened yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickBook {
    picks: BTreeMap<u32, Pick>,
}

impl PickBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pick observed on the feed.
    ///
    /// Returns `Ok(true)` when the book changed. Re-inserting an identical
    /// pick is a no-op. A different player for a slot that already holds one
    /// is rejected, since picks cannot be undone.
    pub fn insert(&mut self, pick: Pick) -> Result<bool, DraftError> {
        if pick.pick_number == 0 {
            return Err(DraftError::InvalidInput(
                "pick numbers are 1-based".to_string(),
            ));
        }

        match self.picks.get_mut(&pick.pick_number) {
            None => {
                self.picks.insert(pick.pick_number, pick);
                Ok(true)
            }
            Some(existing) => match (&existing.player, &pick.player) {
                (Some(have), Some(new)) if have == new => Ok(false),
                (Some(have), Some(_)) => Err(DraftError::PickAlreadyMade {
                    pick_number: pick.pick_number,
                    existing: have.name.clone(),
                }),
                (Some(_), None) => Ok(false),
                (None, Some(_)) => {
                    *existing = pick;
                    Ok(true)
                }
                (None, None) => Ok(false),
            },
        }
    }

    pub fn get(&self, pick_number: u32) -> Option<&Pick> {
        self.picks.get(&pick_number)
    }

    pub fn contains(&self, pick_number: u32) -> bool {
        self.picks.contains_key(&pick_number)
    }

    /// Picks in pick-number order.
    pub fn iter(&self) -> impl Iterator<Item = &Pick> {
        self.picks.values()
    }

    /// Picks that have a player attached.
    pub fn made(&self) -> impl Iterator<Item = &Pick> {
        self.picks.values().filter(|p| p.is_made())
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }
}
