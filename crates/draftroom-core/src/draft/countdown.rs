// Clock formatting for the lobby countdown and the per-pick shot clock.

use super::room::DraftTimingState;

/// Format a number of seconds as `M:SS`.
///
/// Minutes are unpadded and unbounded (no hour rollover); seconds are
/// zero-padded to two digits.
pub fn format_countdown(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Which clock the room is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    /// Waiting in the lobby for the draft to start.
    Lobby { seconds: u32 },
    /// A pick is in progress.
    OnTheClock { pick_number: u32, seconds: u32 },
    /// Every slot has been filled.
    Complete,
}

impl ClockPhase {
    pub fn from_timing(timing: &DraftTimingState, total_slots: u32) -> Self {
        if total_slots > 0 && timing.current_pick_number > total_slots {
            return ClockPhase::Complete;
        }
        if timing.is_draft_active {
            ClockPhase::OnTheClock {
                pick_number: timing.current_pick_number,
                seconds: timing.timer_seconds_remaining,
            }
        } else {
            ClockPhase::Lobby {
                seconds: timing.pre_draft_countdown_seconds_remaining,
            }
        }
    }

    /// Clock text for the status bar.
    pub fn label(&self) -> String {
        match self {
            ClockPhase::Lobby { seconds } => format!("Starts in {}", format_countdown(*seconds)),
            ClockPhase::OnTheClock { seconds, .. } => format_countdown(*seconds),
            ClockPhase::Complete => "Draft complete".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_values() {
        assert_eq!(format_countdown(0), "0:00");
        assert_eq!(format_countdown(59), "0:59");
        assert_eq!(format_countdown(60), "1:00");
        assert_eq!(format_countdown(65), "1:05");
        assert_eq!(format_countdown(3661), "61:01");
    }

    #[test]
    fn seconds_always_two_digits() {
        for s in 0..600 {
            let text = format_countdown(s);
            let (_, secs) = text.split_once(':').unwrap();
            assert_eq!(secs.len(), 2, "{text}");
        }
    }

    fn timing(pick: u32, timer: u32, lobby: u32, active: bool) -> DraftTimingState {
        DraftTimingState {
            current_pick_number: pick,
            timer_seconds_remaining: timer,
            pre_draft_countdown_seconds_remaining: lobby,
            is_draft_active: active,
        }
    }

    #[test]
    fn lobby_phase_before_start() {
        let phase = ClockPhase::from_timing(&timing(1, 30, 125, false), 216);
        assert_eq!(phase, ClockPhase::Lobby { seconds: 125 });
        assert_eq!(phase.label(), "Starts in 2:05");
    }

    #[test]
    fn shot_clock_while_active() {
        let phase = ClockPhase::from_timing(&timing(14, 9, 0, true), 216);
        assert_eq!(
            phase,
            ClockPhase::OnTheClock {
                pick_number: 14,
                seconds: 9
            }
        );
        assert_eq!(phase.label(), "0:09");
    }

    #[test]
    fn complete_past_last_slot() {
        let phase = ClockPhase::from_timing(&timing(217, 0, 0, true), 216);
        assert_eq!(phase, ClockPhase::Complete);
    }
}
