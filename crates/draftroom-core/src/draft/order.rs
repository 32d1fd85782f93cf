// Pick order: which seat is on the clock for a given absolute pick number.

use serde::Deserialize;

use super::pick::Participant;
use super::DraftError;

/// How seats are ordered from one round to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftOrder {
    /// Odd rounds ascend, even rounds descend through the seats.
    #[default]
    Snake,
    /// Every round ascends through the seats.
    Linear,
}

/// Round (1-indexed) that `pick_number` belongs to: `ceil(pick / seats)`.
pub fn round_of(pick_number: u32, seats: usize) -> Result<u32, DraftError> {
    check(pick_number, seats)?;
    let seats = seats as u32;
    Ok(pick_number.div_ceil(seats))
}

/// Position of `pick_number` within its round (1-indexed).
pub fn pick_in_round(pick_number: u32, seats: usize) -> Result<u32, DraftError> {
    check(pick_number, seats)?;
    Ok((pick_number - 1) % seats as u32 + 1)
}

/// Index into the seat list of whoever owns `pick_number`.
pub fn seat_index(pick_number: u32, seats: usize, order: DraftOrder) -> Result<usize, DraftError> {
    let round = round_of(pick_number, seats)?;
    let index_in_round = ((pick_number - 1) % seats as u32) as usize;
    let reversed = order == DraftOrder::Snake && round % 2 == 0;
    Ok(if reversed {
        seats - 1 - index_in_round
    } else {
        index_in_round
    })
}

/// Resolve the participant on the clock for `pick_number` in a snake draft.
pub fn resolve_participant(
    pick_number: u32,
    participants: &[Participant],
) -> Result<&Participant, DraftError> {
    resolve_with_order(pick_number, participants, DraftOrder::Snake)
}

/// Resolve the participant owning `pick_number` under the given order.
pub fn resolve_with_order(
    pick_number: u32,
    participants: &[Participant],
    order: DraftOrder,
) -> Result<&Participant, DraftError> {
    let idx = seat_index(pick_number, participants.len(), order)?;
    Ok(&participants[idx])
}

/// Number of pick slots in a draft: `seats * total_rounds`.
pub fn slot_count(seats: usize, total_rounds: u32) -> Result<u32, DraftError> {
    u32::try_from(seats)
        .ok()
        .and_then(|s| s.checked_mul(total_rounds))
        .ok_or_else(|| {
            DraftError::InvalidInput(format!(
                "{seats} seats x {total_rounds} rounds exceeds the pick number range"
            ))
        })
}

/// Every pick number owned by seat `seat` across `total_rounds` rounds.
pub fn picks_for_seat(
    seat: usize,
    seats: usize,
    total_rounds: u32,
    order: DraftOrder,
) -> Result<Vec<u32>, DraftError> {
    if seat >= seats {
        return Err(DraftError::InvalidInput(format!(
            "seat {seat} out of range for {seats} seats"
        )));
    }
    // Bounds every pick number computed below.
    slot_count(seats, total_rounds)?;
    let per_round = seats as u32;
    let picks = (1..=total_rounds)
        .map(|round| {
            let reversed = order == DraftOrder::Snake && round % 2 == 0;
            let offset = if reversed { seats - 1 - seat } else { seat } as u32;
            (round - 1) * per_round + offset + 1
        })
        .collect();
    Ok(picks)
}

/// Number of picks before `seat` is next on the clock, counting from the
/// current pick. Zero means the seat is on the clock now; `None` means the
/// seat has no picks left.
pub fn picks_until_turn(
    seat: usize,
    current_pick: u32,
    seats: usize,
    total_rounds: u32,
    order: DraftOrder,
) -> Result<Option<u32>, DraftError> {
    let picks = picks_for_seat(seat, seats, total_rounds, order)?;
    Ok(picks
        .into_iter()
        .find(|&p| p >= current_pick)
        .map(|p| p - current_pick))
}

fn check(pick_number: u32, seats: usize) -> Result<(), DraftError> {
    if seats == 0 {
        return Err(DraftError::InvalidInput(
            "participant list is empty".to_string(),
        ));
    }
    if pick_number == 0 {
        return Err(DraftError::InvalidInput(
            "pick numbers are 1-based".to_string(),
        ));
    }
    Ok(())
}
