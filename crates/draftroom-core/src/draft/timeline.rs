// Pick timeline: one card per pick slot across every round.

use super::order::{pick_in_round, resolve_with_order, round_of, slot_count, DraftOrder};
use super::pick::{Participant, PickBook, Player};
use super::DraftError;

/// Display state of a pick card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// A pick exists for this slot.
    Completed,
    /// No pick yet and this slot is on the clock.
    Current,
    /// Not reached yet.
    Future,
}

/// One card on the picks bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PickCard {
    pub pick_number: u32,
    pub round: u32,
    pub pick_in_round: u32,
    pub participant: Participant,
    pub state: CardState,
    /// Drafted player, for completed cards.
    pub player: Option<Player>,
    /// Seconds left on the shot clock, for the current card.
    pub countdown: Option<u32>,
}

impl PickCard {
    /// Short label such as `2.05`.
    pub fn slot_label(&self) -> String {
        format!("{}.{:02}", self.round, self.pick_in_round)
    }
}

/// Classify a slot given the pick book and the current pick number.
pub fn classify(pick_number: u32, picks: &PickBook, current_pick_number: u32) -> CardState {
    if picks.contains(pick_number) {
        CardState::Completed
    } else if pick_number == current_pick_number {
        CardState::Current
    } else {
        CardState::Future
    }
}

/// Build the full card sequence of length `participants.len() * total_rounds`.
pub fn build_timeline(
    participants: &[Participant],
    picks: &PickBook,
    current_pick_number: u32,
    total_rounds: u32,
    timer_seconds_remaining: u32,
    order: DraftOrder,
) -> Result<Vec<PickCard>, DraftError> {
    let seats = participants.len();
    if seats == 0 {
        return Err(DraftError::InvalidInput(
            "participant list is empty".to_string(),
        ));
    }

    let total_slots = slot_count(seats, total_rounds)?;
    let mut cards = Vec::with_capacity(total_slots as usize);

    for n in 1..=total_slots {
        let state = classify(n, picks, current_pick_number);
        let player = match state {
            CardState::Completed => picks.get(n).and_then(|p| p.player.clone()),
            _ => None,
        };
        let countdown = match state {
            CardState::Current => Some(timer_seconds_remaining),
            _ => None,
        };
        cards.push(PickCard {
            pick_number: n,
            round: round_of(n, seats)?,
            pick_in_round: pick_in_round(n, seats)?,
            participant: resolve_with_order(n, participants, order)?.clone(),
            state,
            player,
            countdown,
        });
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::pick::Pick;

    fn seats(n: usize) -> Vec<Participant> {
        (0..n).map(|i| Participant::new(format!("p{i}"))).collect()
    }

    fn made(n: u32) -> Pick {
        Pick {
            pick_number: n,
            player: Some(Player {
                name: format!("Player {n}"),
                position: "RB".to_string(),
                team: "SF".to_string(),
                jersey_number: Some(23),
            }),
            picked_at: None,
        }
    }

    fn book(numbers: &[u32]) -> PickBook {
        let mut book = PickBook::new();
        for &n in numbers {
            book.insert(made(n)).unwrap();
        }
        book
    }

    #[test]
    fn length_is_seats_times_rounds() {
        let cards = build_timeline(&seats(12), &PickBook::new(), 1, 18, 30, DraftOrder::Snake).unwrap();
        assert_eq!(cards.len(), 216);
        assert_eq!(cards.last().unwrap().pick_number, 216);
        assert_eq!(cards.last().unwrap().round, 18);
    }

    #[test]
    fn states_follow_picks_and_current() {
        let picks = book(&[1, 2, 3]);
        let cards = build_timeline(&seats(4), &picks, 4, 2, 17, DraftOrder::Snake).unwrap();
        let states: Vec<CardState> = cards.iter().map(|c| c.state).collect();
        assert_eq!(
            states,
            vec![
                CardState::Completed,
                CardState::Completed,
                CardState::Completed,
                CardState::Current,
                CardState::Future,
                CardState::Future,
                CardState::Future,
                CardState::Future,
            ]
        );
        assert_eq!(cards[3].countdown, Some(17));
        assert!(cards[0].countdown.is_none());
        assert_eq!(cards[0].player.as_ref().unwrap().name, "Player 1");
        assert!(cards[4].player.is_none());
    }

    #[test]
    fn completed_wins_over_current() {
        let picks = book(&[5]);
        assert_eq!(classify(5, &picks, 5), CardState::Completed);
    }

    #[test]
    fn exactly_one_state_per_slot() {
        let picks = book(&[1, 2, 7]);
        let cards = build_timeline(&seats(3), &picks, 3, 3, 10, DraftOrder::Snake).unwrap();
        for card in &cards {
            let completed = card.state == CardState::Completed;
            assert_eq!(completed, picks.contains(card.pick_number));
            if card.pick_number == 3 {
                assert_eq!(card.state, CardState::Current);
            }
        }
        assert_eq!(
            cards.iter().filter(|c| c.state == CardState::Current).count(),
            1
        );
    }

    #[test]
    fn cards_carry_snake_participant() {
        let cards = build_timeline(&seats(3), &PickBook::new(), 1, 2, 0, DraftOrder::Snake).unwrap();
        let names: Vec<&str> = cards.iter().map(|c| c.participant.name.as_str()).collect();
        assert_eq!(names, vec!["p0", "p1", "p2", "p2", "p1", "p0"]);
        assert_eq!(cards[4].slot_label(), "2.02");
    }

    #[test]
    fn inputs_are_not_mutated() {
        let ps = seats(2);
        let picks = book(&[1]);
        let before = picks.clone();
        let a = build_timeline(&ps, &picks, 2, 3, 5, DraftOrder::Snake).unwrap();
        let b = build_timeline(&ps, &picks, 2, 3, 5, DraftOrder::Snake).unwrap();
        assert_eq!(a, b);
        assert_eq!(picks, before);
    }

    #[test]
    fn oversized_draft_is_invalid_input() {
        let result = build_timeline(&seats(12), &PickBook::new(), 1, 500_000_000, 30, DraftOrder::Snake);
        assert!(matches!(result, Err(DraftError::InvalidInput(_))));
    }

    #[test]
    fn empty_participants_rejected() {
        assert!(build_timeline(&[], &PickBook::new(), 1, 18, 30, DraftOrder::Snake).is_err());
    }
}
