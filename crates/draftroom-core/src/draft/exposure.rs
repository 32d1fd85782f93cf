// Position exposure: share of completed picks at each skill position.
//
// The denominator is every pick with a player, whatever its position, so
// kicker, defense and IDP picks deflate the four displayed buckets.

use super::order::{seat_index, DraftOrder};
use super::pick::{Pick, Position};

/// Percentage of completed picks at each skill position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionExposure {
    pub qb: f64,
    pub rb: f64,
    pub wr: f64,
    pub te: f64,
}

impl PositionExposure {
    pub fn total(&self) -> f64 {
        self.qb + self.rb + self.wr + self.te
    }

    /// Buckets in display order, paired with their position.
    pub fn buckets(&self) -> [(Position, f64); 4] {
        [
            (Position::Quarterback, self.qb),
            (Position::RunningBack, self.rb),
            (Position::WideReceiver, self.wr),
            (Position::TightEnd, self.te),
        ]
    }

    /// Split a bar of `width` cells into per-bucket cell counts.
    ///
    /// Uses largest-remainder rounding so the segments sum to the share of
    /// the bar the buckets cover, never more than `width`.
    pub fn segments(&self, width: u16) -> [(Position, u16); 4] {
        let width_f = width as f64;
        let buckets = self.buckets();
        let covered = ((self.total() / 100.0) * width_f).round().min(width_f) as u16;

        let mut cells = [0u16; 4];
        let mut remainders = [0.0f64; 4];
        for (i, (_, pct)) in buckets.iter().enumerate() {
            let exact = pct / 100.0 * width_f;
            cells[i] = exact.floor() as u16;
            remainders[i] = exact - exact.floor();
        }

        let mut assigned: u16 = cells.iter().sum();
        let mut order: Vec<usize> = (0..4).collect();
        order.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));
        for i in order {
            if assigned >= covered {
                break;
            }
            if remainders[i] > 0.0 {
                cells[i] += 1;
                assigned += 1;
            }
        }

        [
            (buckets[0].0, cells[0]),
            (buckets[1].0, cells[1]),
            (buckets[2].0, cells[2]),
            (buckets[3].0, cells[3]),
        ]
    }
}

/// Aggregate position exposure over a list of picks.
pub fn aggregate<'a, I>(picks: I) -> PositionExposure
where
    I: IntoIterator<Item = &'a Pick>,
{
    let mut completed = 0u32;
    let mut counts = [0u32; 4];

    for pick in picks {
        let Some(player) = &pick.player else {
            continue;
        };
        completed += 1;
        match player.position() {
            Some(Position::Quarterback) => counts[0] += 1,
            Some(Position::RunningBack) => counts[1] += 1,
            Some(Position::WideReceiver) => counts[2] += 1,
            Some(Position::TightEnd) => counts[3] += 1,
            _ => {}
        }
    }

    if completed == 0 {
        return PositionExposure::default();
    }

    let pct = |n: u32| 100.0 * n as f64 / completed as f64;
    PositionExposure {
        qb: pct(counts[0]),
        rb: pct(counts[1]),
        wr: pct(counts[2]),
        te: pct(counts[3]),
    }
}

/// Aggregate exposure over the picks owned by one seat.
pub fn aggregate_for_seat<'a, I>(
    picks: I,
    seat: usize,
    seats: usize,
    order: DraftOrder,
) -> PositionExposure
where
    I: IntoIterator<Item = &'a Pick>,
{
    aggregate(
        picks
            .into_iter()
            .filter(|p| seat_index(p.pick_number, seats, order).ok() == Some(seat)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::pick::Player;

    fn pick(n: u32, pos: Option<&str>) -> Pick {
        Pick {
            pick_number: n,
            player: pos.map(|p| Player {
                name: format!("Player {n}"),
                position: p.to_string(),
                team: "BUF".to_string(),
                jersey_number: None,
            }),
            picked_at: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_scenario() {
        let picks = vec![
            pick(1, Some("QB")),
            pick(2, Some("RB")),
            pick(3, Some("RB")),
            pick(4, Some("WR")),
        ];
        let exp = aggregate(&picks);
        assert!(close(exp.qb, 25.0));
        assert!(close(exp.rb, 50.0));
        assert!(close(exp.wr, 25.0));
        assert!(close(exp.te, 0.0));
    }

    #[test]
    fn no_completed_picks_is_all_zero() {
        assert_eq!(aggregate(&Vec::<Pick>::new()), PositionExposure::default());
        let pending = vec![pick(1, None), pick(2, None)];
        assert_eq!(aggregate(&pending), PositionExposure::default());
    }

    #[test]
    fn other_positions_deflate_buckets() {
        let picks = vec![
            pick(1, Some("QB")),
            pick(2, Some("K")),
            pick(3, Some("D/ST")),
            pick(4, Some("TE")),
        ];
        let exp = aggregate(&picks);
        assert!(close(exp.qb, 25.0));
        assert!(close(exp.te, 25.0));
        assert!(close(exp.total(), 50.0));
    }

    #[test]
    fn pending_picks_not_in_denominator() {
        let picks = vec![pick(1, Some("WR")), pick(2, None)];
        let exp = aggregate(&picks);
        assert!(close(exp.wr, 100.0));
    }

    #[test]
    fn total_never_exceeds_hundred() {
        let positions = ["QB", "RB", "WR", "TE", "K", "DST", "LB"];
        for len in 1..30u32 {
            let picks: Vec<Pick> = (1..=len)
                .map(|n| pick(n, Some(positions[(n as usize * 7 + 3) % positions.len()])))
                .collect();
            assert!(aggregate(&picks).total() <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn seat_exposure_only_counts_own_picks() {
        // 2 seats, snake: seat 0 owns 1, 4, 5; seat 1 owns 2, 3, 6
        let picks = vec![
            pick(1, Some("QB")),
            pick(2, Some("RB")),
            pick(3, Some("RB")),
            pick(4, Some("WR")),
            pick(5, Some("WR")),
            pick(6, Some("TE")),
        ];
        let mine = aggregate_for_seat(&picks, 0, 2, DraftOrder::Snake);
        assert!(close(mine.qb, 100.0 / 3.0));
        assert!(close(mine.wr, 200.0 / 3.0));
        assert!(close(mine.rb, 0.0));
        let theirs = aggregate_for_seat(&picks, 1, 2, DraftOrder::Snake);
        assert!(close(theirs.rb, 200.0 / 3.0));
        assert!(close(theirs.te, 100.0 / 3.0));
    }

    #[test]
    fn segments_fill_width_when_all_skill() {
        let exp = PositionExposure {
            qb: 25.0,
            rb: 50.0,
            wr: 25.0,
            te: 0.0,
        };
        let segs = exp.segments(40);
        assert_eq!(segs[0], (Position::Quarterback, 10));
        assert_eq!(segs[1], (Position::RunningBack, 20));
        assert_eq!(segs[2], (Position::WideReceiver, 10));
        assert_eq!(segs[3], (Position::TightEnd, 0));
    }

    #[test]
    fn segments_round_thirds() {
        let exp = PositionExposure {
            qb: 100.0 / 3.0,
            rb: 100.0 / 3.0,
            wr: 100.0 / 3.0,
            te: 0.0,
        };
        let total: u16 = exp.segments(10).iter().map(|(_, c)| c).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn segments_leave_room_for_other_positions() {
        let exp = PositionExposure {
            qb: 50.0,
            rb: 0.0,
            wr: 0.0,
            te: 0.0,
        };
        let total: u16 = exp.segments(20).iter().map(|(_, c)| c).sum();
        assert_eq!(total, 10);
    }
}
