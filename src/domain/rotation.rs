//! View rotation schedule and countdown.
//!
//! The dashboard cycles through three time horizons on a fixed clock. Both
//! the current view and the seconds left in its block are pure functions of
//! elapsed ticks, so a restart or a missed poll never desynchronizes them.

/// Time horizon shown by the treemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Day,
    Week,
    Total,
}

/// Seconds each schedule slot occupies.
pub const SLOT_SECS: u64 = 5;

/// One full rotation: 20 s of day change, 10 s of weekly change, 10 s of
/// total gain.
pub const SCHEDULE: [ViewKind; 8] = [
    ViewKind::Day,
    ViewKind::Day,
    ViewKind::Day,
    ViewKind::Day,
    ViewKind::Week,
    ViewKind::Week,
    ViewKind::Total,
    ViewKind::Total,
];

/// Seconds in a full rotation cycle.
pub const CYCLE_SECS: u64 = SCHEDULE.len() as u64 * SLOT_SECS;

/// The view shown after `n` rotation ticks (one tick per slot).
pub fn view_for_tick(n: u64) -> ViewKind {
    SCHEDULE[(n % SCHEDULE.len() as u64) as usize]
}

/// The countdown state after `m` seconds. Purely presentational: `view`
/// always equals `view_for_tick(m / SLOT_SECS)`, and `remaining_secs`
/// counts down to the end of the current view's block, not its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub view: ViewKind,
    pub remaining_secs: u64,
}

pub fn countdown_at(m: u64) -> Countdown {
    let s = m % CYCLE_SECS;
    let (view, block_end) = match s / SLOT_SECS {
        0..=3 => (ViewKind::Day, 4 * SLOT_SECS),
        4..=5 => (ViewKind::Week, 6 * SLOT_SECS),
        _ => (ViewKind::Total, CYCLE_SECS),
    };
    Countdown {
        view,
        remaining_secs: block_end - s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_weights_are_four_two_two() {
        let days = SCHEDULE.iter().filter(|v| **v == ViewKind::Day).count();
        let weeks = SCHEDULE.iter().filter(|v| **v == ViewKind::Week).count();
        let totals = SCHEDULE.iter().filter(|v| **v == ViewKind::Total).count();
        assert_eq!((days, weeks, totals), (4, 2, 2));
    }

    #[test]
    fn rotation_repeats_every_eight_ticks() {
        for n in 0..100 {
            assert_eq!(view_for_tick(n), view_for_tick(n + 8));
        }
    }

    #[test]
    fn first_cycle_walks_the_schedule() {
        assert_eq!(view_for_tick(0), ViewKind::Day);
        assert_eq!(view_for_tick(3), ViewKind::Day);
        assert_eq!(view_for_tick(4), ViewKind::Week);
        assert_eq!(view_for_tick(5), ViewKind::Week);
        assert_eq!(view_for_tick(6), ViewKind::Total);
        assert_eq!(view_for_tick(7), ViewKind::Total);
        assert_eq!(view_for_tick(8), ViewKind::Day);
    }

    #[test]
    fn countdown_spans_each_block() {
        assert_eq!(
            countdown_at(0),
            Countdown {
                view: ViewKind::Day,
                remaining_secs: 20
            }
        );
        assert_eq!(
            countdown_at(19),
            Countdown {
                view: ViewKind::Day,
                remaining_secs: 1
            }
        );
        assert_eq!(
            countdown_at(20),
            Countdown {
                view: ViewKind::Week,
                remaining_secs: 10
            }
        );
        assert_eq!(
            countdown_at(29),
            Countdown {
                view: ViewKind::Week,
                remaining_secs: 1
            }
        );
        assert_eq!(
            countdown_at(30),
            Countdown {
                view: ViewKind::Total,
                remaining_secs: 10
            }
        );
        assert_eq!(
            countdown_at(39),
            Countdown {
                view: ViewKind::Total,
                remaining_secs: 1
            }
        );
        assert_eq!(
            countdown_at(40),
            Countdown {
                view: ViewKind::Day,
                remaining_secs: 20
            }
        );
    }

    #[test]
    fn countdown_view_always_matches_the_schedule() {
        for m in 0..400 {
            assert_eq!(countdown_at(m).view, view_for_tick(m / SLOT_SECS));
        }
    }

    #[test]
    fn remaining_seconds_never_hit_zero() {
        for m in 0..400 {
            let remaining = countdown_at(m).remaining_secs;
            assert!(remaining >= 1 && remaining <= 20);
        }
    }
}
