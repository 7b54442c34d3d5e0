//! Scoring rules.
//!
//! All arithmetic is integral. `floor(10 × (1 + k × 0.1))` is computed as
//! `10 × (10 + k) / 10` so float rounding can never cost a point.

/// Points for a match before the combo multiplier.
pub const BASE_MATCH_SCORE: u32 = 10;

/// Bonus points per second left on the clock when the board is cleared.
pub const TIME_BONUS_PER_SECOND: u32 = 2;

/// Points earned by a match made with `streak` consecutive matches before it.
pub fn earned_score(streak: u32) -> u32 {
    BASE_MATCH_SCORE.saturating_mul(10u32.saturating_add(streak)) / 10
}

/// Completion bonus for the remaining time.
pub fn time_bonus(time_remaining_secs: u32) -> u32 {
    time_remaining_secs.saturating_mul(TIME_BONUS_PER_SECOND)
}

/// Percentage of pairs found, rounded half up. An empty board scores 0.
pub fn accuracy(matched_pairs: usize, total_pairs: usize) -> u32 {
    if total_pairs == 0 {
        return 0;
    }
    ((matched_pairs * 200 + total_pairs) / (total_pairs * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combo_multiplier() {
        assert_eq!(earned_score(0), 10);
        assert_eq!(earned_score(1), 11);
        assert_eq!(earned_score(2), 12);
        assert_eq!(earned_score(7), 17);
    }

    #[test]
    fn earned_score_matches_float_formula() {
        for k in 0..50u32 {
            let expected = (10.0 * (1.0 + k as f64 / 10.0) + 1e-9).floor() as u32;
            assert_eq!(earned_score(k), expected, "streak {k}");
        }
    }

    #[test]
    fn time_bonus_doubles_seconds() {
        assert_eq!(time_bonus(30), 60);
        assert_eq!(time_bonus(0), 0);
    }

    #[test]
    fn accuracy_rounds_to_nearest() {
        assert_eq!(accuracy(2, 4), 50);
        assert_eq!(accuracy(4, 4), 100);
        assert_eq!(accuracy(0, 4), 0);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 8), 13);
        assert_eq!(accuracy(0, 0), 0);
    }
}
