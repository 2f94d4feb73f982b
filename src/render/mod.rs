pub mod debts;
pub mod leaderboard;
pub mod legacy;
pub mod scores;

/// Rounds half-way values toward positive infinity, the way the pages have
/// always rounded (`2.5 → 3`, `-2.5 → -2`).
pub fn round_half_up(x: f64) -> i64 {
    let f = x.floor();
    if x - f >= 0.5 {
        f as i64 + 1
    } else {
        f as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(3.6), 4);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(5.2), 5);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-0.5), 0);
    }
}
