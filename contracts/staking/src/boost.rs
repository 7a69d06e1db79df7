//! Tenure-based boost multiplier.
//!
//! The boost is a percentage where [`BOOST_BASE`] (100) is 1.00×. Tiers are
//! half-open and lower-bound inclusive, so a position that has been staked for
//! exactly seven days already earns the 125 tier.

pub const SECONDS_PER_DAY: u64 = 86_400;

/// 1.00×
pub const BOOST_BASE: u32 = 100;

/// `(minimum tenure in seconds, multiplier)`, highest tier first.
pub const BOOST_TIERS: [(u64, u32); 3] = [
    (90 * SECONDS_PER_DAY, 200),
    (30 * SECONDS_PER_DAY, 150),
    (7 * SECONDS_PER_DAY, 125),
];

/// Multiplier earned by a streak that started at `stake_start_time`.
///
/// A start time in the future is treated as zero tenure.
pub fn boost_multiplier(stake_start_time: u64, now: u64) -> u32 {
    let tenure = now.saturating_sub(stake_start_time);
    for (min_tenure, multiplier) in BOOST_TIERS {
        if tenure >= min_tenure {
            return multiplier;
        }
    }
    BOOST_BASE
}
