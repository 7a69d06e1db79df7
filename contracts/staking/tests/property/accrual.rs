//! Property-based tests for reward accrual over time.
//!
//! Invariants tested:
//! - Emissions during a window with nothing staked are never paid out
//! - A rate change splits accrual into exact per-rate segments
//! - The boost multiplier only ever rises with tenure

use proptest::prelude::*;
use soroban_sdk::testutils::Ledger as _;

use crate::common::{deploy, staker, DAY};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Stake after an idle window `idle`, hold for `held` (< 7 days):
    /// the claim is `rate × held`, never `rate × (idle + held)`.
    #[test]
    fn prop_idle_window_is_forfeited(
        rate in 1i128..1_000,
        amount in 1i128..1_000_000,
        idle in 1u64..(30 * DAY),
        held in 1u64..(7 * DAY),
    ) {
        let pool = deploy(rate);
        let alice = staker(&pool, amount);

        pool.env.ledger().set_timestamp(idle);
        pool.client.stake(&alice, &amount);

        pool.env.ledger().set_timestamp(idle + held);
        let expected = rate * i128::from(held);
        let pending = pool.client.pending_reward(&alice);

        prop_assert!(pending <= expected);
        prop_assert!(expected - pending <= 1, "rounding loss above one unit");
    }

    /// `R1` for `e1` seconds then `R2` for `e2` seconds pays `R1·e1 + R2·e2`.
    #[test]
    fn prop_rate_change_is_piecewise(
        r1 in 0i128..1_000,
        r2 in 0i128..1_000,
        e1 in 1u64..(3 * DAY),
        e2 in 1u64..(3 * DAY),
        amount in 1i128..1_000_000,
    ) {
        let pool = deploy(r1);
        let alice = staker(&pool, amount);
        pool.client.stake(&alice, &amount);

        pool.env.ledger().set_timestamp(e1);
        pool.client.update_reward_rate(&pool.admin, &r2);

        pool.env.ledger().set_timestamp(e1 + e2);
        let expected = r1 * i128::from(e1) + r2 * i128::from(e2);
        let pending = pool.client.pending_reward(&alice);

        prop_assert!(pending <= expected);
        prop_assert!(expected - pending <= 2, "rounding loss above one unit per segment");
    }

    /// Boost never decreases while the position is left untouched.
    #[test]
    fn prop_boost_monotonic_in_tenure(
        mut checkpoints in prop::collection::vec(0u64..(200 * DAY), 1..12),
    ) {
        let pool = deploy(1);
        let alice = staker(&pool, 10);
        pool.client.stake(&alice, &10);

        checkpoints.sort_unstable();
        let mut last = 0u32;
        for at in checkpoints {
            pool.env.ledger().set_timestamp(at);
            let boost = pool.client.boost_multiplier(&alice);
            prop_assert!(boost >= last);
            prop_assert!([100, 125, 150, 200].contains(&boost));
            last = boost;
        }
    }
}
