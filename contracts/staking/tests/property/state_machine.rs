//! Property-based state machine tests for the ledger.
//!
//! Random interleavings of stake / withdraw / claim / emergency-withdraw /
//! rate updates across several stakers. After every step:
//! - `total_staked` equals the sum of all position amounts
//! - the accumulator has not decreased and the clock has not moved backward
//! - no position holds negative pending reward
//!
//! At the end, everything paid out plus everything still pending never
//! exceeds emissions at the maximum 2.00× boost.

use proptest::prelude::*;
use soroban_sdk::{testutils::Ledger as _, Address};
use tenure_staking::ContractError;

use crate::common::{deploy, staker, Pool, DAY};

const STAKERS: usize = 3;
const MAX_RATE: i128 = 1_000;

#[derive(Clone, Debug)]
enum Op {
    Stake(usize, i128),
    Withdraw(usize, i128),
    Claim(usize),
    Emergency(usize),
    SetRate(i128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let who = 0..STAKERS;
    prop_oneof![
        (who.clone(), 1i128..50_000).prop_map(|(w, a)| Op::Stake(w, a)),
        (who.clone(), 1i128..50_000).prop_map(|(w, a)| Op::Withdraw(w, a)),
        who.clone().prop_map(Op::Claim),
        who.prop_map(Op::Emergency),
        (0i128..=MAX_RATE).prop_map(Op::SetRate),
    ]
}

fn assert_invariants(pool: &Pool, stakers: &[Address], last_acc: &mut i128, last_ts: &mut u64) {
    let global = pool.client.get_global_state();

    let mut sum = 0i128;
    for who in stakers {
        let position = pool.client.get_position(who);
        assert!(position.amount >= 0);
        assert!(position.pending_reward >= 0);
        if position.amount == 0 {
            assert_eq!(position.reward_checkpoint, 0);
        }
        sum += position.amount;
    }
    assert_eq!(global.total_staked, sum, "conservation violated");

    assert!(global.acc_reward_per_share >= *last_acc, "accumulator decreased");
    assert!(global.last_accrual_timestamp >= *last_ts, "clock moved backward");
    *last_acc = global.acc_reward_per_share;
    *last_ts = global.last_accrual_timestamp;
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_ledger_invariants_hold(
        steps in prop::collection::vec((op_strategy(), 0u64..(20 * DAY)), 1..24),
    ) {
        let pool = deploy(100);
        let stakers: std::vec::Vec<Address> =
            (0..STAKERS).map(|_| staker(&pool, 1_000_000_000)).collect();

        let mut now = 0u64;
        let mut last_acc = 0i128;
        let mut last_ts = 0u64;
        let mut paid = 0i128;

        for (op, dt) in steps {
            now += dt;
            pool.env.ledger().set_timestamp(now);

            match op {
                Op::Stake(w, amount) => {
                    let _ = pool.client.try_stake(&stakers[w], &amount);
                }
                Op::Withdraw(w, amount) => {
                    let staked = pool.client.get_position(&stakers[w]).amount;
                    let result = pool.client.try_withdraw(&stakers[w], &amount);
                    if amount > staked {
                        match result {
                            Err(Ok(e)) => prop_assert_eq!(e, ContractError::InsufficientBalance),
                            _ => prop_assert!(false, "Expected InsufficientBalance error"),
                        }
                    }
                }
                Op::Claim(w) => {
                    if let Ok(Ok(claimed)) = pool.client.try_claim_rewards(&stakers[w]) {
                        paid += claimed;
                        // Drained: an immediate second claim has nothing left.
                        match pool.client.try_claim_rewards(&stakers[w]) {
                            Err(Ok(e)) => prop_assert_eq!(e, ContractError::NoRewardsAvailable),
                            _ => prop_assert!(false, "Expected NoRewardsAvailable error"),
                        }
                    }
                }
                Op::Emergency(w) => {
                    pool.client.emergency_withdraw(&stakers[w]);
                    prop_assert_eq!(pool.client.get_position(&stakers[w]).amount, 0);
                }
                Op::SetRate(rate) => {
                    pool.client.update_reward_rate(&pool.admin, &rate);
                }
            }

            assert_invariants(&pool, &stakers, &mut last_acc, &mut last_ts);
        }

        let pending: i128 = stakers
            .iter()
            .map(|who| pool.client.pending_reward(who))
            .sum();
        let ceiling = MAX_RATE * i128::from(now) * 2;
        prop_assert!(paid + pending <= ceiling, "paid out more than was emitted");
    }
}
