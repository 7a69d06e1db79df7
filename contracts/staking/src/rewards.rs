use soroban_sdk::{Env, I256};

use crate::boost::BOOST_BASE;
use crate::storage::{GlobalState, Position};
use crate::ContractError;

/// Fixed-point scaling factor for `acc_reward_per_share`.
///
/// Accumulator values are multiplied by this constant before storage so that
/// sub-unit reward per share survives integer division.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

// ── Fixed-point helpers ─────────────────────────────────────────────────────

/// `floor(a × b / d)` for non-negative `a`, `b` and positive `d`.
///
/// Products that fit in `i128` are divided directly; larger ones go through a
/// 256-bit host intermediate. Fails with `ArithmeticOverflow` only when the
/// quotient itself is beyond `i128`.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, d: i128) -> Result<i128, ContractError> {
    if a < 0 || b < 0 || d <= 0 {
        return Err(ContractError::ArithmeticInconsistency);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / d);
    }
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, d))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Accumulator growth for `elapsed` seconds at `reward_rate`:
///
/// ```text
/// Δacc = reward_rate × elapsed × SCALE / total_staked
/// ```
///
/// Zero when nothing is staked.
pub fn reward_per_share_delta(
    env: &Env,
    reward_rate: i128,
    elapsed: u64,
    total_staked: i128,
) -> Result<i128, ContractError> {
    if total_staked <= 0 || elapsed == 0 || reward_rate == 0 {
        return Ok(0);
    }
    let emitted = reward_rate
        .checked_mul(i128::from(elapsed))
        .ok_or(ContractError::ArithmeticOverflow)?;
    mul_div_floor(env, emitted, SCALE, total_staked)
}

/// Unboosted reward a stake of `amount` has earned against accumulator `acc`.
pub fn accrued_for(env: &Env, amount: i128, acc: i128) -> Result<i128, ContractError> {
    mul_div_floor(env, amount, acc, SCALE)
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Bring the accumulator up to date as of `now`.
///
/// With nothing staked only the clock moves: emissions for that window are
/// forfeited. A `now` earlier than the last accrual is ignored so the clock
/// never runs backward.
pub fn accrue(env: &Env, global: &mut GlobalState, now: u64) -> Result<(), ContractError> {
    if now <= global.last_accrual_timestamp {
        return Ok(());
    }
    let elapsed = now - global.last_accrual_timestamp;
    let delta = reward_per_share_delta(
        env,
        global.reward_rate_per_second,
        elapsed,
        global.total_staked,
    )?;
    global.acc_reward_per_share = global
        .acc_reward_per_share
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    global.last_accrual_timestamp = now;
    Ok(())
}

/// Fold everything `position` earned since its last checkpoint into
/// `pending_reward`, boosted by the tenure at `now`, and move the checkpoint
/// to the current accumulator.
///
/// The checkpoint is always the unboosted value. Returns the boosted amount
/// that was added.
pub fn settle(
    env: &Env,
    position: &mut Position,
    global: &GlobalState,
    now: u64,
) -> Result<i128, ContractError> {
    let accrued = accrued_for(env, position.amount, global.acc_reward_per_share)?;
    let raw_delta = accrued
        .checked_sub(position.reward_checkpoint)
        .filter(|delta| *delta >= 0)
        .ok_or(ContractError::ArithmeticInconsistency)?;

    let boost = i128::from(position.boost_at(now));
    let boosted = mul_div_floor(env, raw_delta, boost, i128::from(BOOST_BASE))?;

    position.pending_reward = position
        .pending_reward
        .checked_add(boosted)
        .ok_or(ContractError::ArithmeticOverflow)?;
    position.reward_checkpoint = accrued;
    Ok(boosted)
}

/// Re-baseline the checkpoint after `amount` changed.
pub fn rebaseline(
    env: &Env,
    position: &mut Position,
    global: &GlobalState,
) -> Result<(), ContractError> {
    position.reward_checkpoint = accrued_for(env, position.amount, global.acc_reward_per_share)?;
    Ok(())
}

/// What `pending_reward` would be after `accrue` + `settle` at `now`,
/// computed on copies.
pub fn pending_reward_at(
    env: &Env,
    global: &GlobalState,
    position: &Position,
    now: u64,
) -> Result<i128, ContractError> {
    let mut global = global.clone();
    let mut position = position.clone();
    accrue(env, &mut global, now)?;
    settle(env, &mut position, &global, now)?;
    Ok(position.pending_reward)
}


// ── Unit tests ──────────────────────────────────────────────────────────────
// Math-only tests; the environment is needed only for wide intermediates.
