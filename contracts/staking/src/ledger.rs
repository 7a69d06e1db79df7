//! Orchestration of the mutating ledger operations.
//!
//! Every operation stages its changes on in-memory copies of `GlobalState`
//! and `Position`, performs the single gateway transfer, and only then writes
//! the records back. A failed transfer therefore leaves storage exactly as it
//! was. Callers hold the exclusive guard and have authenticated the staker.

use soroban_sdk::{log, Address, Env};

use crate::events;
use crate::gateway::AssetGateway;
use crate::rewards;
use crate::storage::{self, GlobalState, Position};
use crate::ContractError;

/// Load the global record and bring its accumulator up to `now`.
pub(crate) fn accrue_global(env: &Env, now: u64) -> Result<GlobalState, ContractError> {
    let mut global = storage::get_global(env);
    if global.total_staked == 0
        && global.reward_rate_per_second > 0
        && now > global.last_accrual_timestamp
    {
        log!(
            env,
            "nothing staked, emissions forfeited for window",
            global.last_accrual_timestamp,
            now
        );
    }
    rewards::accrue(env, &mut global, now)?;
    Ok(global)
}

fn settle_position(
    env: &Env,
    staker: &Address,
    position: &mut Position,
    global: &GlobalState,
    now: u64,
) -> Result<i128, ContractError> {
    let settled = rewards::settle(env, position, global, now);
    if let Err(ContractError::ArithmeticInconsistency) = settled {
        log!(
            env,
            "negative reward delta, checkpoint out of sync",
            staker.clone(),
            position.amount,
            position.reward_checkpoint
        );
    }
    settled
}

fn commit(env: &Env, staker: &Address, global: &GlobalState, position: &Position) {
    storage::set_global(env, global);
    storage::set_position(env, staker, position);
    storage::extend_instance_ttl(env);
}

/// Deposit `amount` and restart the staker's boost clock.
///
/// Reward earned so far is settled at the old amount and old tenure first, so
/// the reset only affects reward earned from now on.
pub(crate) fn stake<G: AssetGateway>(
    env: &Env,
    gateway: &G,
    staker: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let config = storage::get_config(env)?;
    let now = env.ledger().timestamp();

    let mut global = accrue_global(env, now)?;
    let mut position = storage::get_position(env, staker);
    settle_position(env, staker, &mut position, &global, now)?;

    position.amount = position
        .amount
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    position.stake_start_time = now;
    rewards::rebaseline(env, &mut position, &global)?;
    global.total_staked = global
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    gateway.transfer_in(&config.stake_token, staker, amount)?;

    commit(env, staker, &global, &position);
    events::publish_staked(env, staker.clone(), amount, global.total_staked);
    Ok(())
}

/// Return `amount` of stake. Pending reward and the boost clock are kept; a
/// withdrawal down to zero clears the clock.
pub(crate) fn withdraw<G: AssetGateway>(
    env: &Env,
    gateway: &G,
    staker: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let config = storage::get_config(env)?;
    let now = env.ledger().timestamp();

    let mut position = storage::get_position(env, staker);
    if amount > position.amount {
        return Err(ContractError::InsufficientBalance);
    }

    let mut global = accrue_global(env, now)?;
    settle_position(env, staker, &mut position, &global, now)?;

    position.amount -= amount;
    if position.amount == 0 {
        position.stake_start_time = 0;
    }
    rewards::rebaseline(env, &mut position, &global)?;
    global.total_staked = global
        .total_staked
        .checked_sub(amount)
        .filter(|total| *total >= 0)
        .ok_or(ContractError::ArithmeticInconsistency)?;

    gateway.transfer_out(&config.stake_token, staker, amount)?;

    commit(env, staker, &global, &position);
    events::publish_withdrawn(env, staker.clone(), amount, global.total_staked);
    Ok(())
}

/// Pay out everything settled for `staker`. Returns the amount paid.
pub(crate) fn claim<G: AssetGateway>(
    env: &Env,
    gateway: &G,
    staker: &Address,
) -> Result<i128, ContractError> {
    let config = storage::get_config(env)?;
    let now = env.ledger().timestamp();

    let global = accrue_global(env, now)?;
    let mut position = storage::get_position(env, staker);
    settle_position(env, staker, &mut position, &global, now)?;

    let claimed = position.pending_reward;
    if claimed <= 0 {
        return Err(ContractError::NoRewardsAvailable);
    }
    position.pending_reward = 0;

    gateway.transfer_out(&config.reward_token, staker, claimed)?;

    commit(env, staker, &global, &position);
    events::publish_reward_claimed(env, staker.clone(), claimed);
    Ok(claimed)
}

/// Return the whole stake without touching reward accounting for the
/// position. Unclaimed reward is forfeited and the position is erased.
///
/// Only the global clock is advanced so other stakers keep accruing
/// correctly. With no stake it returns 0 and writes nothing, so reward left
/// over from a full withdrawal stays claimable.
pub(crate) fn emergency_withdraw<G: AssetGateway>(
    env: &Env,
    gateway: &G,
    staker: &Address,
) -> Result<i128, ContractError> {
    let config = storage::get_config(env)?;
    let now = env.ledger().timestamp();

    let position = storage::get_position(env, staker);
    let amount = position.amount;
    if amount <= 0 {
        return Ok(0);
    }
    let forfeited = position.pending_reward;

    let mut global = accrue_global(env, now)?;

    global.total_staked = global
        .total_staked
        .checked_sub(amount)
        .filter(|total| *total >= 0)
        .ok_or(ContractError::ArithmeticInconsistency)?;

    gateway.transfer_out(&config.stake_token, staker, amount)?;

    commit(env, staker, &global, &Position::default());
    events::publish_emergency_withdrawn(env, staker.clone(), amount, forfeited);
    Ok(amount)
}

/// Flush accrual at the old rate, then switch to `new_rate`.
pub(crate) fn update_reward_rate(
    env: &Env,
    caller: &Address,
    new_rate: i128,
) -> Result<(), ContractError> {
    if new_rate < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let now = env.ledger().timestamp();

    let mut global = accrue_global(env, now)?;
    let old_rate = global.reward_rate_per_second;
    global.reward_rate_per_second = new_rate;

    storage::set_global(env, &global);
    storage::extend_instance_ttl(env);
    events::publish_reward_rate_updated(env, caller.clone(), old_rate, new_rate);
    Ok(())
}

/// Read-only composition of `accrue` + `settle` at the current ledger time.
pub(crate) fn pending_reward(env: &Env, staker: &Address) -> Result<i128, ContractError> {
    let global = storage::get_global(env);
    let position = storage::get_position(env, staker);
    rewards::pending_reward_at(env, &global, &position, env.ledger().timestamp())
}
