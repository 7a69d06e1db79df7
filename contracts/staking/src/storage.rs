//! Persisted ledger records and their storage layout.
//!
//! Instance storage holds the singletons (`Config`, `GlobalState`, the
//! initialization flag and any pending admin). Positions live in persistent
//! storage under `(POSITION, staker)` and are sparse: a missing entry reads as
//! an all-zero position, and an all-zero position is removed instead of
//! written.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::boost::{self, BOOST_BASE};
use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const GLOBAL: Symbol = symbol_short!("GLOBAL");
const INITIALIZED: Symbol = symbol_short!("INIT");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");

const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

// ── Records ──────────────────────────────────────────────────────────────────

/// Deploy-time configuration written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
}

/// Pool-wide accrual state.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobalState {
    /// Reward units emitted per second across all stakers.
    pub reward_rate_per_second: i128,
    /// Cumulative reward per unit of stake, scaled by `rewards::SCALE`.
    pub acc_reward_per_share: i128,
    pub last_accrual_timestamp: u64,
    pub total_staked: i128,
}

/// One staker's position.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    /// Start of the current continuous-staking streak. Meaningless while
    /// `amount` is zero.
    pub stake_start_time: u64,
    /// `amount × acc_reward_per_share / SCALE` at the last settlement.
    pub reward_checkpoint: i128,
    /// Settled, boosted reward that has not been paid out yet.
    pub pending_reward: i128,
}

impl Position {
    pub fn is_empty(&self) -> bool {
        self.amount == 0
            && self.stake_start_time == 0
            && self.reward_checkpoint == 0
            && self.pending_reward == 0
    }

    /// Boost percentage at `now`. A position with no stake has no streak and
    /// reports the base multiplier.
    pub fn boost_at(&self, now: u64) -> u32 {
        if self.amount <= 0 {
            return BOOST_BASE;
        }
        boost::boost_multiplier(self.stake_start_time, now)
    }
}

// ── Instance records ─────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn get_global(env: &Env) -> GlobalState {
    env.storage().instance().get(&GLOBAL).unwrap_or_default()
}

pub fn set_global(env: &Env, global: &GlobalState) {
    env.storage().instance().set(&GLOBAL, global);
}

pub fn get_pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn set_pending_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&PENDING_ADMIN, admin);
}

pub fn clear_pending_admin(env: &Env) {
    env.storage().instance().remove(&PENDING_ADMIN);
}

// ── Positions ────────────────────────────────────────────────────────────────

fn position_key(staker: &Address) -> (Symbol, Address) {
    (POSITION, staker.clone())
}

pub fn get_position(env: &Env, staker: &Address) -> Position {
    let key = position_key(staker);
    let position: Option<Position> = env.storage().persistent().get(&key);
    match position {
        Some(position) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            position
        }
        None => Position::default(),
    }
}

pub fn set_position(env: &Env, staker: &Address, position: &Position) {
    let key = position_key(staker);
    if position.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
