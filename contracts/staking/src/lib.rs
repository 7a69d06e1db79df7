#![no_std]

pub mod boost;
pub mod events;
pub mod gateway;
mod ledger;
pub mod rewards;
pub mod storage;

use soroban_sdk::{contract, contractimpl, Address, Env};
use staking_common::{access, ExclusiveGuard, Role};

use gateway::TokenGateway;
pub use storage::{Config, GlobalState, Position};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    NoRewardsAvailable = 6,
    TransferFailed = 7,
    /// Internal invariant violated (e.g. a negative reward delta). Never
    /// reachable through correct accounting.
    ArithmeticInconsistency = 8,
    ArithmeticOverflow = 9,
    Reentrant = 10,
    TokensIdentical = 11,
    NoPendingAdmin = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TenureStakingContract;

#[contractimpl]
impl TenureStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`  – token address users stake.
    /// * `reward_token` – token address rewards are paid in. The contract
    ///   must be funded with it separately.
    /// * `reward_rate`  – reward units emitted **per second** across all
    ///   stakers.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_rate < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        storage::set_config(
            &env,
            &Config {
                admin: admin.clone(),
                stake_token: stake_token.clone(),
                reward_token: reward_token.clone(),
            },
        );
        storage::set_global(
            &env,
            &GlobalState {
                reward_rate_per_second: reward_rate,
                acc_reward_per_share: 0,
                last_accrual_timestamp: env.ledger().timestamp(),
                total_staked: 0,
            },
        );
        storage::set_initialized(&env);
        storage::extend_instance_ttl(&env);
        access::set_role(&env, &admin, &Role::Admin);

        events::publish_initialized(&env, admin, stake_token, reward_token, reward_rate);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// Every deposit, however small, restarts the boost clock for the whole
    /// position.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        let _guard = Self::enter(&env)?;

        ledger::stake(&env, &TokenGateway::new(&env), &staker, amount)
    }

    /// Withdraw `amount` stake tokens. Settled rewards stay claimable and the
    /// boost clock keeps running.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        let _guard = Self::enter(&env)?;

        ledger::withdraw(&env, &TokenGateway::new(&env), &staker, amount)
    }

    /// Claim all settled rewards for `staker`.
    ///
    /// Fails with `NoRewardsAvailable` when there is nothing to pay.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        let _guard = Self::enter(&env)?;

        ledger::claim(&env, &TokenGateway::new(&env), &staker)
    }

    /// Return the full stake and forfeit any unclaimed reward.
    pub fn emergency_withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        let _guard = Self::enter(&env)?;

        ledger::emergency_withdraw(&env, &TokenGateway::new(&env), &staker)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Real-time pending reward for a staker, boost included, without
    /// mutating state.
    pub fn pending_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        ledger::pending_reward(&env, &staker)
    }

    /// Current boost percentage for a staker (100 = 1.00×).
    pub fn boost_multiplier(env: Env, staker: Address) -> u32 {
        storage::get_position(&env, &staker).boost_at(env.ledger().timestamp())
    }

    pub fn get_position(env: Env, staker: Address) -> Position {
        storage::get_position(&env, &staker)
    }

    /// Stored global state, as of the last accrual.
    pub fn get_global_state(env: Env) -> GlobalState {
        storage::get_global(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        storage::get_global(&env).total_staked
    }

    pub fn get_reward_rate(env: Env) -> i128 {
        storage::get_global(&env).reward_rate_per_second
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        storage::get_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    // ── Rate administration ────────────────────────────────────────────────

    /// Update the reward emission rate.
    ///
    /// Accrual is flushed at the old rate first, so reward is computed
    /// piecewise across rate changes. Requires the `RateSetter` role (or
    /// `Admin`).
    pub fn update_reward_rate(
        env: Env,
        caller: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, &Role::RateSetter)?;
        let _guard = Self::enter(&env)?;

        ledger::update_reward_rate(&env, &caller, new_rate)
    }

    /// Allow `target` to change the reward rate. Admin only.
    pub fn grant_rate_setter(
        env: Env,
        admin: Address,
        target: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_role(&env, &admin, &Role::Admin)?;

        if access::grant_role(&env, &target, &Role::RateSetter) {
            events::publish_role_granted(&env, admin, target, Role::RateSetter);
        }
        Ok(())
    }

    /// Remove the rate-setter role from `target`. Admin only; the admin's own
    /// role cannot be revoked this way.
    pub fn revoke_rate_setter(
        env: Env,
        admin: Address,
        target: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_role(&env, &admin, &Role::Admin)?;

        if access::get_role(&env, &target) != Some(Role::RateSetter) {
            return Ok(());
        }
        access::revoke_role(&env, &target);
        events::publish_role_revoked(&env, admin, target, Role::RateSetter);
        Ok(())
    }

    pub fn get_role(env: Env, who: Address) -> Option<Role> {
        access::get_role(&env, &who)
    }

    /// Whether `addr` may change the reward rate. True for the admin as well.
    pub fn is_rate_setter(env: Env, addr: Address) -> bool {
        access::has_role(&env, &addr, &Role::RateSetter)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        storage::set_pending_admin(&env, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can
    /// call this. The previous admin loses its role.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending = storage::get_pending_admin(&env).ok_or(ContractError::NoPendingAdmin)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let mut config = storage::get_config(&env)?;
        let old_admin = config.admin.clone();
        config.admin = new_admin.clone();
        storage::set_config(&env, &config);
        storage::clear_pending_admin(&env);

        access::revoke_role(&env, &old_admin);
        access::set_role(&env, &new_admin, &Role::Admin);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending = storage::get_pending_admin(&env).ok_or(ContractError::NoPendingAdmin)?;
        storage::clear_pending_admin(&env);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        storage::get_pending_admin(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the configured admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let config = storage::get_config(env)?;
        if *caller != config.admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_role(env: &Env, caller: &Address, role: &Role) -> Result<(), ContractError> {
        access::require_role(env, caller, role).map_err(|_| ContractError::Unauthorized)
    }

    /// Take the exclusive-execution guard for the rest of the call.
    fn enter(env: &Env) -> Result<ExclusiveGuard<'_>, ContractError> {
        ExclusiveGuard::acquire(env).map_err(|_| ContractError::Reentrant)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
