//! # Role-based authorization gate
//!
//! Each address holds at most one [`Role`]. Roles are ranked, and a higher
//! role satisfies any check for a lower one, so an `Admin` can always act as
//! a `RateSetter`.
//!
//! These helpers never call `require_auth()` themselves: callers must
//! authenticate the address first and then consult the registry.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::CommonError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Role enum ────────────────────────────────────────────────────────────────

/// Privileges a ledger contract can hand out.
///
/// - `RateSetter` – may change the reward emission rate.
/// - `Admin`      – may do everything a `RateSetter` can, plus grant and
///                  revoke roles and hand the admin seat over.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    RateSetter = 1,
    Admin = 2,
}

impl Role {
    pub fn rank(&self) -> u32 {
        match self {
            Role::RateSetter => 1,
            Role::Admin => 2,
        }
    }

    /// Returns true if this role is at least as privileged as `required`.
    pub fn satisfies(&self, required: &Role) -> bool {
        self.rank() >= required.rank()
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn role_key(who: &Address) -> (Symbol, Address) {
    (ROLE_PREFIX, who.clone())
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Assigns `role` to `who`, replacing whatever role it held before.
pub fn set_role(env: &Env, who: &Address, role: &Role) {
    let key = role_key(who);
    env.storage().persistent().set(&key, role);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Grants `role` unless `who` already holds an equal or higher one.
///
/// Returns `true` when the stored role changed.
pub fn grant_role(env: &Env, who: &Address, role: &Role) -> bool {
    if let Some(current) = get_role(env, who) {
        if current.satisfies(role) {
            return false;
        }
    }
    set_role(env, who, role);
    true
}

/// Removes any role held by `who`. Returns the role that was removed.
pub fn revoke_role(env: &Env, who: &Address) -> Option<Role> {
    let current = get_role(env, who)?;
    env.storage().persistent().remove(&role_key(who));
    Some(current)
}

pub fn get_role(env: &Env, who: &Address) -> Option<Role> {
    let key = role_key(who);
    let role: Option<Role> = env.storage().persistent().get(&key);
    if role.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    role
}

pub fn has_role(env: &Env, who: &Address, required: &Role) -> bool {
    match get_role(env, who) {
        Some(role) => role.satisfies(required),
        None => false,
    }
}

/// Guard: fails with [`CommonError::AccessDenied`] unless `caller` holds at
/// least `required`.
pub fn require_role(env: &Env, caller: &Address, required: &Role) -> Result<(), CommonError> {
    if has_role(env, caller, required) {
        Ok(())
    } else {
        Err(CommonError::AccessDenied)
    }
}
