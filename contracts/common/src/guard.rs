//! # Exclusive execution guard
//!
//! A scope guard that marks the current contract as "inside a mutation".
//! Acquiring it while the marker is already present fails, and dropping it
//! clears the marker on every exit path, including early `?` returns.
//!
//! ```ignore
//! let _guard = ExclusiveGuard::acquire(&env).map_err(|_| ContractError::Reentrant)?;
//! // ... mutate state, call out to token contracts
//! ```

use soroban_sdk::{log, symbol_short, Env, Symbol};

use crate::CommonError;

/// Instance-storage marker held while a guarded call is in flight.
pub const LOCK_KEY: Symbol = symbol_short!("LOCKED");

pub struct ExclusiveGuard<'a> {
    env: &'a Env,
}

impl<'a> ExclusiveGuard<'a> {
    /// Takes the lock, or fails with [`CommonError::Locked`] if another
    /// guarded call holds it.
    pub fn acquire(env: &'a Env) -> Result<Self, CommonError> {
        if is_locked(env) {
            log!(env, "exclusive guard already held, rejecting call");
            return Err(CommonError::Locked);
        }
        env.storage().instance().set(&LOCK_KEY, &true);
        Ok(Self { env })
    }
}

impl Drop for ExclusiveGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&LOCK_KEY);
    }
}

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().has(&LOCK_KEY)
}
