//! Shared building blocks for the staking ledger contracts.
//!
//! This crate provides:
//! - [`CommonError`]: error codes returned by the shared helpers.
//! - [`access`]: a ranked role registry used as the authorization gate.
//! - [`guard`]: an RAII exclusive-execution guard for mutating entry points.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access;
pub mod guard;

pub use access::Role;
pub use guard::ExclusiveGuard;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes produced by the shared helpers.
///
/// Contracts map these into their own error enums at the call site.
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    /// The caller lacks the required role.
    AccessDenied = 10,

    /// A guarded call is already in flight.
    Locked = 40,
}
