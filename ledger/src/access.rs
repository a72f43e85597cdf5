//! # Access Control Seams
//!
//! Administrative authority and the emergency-stop switch are external
//! collaborators, not engine concerns: the engine asks, the embedding
//! system answers. Keeping both behind traits means the permission model
//! can be swapped or mocked without touching a line of accounting logic.

use std::fmt;

use crate::asset::AccountId;

/// Roles the engine consults before administrative operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// May perform every administrative operation.
    Admin,
    /// Reserved for future delegation of a subset of admin operations.
    /// Currently granted nowhere and checked nowhere.
    Operator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Operator => write!(f, "operator"),
        }
    }
}

/// Capability check consulted before every administrative operation.
pub trait Capabilities: Send + Sync {
    /// Returns `true` if `caller` holds `role`.
    fn has_capability(&self, caller: &AccountId, role: Role) -> bool;
}

/// The emergency-stop switch. Deposits and withdrawals are rejected
/// while paused, with an error distinct from every other kind.
pub trait PauseGate: Send + Sync {
    /// Returns `true` while the system is halted.
    fn is_paused(&self) -> bool;
}

/// A capability check that grants every role to every caller. Intended
/// for tests and single-operator deployments.
pub struct AllowAll;

impl Capabilities for AllowAll {
    fn has_capability(&self, _caller: &AccountId, _role: Role) -> bool {
        true
    }
}

/// A pause gate that never pauses. Intended for tests and deployments
/// that manage halting elsewhere.
pub struct NeverPaused;

impl PauseGate for NeverPaused {
    fn is_paused(&self) -> bool {
        false
    }
}
