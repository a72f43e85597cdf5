//! # Asset Gateway
//!
//! The external transfer mechanism, abstracted behind one trait so the
//! engine can be exercised against mocks and so a deployment can plug in
//! whatever actually moves value (a chain RPC, a bank rail, a test
//! harness).
//!
//! Semantics mirror the underlying primitives: native `send`, token
//! `transferFrom` (pull into custody) and `transfer` (push out), and a
//! custody balance query used before/after pulls to detect
//! fee-deducting tokens. Transfer methods report success as a plain
//! `bool` -- a `false` is surfaced by the engine as the corresponding
//! transfer-failed error, never retried.

use thiserror::Error;

use crate::asset::{AccountId, TokenAddress};

/// The token metadata probe failed (no `decimals()` entry point,
/// reverted call, garbage response -- any failure mode at all).
#[derive(Debug, Error)]
#[error("token metadata probe failed: {0}")]
pub struct ProbeError(pub String);

/// External transfer mechanism and metadata probe.
pub trait AssetGateway: Send + Sync {
    /// Sends native currency out of custody. Returns `false` on failure.
    fn send_native(&self, recipient: &AccountId, amount: u128) -> bool;

    /// Pulls tokens from `owner` into custody (`transferFrom`).
    /// Returns `false` on failure. A `true` does NOT guarantee the full
    /// amount arrived -- fee-deducting tokens transfer less; callers
    /// compare [`vault_token_balance`](Self::vault_token_balance)
    /// before and after.
    fn pull_token(&self, token: TokenAddress, owner: &AccountId, amount: u128) -> bool;

    /// Pushes tokens out of custody (`transfer`). Returns `false` on
    /// failure.
    fn push_token(&self, token: TokenAddress, recipient: &AccountId, amount: u128) -> bool;

    /// The vault's current custody balance of `token`.
    fn vault_token_balance(&self, token: TokenAddress) -> u128;

    /// Queries the token's `decimals()` metadata. Called once, at
    /// registration time.
    fn token_decimals(&self, token: TokenAddress) -> Result<u32, ProbeError>;
}
