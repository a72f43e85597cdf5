// Copyright (c) 2026 Custodia contributors. MIT License.
// See LICENSE for details.

//! # Custodia Ledger -- Multi-Asset Custodial Accounting
//!
//! A unified custodial ledger: per-user, per-asset balances for a native
//! currency plus an arbitrary set of whitelisted fungible tokens, with
//! per-asset withdrawal and capacity limits that can optionally be
//! expressed in a normalized unit of account derived from external price
//! feeds.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! custody engine, leaves first:
//!
//! - **asset** -- Identity types: accounts, token addresses, and the
//!   native/token distinction.
//! - **decimal** -- Normalization between heterogeneous asset precisions
//!   and the fixed reference precision.
//! - **oracle** -- Price feed validation (staleness, sanity, round
//!   sequencing) and valuation in the common unit.
//! - **registry** -- The asset whitelist: precision, limits, enumeration.
//! - **gateway** -- The external transfer mechanism seam.
//! - **access** -- Capability checks and the emergency-stop gate.
//! - **vault** -- The accounting engine tying it all together.
//!
//! ## Design Principles
//!
//! 1. **All amounts are `u128` in smallest-unit denomination.** No
//!    floating point, anywhere. Precision conversion is explicit and
//!    truncation is contractual.
//! 2. **Validate, effect, interact -- in that order, always.** State is
//!    fully settled before any external transfer runs, and the engine
//!    lock spans the whole sequence.
//! 3. **Every rejection is a distinct error kind** so callers can branch
//!    on cause, and every rejection leaves the books untouched.
//! 4. **Serializable state.** The entire durable ledger is one
//!    `VaultState` blob; collaborators are runtime wiring.

pub mod access;
pub mod asset;
pub mod decimal;
pub mod gateway;
pub mod oracle;
pub mod registry;
pub mod vault;

pub use access::{Capabilities, PauseGate, Role};
pub use asset::{AccountId, AssetId, TokenAddress};
pub use gateway::{AssetGateway, ProbeError};
pub use oracle::{FeedError, OracleConfig, OracleError, PriceFeed, RoundData};
pub use registry::{AssetDescriptor, AssetRegistry, RegistryError};
pub use vault::{SharedVault, Vault, VaultConfig, VaultError, VaultState};
