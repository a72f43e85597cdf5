//! # Vault -- the Ledger/Accounting Engine
//!
//! Owns per-user, per-asset balances and applies every deposit/withdraw
//! transition under the registry's limits and the capacity policy. This is
//! where the exact-accounting invariants live: no value created or
//! destroyed, no negative balances, no double-spend.
//!
//! ## Operation discipline
//!
//! Every operation runs the strict sequence **validate → effect →
//! interact**, never reordered. All validation happens before any state
//! mutation; all state mutation happens before any external transfer. The
//! engine's methods take `&mut self`, and [`SharedVault`] holds the lock
//! across the whole sequence, so a collaborator cannot re-enter a
//! state-mutating operation mid-flight -- re-entry would have to come
//! through the lock.
//!
//! ## Persistence
//!
//! Durable ledger state lives in [`VaultState`], a single serializable
//! blob: balances, registry, counters, oracle settings. Collaborator
//! handles (gateway, capability check, pause gate, price feeds) are
//! runtime wiring, re-injected on restore.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::access::{Capabilities, PauseGate, Role};
use crate::asset::{AccountId, AssetId, TokenAddress};
use crate::decimal::{self, DecimalError};
use crate::gateway::AssetGateway;
use crate::oracle::{
    native_value, token_value, validated_price, FeedError, OracleConfig, OracleError, PriceFeed,
};
use crate::registry::{AssetRegistry, RegistryError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from vault operations.
///
/// Every rejection is a distinct kind so callers can branch on cause --
/// retry after staleness passes, never retry on insufficient balance.
/// A rejection always leaves ledger state exactly as it was before the
/// call began.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The emergency stop is engaged. Distinct from every other kind.
    #[error("vault is paused")]
    Paused,

    /// The caller lacks the capability an administrative operation
    /// requires.
    #[error("caller {caller} lacks the {role} capability")]
    Unauthorized {
        /// The rejected caller.
        caller: AccountId,
        /// The capability that was required.
        role: Role,
    },

    /// Zero-amount operations are no-ops and indicate a caller bug.
    #[error("zero-amount operations are not permitted")]
    ZeroAmount,

    /// The deposit would push holdings past a capacity cap -- either the
    /// asset's native-unit cap or the global valuation-unit cap.
    #[error("capacity exceeded for {asset}: projected {projected} over cap {cap}")]
    CapacityExceeded {
        /// The asset whose cap would be breached.
        asset: AssetId,
        /// Holdings (or valuation) the deposit projects to.
        projected: u128,
        /// The configured cap.
        cap: u128,
    },

    /// The withdrawal amount exceeds the asset's per-operation limit,
    /// regardless of the user's balance.
    #[error("withdrawal of {amount} exceeds the per-operation limit {limit} for {asset}")]
    LimitExceeded {
        /// The asset being withdrawn.
        asset: AssetId,
        /// The requested amount.
        amount: u128,
        /// The configured per-operation limit.
        limit: u128,
    },

    /// The user's balance cannot cover the withdrawal.
    #[error("insufficient balance for {user} in {asset}: available {available}, requested {requested}")]
    InsufficientBalance {
        /// The withdrawing user.
        user: AccountId,
        /// The asset being withdrawn.
        asset: AssetId,
        /// The user's current balance.
        available: u128,
        /// The amount that was requested.
        requested: u128,
    },

    /// The native transfer-out reported failure.
    #[error("native transfer failed")]
    TransferFailed,

    /// A token transfer-in or transfer-out reported failure.
    #[error("token transfer failed for {0}")]
    TokenTransferFailed(TokenAddress),

    /// A balance credit would exceed `u128`.
    #[error("balance overflow crediting {asset}")]
    BalanceOverflow {
        /// The asset being credited.
        asset: AssetId,
    },

    /// Summing per-asset valuations overflowed.
    #[error("aggregate valuation overflow")]
    AggregateValueOverflow,

    /// A registry rule was violated (unsupported asset, sentinel
    /// address, zero limit, duplicate registration, bad precision).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A price reading was stale, invalid, or unobtainable.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// A precision conversion failed.
    #[error(transparent)]
    Decimal(#[from] DecimalError),
}

// ---------------------------------------------------------------------------
// Configuration & state
// ---------------------------------------------------------------------------

/// Construction-time configuration for a fresh vault.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Per-operation withdrawal limit for the native asset.
    pub native_withdrawal_limit: u128,
    /// Capacity cap for the native asset, in native units.
    pub native_capacity: u128,
    /// Global oracle configuration.
    pub oracle: OracleConfig,
}

/// The complete durable state of a vault.
///
/// Serializes to a single blob; restoring it with
/// [`Vault::from_state`] reproduces identical ledger semantics across a
/// process restart. This is ledger state, not cache.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultState {
    /// The asset whitelist and per-asset limits.
    registry: AssetRegistry,

    /// Per-asset, per-user balances in each asset's native precision.
    #[serde(with = "crate::asset::asset_id_map")]
    balances: HashMap<AssetId, HashMap<AccountId, u128>>,

    /// Total native currency credited to users and held in custody.
    native_holdings: u128,

    /// Global oracle settings (max age, valuation cap and toggle).
    oracle: OracleConfig,

    /// Assets for which an admin has configured a price source. The feed
    /// handles themselves are runtime wiring; this set makes "configured
    /// but not wired after restore" distinguishable from "never
    /// configured".
    feed_configured: HashSet<AssetId>,

    /// Per-asset deposit counters. Observability only.
    #[serde(with = "crate::asset::asset_id_map")]
    deposit_counts: HashMap<AssetId, u64>,

    /// Global withdrawal counter. Observability only.
    withdrawal_count: u64,
}

// ---------------------------------------------------------------------------
// Vault
// ---------------------------------------------------------------------------

/// The multi-asset custodial ledger engine.
///
/// All mutating operations take `&mut self`; wrap the vault in a
/// [`SharedVault`] for shared ownership under true concurrency.
pub struct Vault {
    state: VaultState,
    feeds: HashMap<AssetId, Arc<dyn PriceFeed>>,
    gateway: Arc<dyn AssetGateway>,
    capabilities: Arc<dyn Capabilities>,
    pause: Arc<dyn PauseGate>,
}

impl Vault {
    /// Creates a fresh vault with the native asset registered.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ZeroLimit`] / [`RegistryError::ZeroCap`] (via
    /// [`VaultError::Registry`]) when the native limits are zero;
    /// [`OracleError::InvalidMaxPriceAge`] (via [`VaultError::Oracle`])
    /// when the configured price age is unusable.
    pub fn new(
        config: VaultConfig,
        gateway: Arc<dyn AssetGateway>,
        capabilities: Arc<dyn Capabilities>,
        pause: Arc<dyn PauseGate>,
    ) -> Result<Self, VaultError> {
        config.oracle.validate()?;
        let registry =
            AssetRegistry::new(config.native_withdrawal_limit, config.native_capacity)?;
        Ok(Self {
            state: VaultState {
                registry,
                balances: HashMap::new(),
                native_holdings: 0,
                oracle: config.oracle,
                feed_configured: HashSet::new(),
                deposit_counts: HashMap::new(),
                withdrawal_count: 0,
            },
            feeds: HashMap::new(),
            gateway,
            capabilities,
            pause,
        })
    }

    /// Restores a vault from a persisted [`VaultState`].
    ///
    /// Price feeds must be re-wired via
    /// [`set_price_source`](Self::set_price_source); until then,
    /// valuation of an asset whose feed was configured before the
    /// restart fails rather than silently degrading to zero.
    pub fn from_state(
        state: VaultState,
        gateway: Arc<dyn AssetGateway>,
        capabilities: Arc<dyn Capabilities>,
        pause: Arc<dyn PauseGate>,
    ) -> Self {
        Self {
            state,
            feeds: HashMap::new(),
            gateway,
            capabilities,
            pause,
        }
    }

    /// Returns a snapshot of the durable ledger state.
    pub fn snapshot(&self) -> VaultState {
        self.state.clone()
    }

    // -----------------------------------------------------------------------
    // Deposits
    // -----------------------------------------------------------------------

    /// Credits a native-currency deposit that has already arrived in
    /// custody.
    ///
    /// Capacity policy, in order: the native-unit cap is checked against
    /// holdings *plus* the incoming amount; the valuation-unit cap (when
    /// enabled and a native feed is configured) is checked against the
    /// valuation of holdings *before* crediting. The second check is a
    /// pre-existing-balance check by contract: the deposit that first
    /// tips the valuation cap is accepted, the one after it is rejected.
    ///
    /// Returns the user's new balance.
    pub fn deposit_native(
        &mut self,
        user: &AccountId,
        amount: u128,
    ) -> Result<u128, VaultError> {
        self.ensure_live()?;
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }

        let cap = self.state.registry.expect_supported(AssetId::Native)?.capacity;
        let holdings = self.state.native_holdings;
        let projected = holdings
            .checked_add(amount)
            .ok_or(VaultError::BalanceOverflow {
                asset: AssetId::Native,
            })?;
        if projected > cap {
            return Err(VaultError::CapacityExceeded {
                asset: AssetId::Native,
                projected,
                cap,
            });
        }

        if self.state.oracle.enforce_valuation_cap {
            if let Some(feed) = self.feed_for(AssetId::Native)? {
                let price = validated_price(feed.as_ref(), self.state.oracle.max_price_age())?;
                let value = native_value(holdings, price)?;
                if value > self.state.oracle.valuation_cap {
                    return Err(VaultError::CapacityExceeded {
                        asset: AssetId::Native,
                        projected: value,
                        cap: self.state.oracle.valuation_cap,
                    });
                }
            }
        }

        let balance = self.credit(user, AssetId::Native, amount)?;
        self.state.native_holdings = projected;
        self.bump_deposit_count(AssetId::Native);

        info!(
            user = %user,
            asset = %AssetId::Native,
            amount,
            balance,
            "deposit credited"
        );
        Ok(balance)
    }

    /// Pulls a token deposit into custody and credits what actually
    /// arrived.
    ///
    /// The credited amount is the custody-balance delta around the pull,
    /// not the requested amount, so fee-deducting tokens credit exactly
    /// what they delivered. A cap breach detected after the pull refunds
    /// the received delta before rejecting.
    ///
    /// Returns the credited amount.
    pub fn deposit_token(
        &mut self,
        user: &AccountId,
        token: TokenAddress,
        amount: u128,
    ) -> Result<u128, VaultError> {
        self.ensure_live()?;
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }
        if token.is_zero() {
            return Err(RegistryError::ZeroOrSentinelAddress.into());
        }
        let asset = AssetId::Token(token);
        let cap = self.state.registry.expect_supported(asset)?.capacity;

        let before = self.gateway.vault_token_balance(token);
        if !self.gateway.pull_token(token, user, amount) {
            return Err(VaultError::TokenTransferFailed(token));
        }
        let after = self.gateway.vault_token_balance(token);
        let credited = after
            .checked_sub(before)
            .ok_or(VaultError::TokenTransferFailed(token))?;

        if after > cap {
            // The cap check runs after an irreversible pull, so the
            // refund is an explicit transfer back.
            if !self.gateway.push_token(token, user, credited) {
                warn!(
                    user = %user,
                    asset = %asset,
                    amount = credited,
                    "cap-breach refund transfer failed; funds in custody, credited to no one"
                );
            }
            return Err(VaultError::CapacityExceeded {
                asset,
                projected: after,
                cap,
            });
        }

        let balance = self.credit(user, asset, credited)?;
        self.bump_deposit_count(asset);

        info!(
            user = %user,
            asset = %asset,
            requested = amount,
            credited,
            balance,
            "deposit credited"
        );
        Ok(credited)
    }

    // -----------------------------------------------------------------------
    // Withdrawals
    // -----------------------------------------------------------------------

    /// Withdraws native currency or tokens to the user.
    ///
    /// Validation order: pause, zero amount, per-operation limit,
    /// balance. The debit lands before the external transfer (effects
    /// before interactions); a failed transfer restores the debit and
    /// surfaces the transfer error, leaving state as before the call.
    ///
    /// Returns the user's remaining balance.
    pub fn withdraw(
        &mut self,
        user: &AccountId,
        asset: AssetId,
        amount: u128,
    ) -> Result<u128, VaultError> {
        self.ensure_live()?;
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }
        let limit = self.state.registry.expect_supported(asset)?.withdrawal_limit;
        if amount > limit {
            return Err(VaultError::LimitExceeded {
                asset,
                amount,
                limit,
            });
        }

        let remaining = self.debit(user, asset, amount)?;
        if asset.is_native() {
            self.state.native_holdings -= amount;
        }

        let sent = match asset {
            AssetId::Native => self.gateway.send_native(user, amount),
            AssetId::Token(addr) => self.gateway.push_token(addr, user, amount),
        };
        if !sent {
            // Restore the debit: the whole operation is all-or-nothing.
            self.restore_debit(user, asset, amount);
            return Err(match asset {
                AssetId::Native => VaultError::TransferFailed,
                AssetId::Token(addr) => VaultError::TokenTransferFailed(addr),
            });
        }

        self.state.withdrawal_count += 1;
        info!(
            user = %user,
            asset = %asset,
            amount,
            remaining,
            "withdrawal completed"
        );
        Ok(remaining)
    }

    // -----------------------------------------------------------------------
    // Administrative operations
    // -----------------------------------------------------------------------

    /// Whitelists a token asset.
    ///
    /// The token's precision is auto-detected through the metadata probe;
    /// *any* probe failure falls back to 18 decimals.
    pub fn add_asset(
        &mut self,
        caller: &AccountId,
        address: TokenAddress,
        withdrawal_limit: u128,
        capacity: u128,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;

        let decimals = match self.gateway.token_decimals(address) {
            Ok(d) => d,
            Err(probe_err) => {
                warn!(asset = %address, error = %probe_err, "metadata probe failed, defaulting to 18 decimals");
                18
            }
        };

        self.state
            .registry
            .add_asset(address, withdrawal_limit, capacity, decimals)?;
        Ok(())
    }

    /// Removes a token from the whitelist. Balances are untouched and
    /// become unreachable until the asset is re-added.
    pub fn remove_asset(
        &mut self,
        caller: &AccountId,
        address: TokenAddress,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        self.state.registry.remove_asset(address)?;
        Ok(())
    }

    /// Updates an asset's per-operation withdrawal limit.
    pub fn update_withdrawal_limit(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        limit: u128,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        self.state.registry.update_withdrawal_limit(asset, limit)?;
        Ok(())
    }

    /// Updates an asset's capacity cap.
    pub fn update_capacity(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        capacity: u128,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        self.state.registry.update_capacity(asset, capacity)?;
        Ok(())
    }

    /// Overrides an asset's decimal precision.
    pub fn set_decimals_override(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        decimals: u32,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        self.state.registry.set_decimals_override(asset, decimals)?;
        Ok(())
    }

    /// Configures the price source for an asset (the native asset
    /// included).
    pub fn set_price_source(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        feed: Arc<dyn PriceFeed>,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        self.state.registry.expect_supported(asset)?;
        self.feeds.insert(asset, feed);
        self.state.feed_configured.insert(asset);
        info!(asset = %asset, "price source configured");
        Ok(())
    }

    /// Sets the maximum acceptable price age.
    ///
    /// # Errors
    ///
    /// [`OracleError::InvalidMaxPriceAge`] (via [`VaultError::Oracle`])
    /// for a non-positive or unrepresentable age; the previous setting
    /// stays in effect.
    pub fn set_max_price_age(
        &mut self,
        caller: &AccountId,
        max_age_secs: i64,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        let mut oracle = self.state.oracle.clone();
        oracle.max_price_age_secs = max_age_secs;
        oracle.validate()?;
        self.state.oracle = oracle;
        info!(max_age_secs, "max price age updated");
        Ok(())
    }

    /// Sets the global capacity cap in the common valuation unit.
    pub fn set_valuation_cap(
        &mut self,
        caller: &AccountId,
        cap: u128,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        self.state.oracle.valuation_cap = cap;
        info!(cap, "valuation cap updated");
        Ok(())
    }

    /// Toggles valuation-unit capacity enforcement for the native asset.
    pub fn set_valuation_cap_enforced(
        &mut self,
        caller: &AccountId,
        enforced: bool,
    ) -> Result<(), VaultError> {
        self.require_admin(caller)?;
        self.state.oracle.enforce_valuation_cap = enforced;
        info!(enforced, "valuation cap enforcement toggled");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The user's balance in an asset. Zero for never-touched pairs.
    pub fn balance_of(&self, user: &AccountId, asset: AssetId) -> u128 {
        self.state
            .balances
            .get(&asset)
            .and_then(|m| m.get(user))
            .copied()
            .unwrap_or(0)
    }

    /// Total native currency in custody, as tracked by the ledger.
    pub fn native_holdings(&self) -> u128 {
        self.state.native_holdings
    }

    /// Custody holdings of an asset: ledger-tracked for native,
    /// gateway-reported for tokens.
    pub fn vault_holdings(&self, asset: AssetId) -> u128 {
        match asset {
            AssetId::Native => self.state.native_holdings,
            AssetId::Token(addr) => self.gateway.vault_token_balance(addr),
        }
    }

    /// Custody holdings of an asset converted to the reference
    /// precision (truncating).
    pub fn normalized_holdings(&self, asset: AssetId) -> Result<u128, VaultError> {
        let decimals = self.state.registry.expect_supported(asset)?.decimals;
        Ok(decimal::normalize(decimals, self.vault_holdings(asset))?)
    }

    /// Values an amount of an asset in the common valuation unit.
    ///
    /// Returns zero when no price source was ever configured for the
    /// asset -- the only graceful degradation. A configured feed that is
    /// stale, invalid, or unreachable is a hard error.
    pub fn value_of(&self, asset: AssetId, amount: u128) -> Result<u128, VaultError> {
        let Some(feed) = self.feed_for(asset)? else {
            return Ok(0);
        };
        let price = validated_price(feed.as_ref(), self.state.oracle.max_price_age())?;
        let value = match asset {
            AssetId::Native => native_value(amount, price)?,
            AssetId::Token(_) => {
                let decimals = self.state.registry.expect_supported(asset)?.decimals;
                token_value(amount, price, decimals)?
            }
        };
        Ok(value)
    }

    /// Total custody valuation across the native asset and every
    /// supported token, in the common valuation unit.
    pub fn total_value(&self) -> Result<u128, VaultError> {
        let mut total = self.value_of(AssetId::Native, self.state.native_holdings)?;
        let tokens: Vec<TokenAddress> = self.state.registry.supported_tokens().to_vec();
        for token in tokens {
            let holdings = self.gateway.vault_token_balance(token);
            let value = self.value_of(AssetId::Token(token), holdings)?;
            total = total
                .checked_add(value)
                .ok_or(VaultError::AggregateValueOverflow)?;
        }
        Ok(total)
    }

    /// Number of deposits credited for an asset.
    pub fn deposit_count(&self, asset: AssetId) -> u64 {
        self.state.deposit_counts.get(&asset).copied().unwrap_or(0)
    }

    /// Number of completed withdrawals across all assets.
    pub fn withdrawal_count(&self) -> u64 {
        self.state.withdrawal_count
    }

    /// Read access to the asset registry.
    pub fn registry(&self) -> &AssetRegistry {
        &self.state.registry
    }

    /// The current global oracle configuration.
    pub fn oracle_config(&self) -> &OracleConfig {
        &self.state.oracle
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn ensure_live(&self) -> Result<(), VaultError> {
        if self.pause.is_paused() {
            return Err(VaultError::Paused);
        }
        Ok(())
    }

    fn require_admin(&self, caller: &AccountId) -> Result<(), VaultError> {
        if !self.capabilities.has_capability(caller, Role::Admin) {
            return Err(VaultError::Unauthorized {
                caller: caller.clone(),
                role: Role::Admin,
            });
        }
        Ok(())
    }

    /// The feed for an asset: `Ok(None)` when never configured,
    /// an error when configured but not wired (post-restore).
    fn feed_for(&self, asset: AssetId) -> Result<Option<&Arc<dyn PriceFeed>>, VaultError> {
        match self.feeds.get(&asset) {
            Some(feed) => Ok(Some(feed)),
            None if self.state.feed_configured.contains(&asset) => Err(OracleError::Feed(
                FeedError("price source configured but not wired".into()),
            )
            .into()),
            None => Ok(None),
        }
    }

    fn credit(
        &mut self,
        user: &AccountId,
        asset: AssetId,
        amount: u128,
    ) -> Result<u128, VaultError> {
        let balance = self
            .state
            .balances
            .entry(asset)
            .or_default()
            .entry(user.clone())
            .or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(VaultError::BalanceOverflow { asset })?;
        Ok(*balance)
    }

    fn debit(
        &mut self,
        user: &AccountId,
        asset: AssetId,
        amount: u128,
    ) -> Result<u128, VaultError> {
        let available = self.balance_of(user, asset);
        if available < amount {
            return Err(VaultError::InsufficientBalance {
                user: user.clone(),
                asset,
                available,
                requested: amount,
            });
        }
        // Entry exists: available >= amount > 0.
        if let Some(balance) = self
            .state
            .balances
            .get_mut(&asset)
            .and_then(|m| m.get_mut(user))
        {
            *balance -= amount;
            Ok(*balance)
        } else {
            Err(VaultError::InsufficientBalance {
                user: user.clone(),
                asset,
                available: 0,
                requested: amount,
            })
        }
    }

    /// Undoes a debit after a failed transfer-out. Infallible by
    /// construction: the amount was just subtracted from this balance.
    fn restore_debit(&mut self, user: &AccountId, asset: AssetId, amount: u128) {
        if let Some(balance) = self
            .state
            .balances
            .get_mut(&asset)
            .and_then(|m| m.get_mut(user))
        {
            *balance += amount;
        }
        if asset.is_native() {
            self.state.native_holdings += amount;
        }
    }

    fn bump_deposit_count(&mut self, asset: AssetId) {
        *self.state.deposit_counts.entry(asset).or_insert(0) += 1;
    }
}

// ---------------------------------------------------------------------------
// SharedVault
// ---------------------------------------------------------------------------

/// A cloneable, thread-safe handle around a [`Vault`].
///
/// The mutex is held for the entirety of each operation, so operations
/// execute strictly one at a time even under true concurrency.
#[derive(Clone)]
pub struct SharedVault {
    inner: Arc<Mutex<Vault>>,
}

impl SharedVault {
    /// Wraps a vault for shared ownership.
    pub fn new(vault: Vault) -> Self {
        Self {
            inner: Arc::new(Mutex::new(vault)),
        }
    }

    /// See [`Vault::deposit_native`].
    pub fn deposit_native(&self, user: &AccountId, amount: u128) -> Result<u128, VaultError> {
        self.inner.lock().deposit_native(user, amount)
    }

    /// See [`Vault::deposit_token`].
    pub fn deposit_token(
        &self,
        user: &AccountId,
        token: TokenAddress,
        amount: u128,
    ) -> Result<u128, VaultError> {
        self.inner.lock().deposit_token(user, token, amount)
    }

    /// See [`Vault::withdraw`].
    pub fn withdraw(
        &self,
        user: &AccountId,
        asset: AssetId,
        amount: u128,
    ) -> Result<u128, VaultError> {
        self.inner.lock().withdraw(user, asset, amount)
    }

    /// Locks the vault for administrative operations or queries. The
    /// guard holds the engine lock until dropped.
    pub fn lock(&self) -> MutexGuard<'_, Vault> {
        self.inner.lock()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
