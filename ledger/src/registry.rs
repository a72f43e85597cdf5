//! # Asset Registry
//!
//! Tracks which assets the vault accepts, their precision, and their
//! limits. Registration is a whitelist: deposits and withdrawals consult
//! the registry on every call.
//!
//! Removal is a soft delete. Unsupporting an asset flips its `supported`
//! flag and drops it from the enumeration index but leaves the descriptor
//! and -- critically -- all user balances in place. Funds held in a removed
//! asset are unreachable through normal withdrawal paths until the asset
//! is re-added. That lockup is a documented limitation, not a bug.
//!
//! The enumeration index removes by swap-with-last-and-pop, so ordering
//! is NOT stable across removals. Callers must not rely on it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::asset::{AssetId, TokenAddress};
use crate::decimal::MAX_DECIMALS;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from registry mutations and lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The all-zero token address is reserved for the native asset.
    #[error("zero or sentinel address is not a valid token")]
    ZeroOrSentinelAddress,

    /// The asset is already on the whitelist.
    #[error("asset {0} is already supported")]
    AssetAlreadySupported(TokenAddress),

    /// The asset is not on the whitelist (never added, or removed).
    #[error("asset {0} is not supported")]
    AssetNotSupported(AssetId),

    /// A per-operation withdrawal limit of zero is meaningless.
    #[error("withdrawal limit must be nonzero")]
    ZeroLimit,

    /// A capacity cap of zero is meaningless.
    #[error("capacity cap must be nonzero")]
    ZeroCap,

    /// The precision value is zero or above the supported maximum.
    #[error("invalid precision {decimals}: must be in 1..={max}", max = MAX_DECIMALS)]
    InvalidPrecision {
        /// The rejected precision value.
        decimals: u32,
    },
}

// ---------------------------------------------------------------------------
// AssetDescriptor
// ---------------------------------------------------------------------------

/// Canonical per-asset configuration record.
///
/// Precision and limits are only meaningful while `supported` is true;
/// a removed asset keeps its last-known values so that re-adding it
/// restores a coherent descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Whether the asset is currently accepted for deposit/withdrawal.
    pub supported: bool,
    /// Native decimal precision (1 through 77). Zero means "never configured".
    pub decimals: u32,
    /// Maximum amount a single withdrawal may move, in native precision.
    pub withdrawal_limit: u128,
    /// Maximum total vault holdings of this asset, in native precision.
    pub capacity: u128,
}

// ---------------------------------------------------------------------------
// AssetRegistry
// ---------------------------------------------------------------------------

/// The whitelist of tracked assets and their descriptors.
///
/// The native asset is registered at construction and is always
/// supported; tokens come and go through [`add_asset`](Self::add_asset)
/// and [`remove_asset`](Self::remove_asset).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetRegistry {
    /// Descriptors for every asset ever registered (soft-deleted entries
    /// included).
    #[serde(with = "crate::asset::asset_id_map")]
    assets: HashMap<AssetId, AssetDescriptor>,

    /// Currently-supported token addresses in insertion order, except
    /// where swap-and-pop removal has shuffled them.
    index: Vec<TokenAddress>,
}

/// Decimal precision of the native asset.
pub const NATIVE_DECIMALS: u32 = 18;

impl AssetRegistry {
    /// Creates a registry with the native asset pre-registered.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ZeroLimit`] / [`RegistryError::ZeroCap`] when the
    /// native limits are zero.
    pub fn new(
        native_withdrawal_limit: u128,
        native_capacity: u128,
    ) -> Result<Self, RegistryError> {
        if native_withdrawal_limit == 0 {
            return Err(RegistryError::ZeroLimit);
        }
        if native_capacity == 0 {
            return Err(RegistryError::ZeroCap);
        }

        let mut assets = HashMap::new();
        assets.insert(
            AssetId::Native,
            AssetDescriptor {
                supported: true,
                decimals: NATIVE_DECIMALS,
                withdrawal_limit: native_withdrawal_limit,
                capacity: native_capacity,
            },
        );

        Ok(Self {
            assets,
            index: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Returns the descriptor for an asset, supported or not.
    pub fn descriptor(&self, asset: AssetId) -> Option<&AssetDescriptor> {
        self.assets.get(&asset)
    }

    /// Returns `true` if the asset is currently supported.
    pub fn is_supported(&self, asset: AssetId) -> bool {
        self.assets.get(&asset).map(|d| d.supported).unwrap_or(false)
    }

    /// Returns the descriptor of a supported asset, or
    /// [`RegistryError::AssetNotSupported`].
    pub fn expect_supported(&self, asset: AssetId) -> Result<&AssetDescriptor, RegistryError> {
        match self.assets.get(&asset) {
            Some(descriptor) if descriptor.supported => Ok(descriptor),
            _ => Err(RegistryError::AssetNotSupported(asset)),
        }
    }

    /// Currently-supported token addresses, in index order.
    pub fn supported_tokens(&self) -> &[TokenAddress] {
        &self.index
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Whitelists a token.
    ///
    /// `decimals` is the resolved precision -- the caller runs the metadata
    /// probe (with its 18-decimal fallback) before calling in here.
    /// Re-adding a previously removed token restores access to any
    /// balances left behind by the removal.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ZeroOrSentinelAddress`] for the zero address,
    /// [`RegistryError::AssetAlreadySupported`] for a live duplicate,
    /// [`RegistryError::ZeroLimit`] / [`RegistryError::ZeroCap`] for zero
    /// limits.
    pub fn add_asset(
        &mut self,
        address: TokenAddress,
        withdrawal_limit: u128,
        capacity: u128,
        decimals: u32,
    ) -> Result<(), RegistryError> {
        if address.is_zero() {
            return Err(RegistryError::ZeroOrSentinelAddress);
        }
        if self.is_supported(AssetId::Token(address)) {
            return Err(RegistryError::AssetAlreadySupported(address));
        }
        if withdrawal_limit == 0 {
            return Err(RegistryError::ZeroLimit);
        }
        if capacity == 0 {
            return Err(RegistryError::ZeroCap);
        }

        self.assets.insert(
            AssetId::Token(address),
            AssetDescriptor {
                supported: true,
                decimals,
                withdrawal_limit,
                capacity,
            },
        );
        self.index.push(address);

        info!(asset = %address, decimals, withdrawal_limit, capacity, "asset added");
        Ok(())
    }

    /// Removes a token from the whitelist (soft delete).
    ///
    /// Balances are untouched; the index entry is removed by
    /// swap-and-pop.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ZeroOrSentinelAddress`] for the zero address,
    /// [`RegistryError::AssetNotSupported`] when not currently supported.
    pub fn remove_asset(&mut self, address: TokenAddress) -> Result<(), RegistryError> {
        if address.is_zero() {
            return Err(RegistryError::ZeroOrSentinelAddress);
        }
        let descriptor = self
            .assets
            .get_mut(&AssetId::Token(address))
            .filter(|d| d.supported)
            .ok_or(RegistryError::AssetNotSupported(AssetId::Token(address)))?;
        descriptor.supported = false;

        if let Some(pos) = self.index.iter().position(|a| *a == address) {
            self.index.swap_remove(pos);
        }

        info!(asset = %address, "asset removed");
        Ok(())
    }

    /// Updates a supported asset's per-operation withdrawal limit.
    pub fn update_withdrawal_limit(
        &mut self,
        asset: AssetId,
        limit: u128,
    ) -> Result<(), RegistryError> {
        if limit == 0 {
            return Err(RegistryError::ZeroLimit);
        }
        let descriptor = self.expect_supported_mut(asset)?;
        descriptor.withdrawal_limit = limit;
        info!(asset = %asset, limit, "withdrawal limit updated");
        Ok(())
    }

    /// Updates a supported asset's capacity cap.
    pub fn update_capacity(&mut self, asset: AssetId, capacity: u128) -> Result<(), RegistryError> {
        if capacity == 0 {
            return Err(RegistryError::ZeroCap);
        }
        let descriptor = self.expect_supported_mut(asset)?;
        descriptor.capacity = capacity;
        info!(asset = %asset, capacity, "capacity updated");
        Ok(())
    }

    /// Overrides a supported asset's decimal precision.
    ///
    /// Used when the registration-time metadata probe got it wrong.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidPrecision`] for zero or above
    /// [`MAX_DECIMALS`].
    pub fn set_decimals_override(
        &mut self,
        asset: AssetId,
        decimals: u32,
    ) -> Result<(), RegistryError> {
        if decimals == 0 || decimals > MAX_DECIMALS {
            return Err(RegistryError::InvalidPrecision { decimals });
        }
        let descriptor = self.expect_supported_mut(asset)?;
        descriptor.decimals = decimals;
        info!(asset = %asset, decimals, "precision override set");
        Ok(())
    }

    fn expect_supported_mut(
        &mut self,
        asset: AssetId,
    ) -> Result<&mut AssetDescriptor, RegistryError> {
        self.assets
            .get_mut(&asset)
            .filter(|d| d.supported)
            .ok_or(RegistryError::AssetNotSupported(asset))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> TokenAddress {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        TokenAddress::from_bytes(bytes)
    }

    fn registry() -> AssetRegistry {
        AssetRegistry::new(10_000, 1_000_000).unwrap()
    }

    #[test]
    fn native_asset_registered_at_construction() {
        let reg = registry();
        let native = reg.descriptor(AssetId::Native).unwrap();
        assert!(native.supported);
        assert_eq!(native.decimals, NATIVE_DECIMALS);
        assert_eq!(native.withdrawal_limit, 10_000);
        assert_eq!(native.capacity, 1_000_000);
    }

    #[test]
    fn construction_rejects_zero_limits() {
        assert!(matches!(
            AssetRegistry::new(0, 100),
            Err(RegistryError::ZeroLimit)
        ));
        assert!(matches!(
            AssetRegistry::new(100, 0),
            Err(RegistryError::ZeroCap)
        ));
    }

    #[test]
    fn add_asset_whitelists_token() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();

        assert!(reg.is_supported(AssetId::Token(addr(1))));
        assert_eq!(reg.supported_tokens(), &[addr(1)]);
        let d = reg.descriptor(AssetId::Token(addr(1))).unwrap();
        assert_eq!(d.decimals, 6);
        assert_eq!(d.withdrawal_limit, 500);
        assert_eq!(d.capacity, 10_000);
    }

    #[test]
    fn add_asset_rejects_sentinel() {
        let mut reg = registry();
        assert!(matches!(
            reg.add_asset(TokenAddress::ZERO, 500, 10_000, 6),
            Err(RegistryError::ZeroOrSentinelAddress)
        ));
    }

    #[test]
    fn add_asset_rejects_duplicate() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();
        assert!(matches!(
            reg.add_asset(addr(1), 999, 99_999, 8),
            Err(RegistryError::AssetAlreadySupported(_))
        ));
        // First registration intact.
        let d = reg.descriptor(AssetId::Token(addr(1))).unwrap();
        assert_eq!(d.withdrawal_limit, 500);
    }

    #[test]
    fn add_asset_rejects_zero_limits() {
        let mut reg = registry();
        assert!(matches!(
            reg.add_asset(addr(1), 0, 10_000, 6),
            Err(RegistryError::ZeroLimit)
        ));
        assert!(matches!(
            reg.add_asset(addr(1), 500, 0, 6),
            Err(RegistryError::ZeroCap)
        ));
    }

    #[test]
    fn remove_asset_is_soft_delete() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();
        reg.remove_asset(addr(1)).unwrap();

        assert!(!reg.is_supported(AssetId::Token(addr(1))));
        assert!(reg.supported_tokens().is_empty());
        // Descriptor survives with its last-known values.
        let d = reg.descriptor(AssetId::Token(addr(1))).unwrap();
        assert!(!d.supported);
        assert_eq!(d.decimals, 6);
    }

    #[test]
    fn remove_asset_rejects_unknown_and_sentinel() {
        let mut reg = registry();
        assert!(matches!(
            reg.remove_asset(addr(9)),
            Err(RegistryError::AssetNotSupported(_))
        ));
        assert!(matches!(
            reg.remove_asset(TokenAddress::ZERO),
            Err(RegistryError::ZeroOrSentinelAddress)
        ));
    }

    #[test]
    fn remove_swaps_with_last() {
        let mut reg = registry();
        reg.add_asset(addr(1), 1, 1_000, 6).unwrap();
        reg.add_asset(addr(2), 1, 1_000, 6).unwrap();
        reg.add_asset(addr(3), 1, 1_000, 6).unwrap();

        reg.remove_asset(addr(1)).unwrap();
        // Swap-and-pop: last element moved into the hole.
        assert_eq!(reg.supported_tokens(), &[addr(3), addr(2)]);
    }

    #[test]
    fn readd_after_removal() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();
        reg.remove_asset(addr(1)).unwrap();
        reg.add_asset(addr(1), 700, 20_000, 8).unwrap();

        assert!(reg.is_supported(AssetId::Token(addr(1))));
        let d = reg.descriptor(AssetId::Token(addr(1))).unwrap();
        assert_eq!(d.withdrawal_limit, 700);
        assert_eq!(d.decimals, 8);
    }

    #[test]
    fn update_limits() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();

        reg.update_withdrawal_limit(AssetId::Token(addr(1)), 750).unwrap();
        reg.update_capacity(AssetId::Token(addr(1)), 20_000).unwrap();

        let d = reg.descriptor(AssetId::Token(addr(1))).unwrap();
        assert_eq!(d.withdrawal_limit, 750);
        assert_eq!(d.capacity, 20_000);
    }

    #[test]
    fn update_limits_reject_zero_and_unsupported() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();

        assert!(matches!(
            reg.update_withdrawal_limit(AssetId::Token(addr(1)), 0),
            Err(RegistryError::ZeroLimit)
        ));
        assert!(matches!(
            reg.update_capacity(AssetId::Token(addr(2)), 100),
            Err(RegistryError::AssetNotSupported(_))
        ));
    }

    #[test]
    fn native_limits_are_updatable() {
        let mut reg = registry();
        reg.update_withdrawal_limit(AssetId::Native, 99).unwrap();
        reg.update_capacity(AssetId::Native, 999).unwrap();

        let d = reg.descriptor(AssetId::Native).unwrap();
        assert_eq!(d.withdrawal_limit, 99);
        assert_eq!(d.capacity, 999);
    }

    #[test]
    fn precision_override_bounds() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();

        assert!(matches!(
            reg.set_decimals_override(AssetId::Token(addr(1)), 0),
            Err(RegistryError::InvalidPrecision { .. })
        ));
        assert!(matches!(
            reg.set_decimals_override(AssetId::Token(addr(1)), 78),
            Err(RegistryError::InvalidPrecision { .. })
        ));

        reg.set_decimals_override(AssetId::Token(addr(1)), 77).unwrap();
        assert_eq!(reg.descriptor(AssetId::Token(addr(1))).unwrap().decimals, 77);
    }

    #[test]
    fn registry_serialization_roundtrip() {
        let mut reg = registry();
        reg.add_asset(addr(1), 500, 10_000, 6).unwrap();
        reg.add_asset(addr(2), 600, 20_000, 18).unwrap();
        reg.remove_asset(addr(1)).unwrap();

        let json = serde_json::to_string(&reg).expect("serialize");
        let recovered: AssetRegistry = serde_json::from_str(&json).expect("deserialize");

        assert!(recovered.is_supported(AssetId::Token(addr(2))));
        assert!(!recovered.is_supported(AssetId::Token(addr(1))));
        assert_eq!(recovered.supported_tokens(), &[addr(2)]);
        assert!(recovered.descriptor(AssetId::Token(addr(1))).is_some());
    }
}
