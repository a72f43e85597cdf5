//! # Asset & Account Identities
//!
//! Identity types for everything the ledger keys on: user accounts, token
//! contract addresses, and the [`AssetId`] sum type that distinguishes the
//! platform's native asset from tracked tokens at the type level.
//!
//! The all-zero address is the conventional sentinel for the native asset.
//! Here the sentinel is a proper enum variant -- every lookup path still
//! treats it as a distinct identity, never as "just another token", but
//! the compiler enforces the distinction instead of a magic constant.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Opaque identity of a vault user.
///
/// The ledger never interprets the contents -- it is a stable key supplied
/// by the embedding system (an address, a customer number, a DID).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account identity from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// TokenAddress
// ---------------------------------------------------------------------------

/// A 20-byte token contract address.
///
/// The all-zero address is reserved: it is the historical sentinel for the
/// native asset and is rejected wherever a real token is expected
/// (see [`TokenAddress::is_zero`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenAddress([u8; 20]);

impl TokenAddress {
    /// The reserved all-zero address.
    pub const ZERO: TokenAddress = TokenAddress([0u8; 20]);

    /// Creates a `TokenAddress` from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns `true` for the reserved all-zero sentinel address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Returns the hex-encoded address.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a hex-encoded address. A leading `0x` is accepted.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        if bytes.len() != 20 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAddress(0x{})", self.to_hex())
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl std::str::FromStr for TokenAddress {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Identity of a trackable asset: the platform's native asset or a token
/// contract.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// The platform's base currency.
    Native,
    /// A fungible token identified by its contract address.
    Token(TokenAddress),
}

impl AssetId {
    /// Returns `true` for the native asset.
    pub fn is_native(&self) -> bool {
        matches!(self, AssetId::Native)
    }

    /// Returns the token address, or `None` for the native asset.
    pub fn token_address(&self) -> Option<TokenAddress> {
        match self {
            AssetId::Native => None,
            AssetId::Token(addr) => Some(*addr),
        }
    }
}

impl From<TokenAddress> for AssetId {
    fn from(addr: TokenAddress) -> Self {
        AssetId::Token(addr)
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "AssetId(native)"),
            AssetId::Token(addr) => write!(f, "AssetId({})", addr),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "native"),
            AssetId::Token(addr) => write!(f, "{}", addr),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helper: serialize HashMap<AssetId, V> with string keys
// ---------------------------------------------------------------------------

/// Serde helper module for serializing/deserializing `HashMap<AssetId, V>`
/// as a JSON object with string keys.
///
/// JSON requires map keys to be strings, but `AssetId` is an enum that
/// serde would reject as a map key. The native asset serializes as the
/// literal `"native"`, tokens as their `0x`-prefixed hex address.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct MyStruct {
///     #[serde(with = "crate::asset::asset_id_map")]
///     holdings: HashMap<AssetId, u128>,
/// }
/// ```
pub mod asset_id_map {
    use super::{AssetId, TokenAddress};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    const NATIVE_KEY: &str = "native";

    pub fn serialize<V, S>(map: &HashMap<AssetId, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut ser_map = serializer.serialize_map(Some(map.len()))?;
        for (key, value) in map {
            let key_str = match key {
                AssetId::Native => NATIVE_KEY.to_string(),
                AssetId::Token(addr) => addr.to_string(),
            };
            ser_map.serialize_entry(&key_str, value)?;
        }
        ser_map.end()
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<AssetId, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let string_map: HashMap<String, V> = HashMap::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(key, value)| {
                if key == NATIVE_KEY {
                    Ok((AssetId::Native, value))
                } else {
                    TokenAddress::from_hex(&key)
                        .map(|addr| (AssetId::Token(addr), value))
                        .map_err(serde::de::Error::custom)
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
