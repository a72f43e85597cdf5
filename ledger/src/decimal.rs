//! # Decimal Normalization
//!
//! Pure conversion between an asset's native precision and the fixed
//! reference precision (6 decimals) that all cross-asset comparisons are
//! made in.
//!
//! All amounts are `u128` in smallest-unit denomination -- no floating
//! point anywhere. Converting *down* to the reference precision is a
//! truncating division: the fractional residue below one reference unit is
//! deliberately and permanently invisible to cross-asset comparisons.
//! `denormalize(normalize(x))` is therefore NOT the identity for assets
//! with more than 6 decimals. That asymmetry is part of the contract; do
//! not round, and do not carry a remainder.

use thiserror::Error;

/// The fixed precision all normalized amounts are expressed in.
pub const REFERENCE_DECIMALS: u32 = 6;

/// Upper bound on a configurable asset precision.
pub const MAX_DECIMALS: u32 = 77;

/// Errors from precision conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecimalError {
    /// The asset's descriptor reports zero decimals, the sentinel for a
    /// precision that was never configured.
    #[error("asset precision was never configured")]
    UnconfiguredPrecision,

    /// The conversion would not fit in a `u128`.
    #[error("precision conversion overflow: amount {amount} at {decimals} decimals")]
    Overflow {
        /// The asset precision being converted from/to.
        decimals: u32,
        /// The amount that failed to convert.
        amount: u128,
    },
}

/// `10^exp`, or `None` when the power exceeds `u128`.
fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// Converts `amount` from an asset's native precision to the reference
/// precision.
///
/// * `decimals == 6` -- identity.
/// * `decimals > 6` -- truncating division by `10^(decimals - 6)`. When the
///   divisor itself exceeds `u128` the quotient is zero.
/// * `decimals < 6` -- exact multiplication by `10^(6 - decimals)`.
///
/// # Errors
///
/// [`DecimalError::UnconfiguredPrecision`] when `decimals` is zero,
/// [`DecimalError::Overflow`] when the exact multiplication overflows.
pub fn normalize(decimals: u32, amount: u128) -> Result<u128, DecimalError> {
    if decimals == 0 {
        return Err(DecimalError::UnconfiguredPrecision);
    }
    if decimals == REFERENCE_DECIMALS {
        return Ok(amount);
    }
    if decimals > REFERENCE_DECIMALS {
        return Ok(match pow10(decimals - REFERENCE_DECIMALS) {
            Some(divisor) => amount / divisor,
            None => 0,
        });
    }
    let factor = pow10(REFERENCE_DECIMALS - decimals)
        .ok_or(DecimalError::Overflow { decimals, amount })?;
    amount
        .checked_mul(factor)
        .ok_or(DecimalError::Overflow { decimals, amount })
}

/// Converts `amount` from the reference precision back to an asset's
/// native precision.
///
/// The inverse direction of [`normalize`] -- except that information lost
/// to the truncating division there is not recoverable here: the restored
/// amount has zeros in every digit below one reference unit.
///
/// # Errors
///
/// [`DecimalError::UnconfiguredPrecision`] when `decimals` is zero,
/// [`DecimalError::Overflow`] when the expansion overflows.
pub fn denormalize(decimals: u32, amount: u128) -> Result<u128, DecimalError> {
    if decimals == 0 {
        return Err(DecimalError::UnconfiguredPrecision);
    }
    if decimals == REFERENCE_DECIMALS {
        return Ok(amount);
    }
    if decimals > REFERENCE_DECIMALS {
        let factor = pow10(decimals - REFERENCE_DECIMALS)
            .ok_or(DecimalError::Overflow { decimals, amount })?;
        return amount
            .checked_mul(factor)
            .ok_or(DecimalError::Overflow { decimals, amount });
    }
    // Below-reference precision: truncating division, mirroring the
    // high-precision direction of normalize().
    Ok(match pow10(REFERENCE_DECIMALS - decimals) {
        Some(divisor) => amount / divisor,
        None => 0,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
