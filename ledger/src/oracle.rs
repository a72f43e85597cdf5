//! # Price Oracle Adapter
//!
//! Wraps an external per-asset price source behind the [`PriceFeed`] trait
//! and validates every reading before it is allowed to influence an
//! accounting decision. There is no caching and no retry: each valuation
//! re-queries the feed, and a configured-but-broken feed aborts the whole
//! enclosing operation. The only graceful degradation is for assets that
//! *never* had a feed configured -- their valuation is zero.
//!
//! ## Validation order
//!
//! 1. The round's `updated_at` must be nonzero and within the configured
//!    maximum age of the current time -- otherwise **stale**.
//! 2. The answer must be strictly positive -- otherwise **invalid**.
//! 3. The round's `answered_in_round` must not lag `round_id` (an
//!    in-progress round) -- otherwise **stale**.
//!
//! ## Valuation formulas
//!
//! Two separate code paths, kept separate on purpose; unifying them would
//! change the numeric results:
//!
//! * native asset: `amount * price / 10^18` (the native feed carries an
//!   implicit 18-decimal scaling in this path);
//! * token: `amount * price / 10^token_decimals`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The external feed query itself failed (unreachable source, reverted
/// call, malformed response).
#[derive(Debug, Error)]
#[error("price feed query failed: {0}")]
pub struct FeedError(pub String);

/// Errors from price validation and valuation.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The reading is too old, was never updated, or belongs to an
    /// incomplete round.
    #[error("stale price: last update {updated_at}, round {round_id} answered in {answered_in_round}")]
    StalePrice {
        /// The round's last-update time.
        updated_at: DateTime<Utc>,
        /// The latest round identifier.
        round_id: u128,
        /// The round the answer was computed in.
        answered_in_round: u128,
    },

    /// The feed returned a non-positive answer.
    #[error("invalid price: feed answered {answer}")]
    InvalidPrice {
        /// The offending answer.
        answer: i128,
    },

    /// The configured maximum price age is unusable: non-positive, or
    /// beyond the range a duration can represent.
    #[error("invalid max price age {secs}: must be positive and representable")]
    InvalidMaxPriceAge {
        /// The rejected age, in seconds.
        secs: i64,
    },

    /// The `amount * price` product would not fit in a `u128`.
    #[error("valuation overflow: amount {amount} at price {price}")]
    ValueOverflow {
        /// The amount being valued.
        amount: u128,
        /// The validated price.
        price: u128,
    },

    /// The underlying feed query failed.
    #[error(transparent)]
    Feed(#[from] FeedError),
}

// ---------------------------------------------------------------------------
// PriceFeed
// ---------------------------------------------------------------------------

/// One round of data from an external price source.
#[derive(Clone, Copy, Debug)]
pub struct RoundData {
    /// The latest round identifier.
    pub round_id: u128,
    /// The signed price in the feed's own precision.
    pub answer: i128,
    /// When the round started. Carried for completeness; takes no part
    /// in validation.
    pub started_at: DateTime<Utc>,
    /// When the round was last updated. The Unix epoch (timestamp 0) is
    /// the feed's sentinel for "never updated".
    pub updated_at: DateTime<Utc>,
    /// The round in which the answer was computed. Lagging `round_id`
    /// means the current round is still in progress.
    pub answered_in_round: u128,
}

/// An external price source for one asset.
///
/// Implementations wrap whatever the deployment actually talks to -- an
/// on-chain aggregator, an exchange API, a test fixture. The adapter does
/// all validation; implementations just report what the source said.
pub trait PriceFeed: Send + Sync {
    /// Returns the latest round from the source.
    fn latest_round_data(&self) -> Result<RoundData, FeedError>;
}

// ---------------------------------------------------------------------------
// OracleConfig
// ---------------------------------------------------------------------------

/// Global oracle configuration, mutated only by admin operations.
///
/// This is the durable half of the oracle wiring: feed handles themselves
/// are runtime references re-injected after a restart.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Maximum acceptable price age, in seconds.
    pub max_price_age_secs: i64,
    /// Whether the native asset's capacity is additionally enforced in the
    /// common valuation unit.
    pub enforce_valuation_cap: bool,
    /// The global capacity cap in the common valuation unit. Only
    /// consulted when `enforce_valuation_cap` is set.
    pub valuation_cap: u128,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            max_price_age_secs: 3600,
            enforce_valuation_cap: false,
            valuation_cap: 0,
        }
    }
}

impl OracleConfig {
    /// The maximum price age as a `chrono` duration.
    ///
    /// A value the duration type cannot represent clamps to zero, which
    /// marks every reading stale; [`validate`](Self::validate) rejects
    /// such configurations before they are accepted.
    pub fn max_price_age(&self) -> Duration {
        Duration::try_seconds(self.max_price_age_secs).unwrap_or_else(Duration::zero)
    }

    /// Checks that the configured maximum price age is usable.
    ///
    /// # Errors
    ///
    /// [`OracleError::InvalidMaxPriceAge`] when the age is non-positive
    /// or outside the representable duration range.
    pub fn validate(&self) -> Result<(), OracleError> {
        if self.max_price_age_secs <= 0
            || Duration::try_seconds(self.max_price_age_secs).is_none()
        {
            return Err(OracleError::InvalidMaxPriceAge {
                secs: self.max_price_age_secs,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation & valuation
// ---------------------------------------------------------------------------

/// Implicit decimal scaling of the native asset's price feed.
const NATIVE_PRICE_SCALE: u128 = 1_000_000_000_000_000_000; // 10^18

/// Queries a feed and returns its price after full validation.
///
/// # Errors
///
/// [`OracleError::StalePrice`] for an aged, never-updated, or
/// incomplete-round reading; [`OracleError::InvalidPrice`] for a
/// non-positive answer; [`OracleError::Feed`] when the query itself fails.
pub fn validated_price(feed: &dyn PriceFeed, max_age: Duration) -> Result<u128, OracleError> {
    let round = feed.latest_round_data()?;
    let now = Utc::now();

    let never_updated = round.updated_at.timestamp() == 0;
    if never_updated || now.signed_duration_since(round.updated_at) > max_age {
        return Err(OracleError::StalePrice {
            updated_at: round.updated_at,
            round_id: round.round_id,
            answered_in_round: round.answered_in_round,
        });
    }

    if round.answer <= 0 {
        return Err(OracleError::InvalidPrice {
            answer: round.answer,
        });
    }

    if round.answered_in_round < round.round_id {
        return Err(OracleError::StalePrice {
            updated_at: round.updated_at,
            round_id: round.round_id,
            answered_in_round: round.answered_in_round,
        });
    }

    Ok(round.answer as u128)
}

/// Values a native-asset amount in the common valuation unit.
///
/// The native feed's price carries an implicit 18-decimal scaling, so the
/// divisor here is fixed regardless of any descriptor precision.
pub fn native_value(amount: u128, price: u128) -> Result<u128, OracleError> {
    let product = amount
        .checked_mul(price)
        .ok_or(OracleError::ValueOverflow { amount, price })?;
    Ok(product / NATIVE_PRICE_SCALE)
}

/// Values a token amount in the common valuation unit.
///
/// Divides by `10^token_decimals`. NOT the same formula as
/// [`native_value`] -- the two paths are kept separate deliberately.
pub fn token_value(amount: u128, price: u128, token_decimals: u32) -> Result<u128, OracleError> {
    let product = amount
        .checked_mul(price)
        .ok_or(OracleError::ValueOverflow { amount, price })?;
    Ok(match 10u128.checked_pow(token_decimals) {
        Some(divisor) => product / divisor,
        // Divisor beyond u128 means the true value is below one unit.
        None => 0,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed fixture returning a canned round.
    struct FixedFeed(RoundData);

    impl PriceFeed for FixedFeed {
        fn latest_round_data(&self) -> Result<RoundData, FeedError> {
            Ok(self.0)
        }
    }

    /// Feed fixture whose query always fails.
    struct BrokenFeed;

    impl PriceFeed for BrokenFeed {
        fn latest_round_data(&self) -> Result<RoundData, FeedError> {
            Err(FeedError("connection refused".into()))
        }
    }

    fn fresh_round(answer: i128) -> RoundData {
        let now = Utc::now();
        RoundData {
            round_id: 10,
            answer,
            started_at: now,
            updated_at: now,
            answered_in_round: 10,
        }
    }

    #[test]
    fn fresh_positive_price_is_accepted() {
        let feed = FixedFeed(fresh_round(2_000_00000000));
        let price = validated_price(&feed, Duration::hours(1)).unwrap();
        assert_eq!(price, 2_000_00000000);
    }

    #[test]
    fn aged_price_is_stale() {
        let mut round = fresh_round(100);
        round.updated_at = Utc::now() - Duration::hours(2);
        let feed = FixedFeed(round);

        let result = validated_price(&feed, Duration::hours(1));
        assert!(matches!(result, Err(OracleError::StalePrice { .. })));
    }

    #[test]
    fn epoch_timestamp_is_stale() {
        let mut round = fresh_round(100);
        round.updated_at = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let feed = FixedFeed(round);

        let result = validated_price(&feed, Duration::weeks(52 * 100));
        assert!(matches!(result, Err(OracleError::StalePrice { .. })));
    }

    #[test]
    fn non_positive_answer_is_invalid() {
        for answer in [0i128, -5] {
            let feed = FixedFeed(fresh_round(answer));
            let result = validated_price(&feed, Duration::hours(1));
            assert!(matches!(result, Err(OracleError::InvalidPrice { .. })));
        }
    }

    #[test]
    fn incomplete_round_is_stale() {
        let mut round = fresh_round(100);
        round.round_id = 11;
        round.answered_in_round = 10;
        let feed = FixedFeed(round);

        let result = validated_price(&feed, Duration::hours(1));
        assert!(matches!(result, Err(OracleError::StalePrice { .. })));
    }

    #[test]
    fn staleness_is_checked_before_sanity() {
        // A round that is both aged AND non-positive must surface as
        // stale, matching the documented validation order.
        let mut round = fresh_round(-1);
        round.updated_at = Utc::now() - Duration::hours(2);
        let feed = FixedFeed(round);

        let result = validated_price(&feed, Duration::hours(1));
        assert!(matches!(result, Err(OracleError::StalePrice { .. })));
    }

    #[test]
    fn broken_feed_surfaces_query_error() {
        let result = validated_price(&BrokenFeed, Duration::hours(1));
        assert!(matches!(result, Err(OracleError::Feed(_))));
    }

    #[test]
    fn native_valuation_divides_by_1e18() {
        // 2 native units (18 decimals) at a price of 3000 * 10^8.
        let amount = 2_000_000_000_000_000_000u128;
        let price = 3_000_00000000u128;
        assert_eq!(native_value(amount, price).unwrap(), 6_000_00000000);
    }

    #[test]
    fn token_valuation_divides_by_token_decimals() {
        // 5 tokens at 6 decimals, price 2 * 10^8.
        let amount = 5_000_000u128;
        let price = 2_00000000u128;
        assert_eq!(token_value(amount, price, 6).unwrap(), 10_00000000);
    }

    #[test]
    fn valuation_overflow_is_reported() {
        let result = native_value(u128::MAX, 2);
        assert!(matches!(result, Err(OracleError::ValueOverflow { .. })));
    }

    #[test]
    fn extreme_token_decimals_value_to_zero() {
        assert_eq!(token_value(1_000, 1_000, 77).unwrap(), 0);
    }

    #[test]
    fn oracle_config_defaults() {
        let config = OracleConfig::default();
        assert_eq!(config.max_price_age_secs, 3600);
        assert!(!config.enforce_valuation_cap);
        assert_eq!(config.valuation_cap, 0);
        assert_eq!(config.max_price_age(), Duration::hours(1));
    }

    #[test]
    fn extreme_max_age_clamps_instead_of_panicking() {
        // Seconds counts the duration type cannot hold must not blow up
        // mid-valuation; they clamp to a zero window.
        let config = OracleConfig {
            max_price_age_secs: i64::MAX,
            ..OracleConfig::default()
        };
        assert_eq!(config.max_price_age(), Duration::zero());

        let feed = FixedFeed(fresh_round(100));
        let result = validated_price(&feed, config.max_price_age());
        assert!(matches!(result, Err(OracleError::StalePrice { .. })));
    }

    #[test]
    fn validate_rejects_unusable_ages() {
        for secs in [0i64, -1, i64::MAX, i64::MIN] {
            let config = OracleConfig {
                max_price_age_secs: secs,
                ..OracleConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(OracleError::InvalidMaxPriceAge { .. })
            ));
        }
        assert!(OracleConfig::default().validate().is_ok());
    }

    #[test]
    fn oracle_config_serialization_roundtrip() {
        let config = OracleConfig {
            max_price_age_secs: 900,
            enforce_valuation_cap: true,
            valuation_cap: 1_000_000_00000000,
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let recovered: OracleConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(recovered.max_price_age_secs, 900);
        assert!(recovered.enforce_valuation_cap);
        assert_eq!(recovered.valuation_cap, 1_000_000_00000000);
    }
}
