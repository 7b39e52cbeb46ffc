//! Oracle Adapter
//!
//! Read-side validation of collateral price feeds. The engine never talks
//! to an oracle directly: callers pass in a [`PriceFeed`] snapshot and the
//! adapter checks it against the configured source and the staleness
//! bound. No side effects.

use crate::constants::oracle::MAX_PRICE_AGE_SECS;
use crate::errors::{VaultError, VaultResult};
use crate::math;
use crate::types::{FeedHandle, VaultConfig};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Snapshot of an external price source at some publish time.
///
/// `price * 10^expo` is the dollar price of one whole collateral unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PriceFeed {
    /// Which source this snapshot came from
    pub handle: FeedHandle,
    /// Price mantissa
    pub price: i64,
    /// Decimal exponent of the mantissa
    pub expo: i32,
    /// Confidence interval around the price, in mantissa units
    pub conf: u64,
    /// Unix seconds when the source published this value
    pub publish_time: i64,
}

impl PriceFeed {
    pub fn new(handle: FeedHandle, price: i64, expo: i32, conf: u64, publish_time: i64) -> Self {
        Self {
            handle,
            price,
            expo,
            conf,
            publish_time,
        }
    }

    /// Age of the snapshot relative to `now`
    pub fn age_secs(&self, now: i64) -> i64 {
        now.saturating_sub(self.publish_time)
    }
}

/// A feed snapshot that passed adapter validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PriceData {
    pub price: i64,
    pub expo: i32,
    pub conf: u64,
    pub publish_time: i64,
}

impl PriceData {
    /// USD value (6 decimals) of a collateral amount at this price
    pub fn value_of(&self, amount: u64) -> VaultResult<u128> {
        math::collateral_value(amount, self.price, self.expo)
    }

    /// Collateral units worth `debt_value` USD units at this price
    pub fn collateral_for(&self, debt_value: u64) -> VaultResult<u64> {
        math::collateral_for_debt(debt_value, self.price, self.expo)
    }
}

/// Validates a feed snapshot and returns the usable price.
///
/// Fails `InvalidFeed` when the handle is not the configured source,
/// `InvalidPrice` for a non-positive mantissa, and `StalePrice` when the
/// snapshot is older than [`MAX_PRICE_AGE_SECS`]. A snapshot exactly at
/// the bound is still accepted.
pub fn read_price(feed: &PriceFeed, config: &VaultConfig, now: i64) -> VaultResult<PriceData> {
    if feed.handle != config.price_feed {
        return Err(VaultError::InvalidFeed {
            expected: config.price_feed,
            actual: feed.handle,
        });
    }

    if feed.price <= 0 {
        return Err(VaultError::InvalidPrice { price: feed.price });
    }

    let age = feed.age_secs(now);
    if age > MAX_PRICE_AGE_SECS {
        return Err(VaultError::StalePrice {
            age_secs: age,
            max_age_secs: MAX_PRICE_AGE_SECS,
        });
    }

    Ok(PriceData {
        price: feed.price,
        expo: feed.expo,
        conf: feed.conf,
        publish_time: feed.publish_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: FeedHandle = [9u8; 32];

    fn config() -> VaultConfig {
        VaultConfig {
            harvest_fee_bps: 1000,
            base_ltv_bps: 5000,
            bonus_ltv_bps: 500,
            liquidation_cooldown_secs: 2,
            liquidation_threshold_bps: 8000,
            liquidation_penalty_bps: 500,
            price_feed: FEED,
        }
    }

    fn feed_at(publish_time: i64) -> PriceFeed {
        PriceFeed::new(FEED, 10_000_000, -6, 5_000, publish_time)
    }

    #[test]
    fn test_read_price_happy_path() {
        let data = read_price(&feed_at(1_000), &config(), 1_010).unwrap();
        assert_eq!(data.price, 10_000_000);
        assert_eq!(data.expo, -6);
        assert_eq!(data.value_of(100_000_000).unwrap(), 1_000_000_000);
    }

    #[test]
    fn test_rejects_unknown_handle() {
        let mut feed = feed_at(1_000);
        feed.handle = [7u8; 32];
        let err = read_price(&feed, &config(), 1_010).unwrap_err();
        assert!(matches!(err, VaultError::InvalidFeed { expected, actual }
            if expected == FEED && actual == [7u8; 32]));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let mut feed = feed_at(1_000);
        feed.price = 0;
        assert!(matches!(
            read_price(&feed, &config(), 1_010),
            Err(VaultError::InvalidPrice { price: 0 })
        ));

        feed.price = -1;
        assert!(read_price(&feed, &config(), 1_010).is_err());
    }

    #[test]
    fn test_staleness_boundary() {
        let published = 1_000;
        let feed = feed_at(published);

        // exactly at the bound passes
        assert!(read_price(&feed, &config(), published + MAX_PRICE_AGE_SECS).is_ok());

        // one second past fails
        let err = read_price(&feed, &config(), published + MAX_PRICE_AGE_SECS + 1).unwrap_err();
        assert!(matches!(err, VaultError::StalePrice { age_secs, max_age_secs }
            if age_secs == MAX_PRICE_AGE_SECS + 1 && max_age_secs == MAX_PRICE_AGE_SECS));
    }

    #[test]
    fn test_collateral_for_inverse() {
        let data = read_price(&feed_at(1_000), &config(), 1_010).unwrap();
        // $550 at $10/unit = 55 units
        assert_eq!(data.collateral_for(550_000_000).unwrap(), 55_000_000);
    }
}
