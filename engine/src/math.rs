//! Fixed-Point Math for the Guardian Vault Engine
//!
//! Pure integer arithmetic over smallest units: collateral valuation with
//! an explicit oracle exponent, LTV ratios, borrow ceilings, and yield
//! accrual. All intermediates are u128 with checked operations; floating
//! point is never used.

use crate::constants::{fees, time};
use crate::errors::{VaultError, VaultResult};

/// Scales `10^|expo|` with overflow checking
fn pow10(expo: i32) -> VaultResult<u128> {
    10u128
        .checked_pow(expo.unsigned_abs())
        .ok_or(VaultError::Overflow)
}

/// USD value of a collateral amount, in value units (6 decimals).
///
/// The feed reports `price * 10^expo` dollars per whole collateral unit;
/// with 6-decimal collateral the asset decimals cancel and the scaled
/// product lands directly in 6-decimal USD units:
/// `value = amount * price * 10^expo`.
pub fn collateral_value(amount: u64, price: i64, expo: i32) -> VaultResult<u128> {
    if price <= 0 {
        return Err(VaultError::InvalidPrice { price });
    }

    let raw = (amount as u128)
        .checked_mul(price as u128)
        .ok_or(VaultError::Overflow)?;

    if expo < 0 {
        raw.checked_div(pow10(expo)?).ok_or(VaultError::DivisionByZero)
    } else {
        raw.checked_mul(pow10(expo)?).ok_or(VaultError::Overflow)
    }
}

/// Collateral units whose value equals `debt_value` at the given price.
///
/// Inverse of [`collateral_value`]: `units = debt_value / (price * 10^expo)`.
pub fn collateral_for_debt(debt_value: u64, price: i64, expo: i32) -> VaultResult<u64> {
    if price <= 0 {
        return Err(VaultError::InvalidPrice { price });
    }

    let units = if expo < 0 {
        (debt_value as u128)
            .checked_mul(pow10(expo)?)
            .ok_or(VaultError::Overflow)?
            .checked_div(price as u128)
            .ok_or(VaultError::DivisionByZero)?
    } else {
        let divisor = (price as u128)
            .checked_mul(pow10(expo)?)
            .ok_or(VaultError::Overflow)?;
        (debt_value as u128)
            .checked_div(divisor)
            .ok_or(VaultError::DivisionByZero)?
    };

    u64::try_from(units).map_err(|_| VaultError::Overflow)
}

/// Current loan-to-value ratio in basis points (floor division).
///
/// Zero debt reads as 0; debt against zero value reads as `u64::MAX`.
pub fn current_ltv_bps(debt: u64, collateral_value: u128) -> u64 {
    if debt == 0 {
        return 0;
    }
    if collateral_value == 0 {
        return u64::MAX;
    }

    let ratio = (debt as u128).saturating_mul(fees::BPS_DENOMINATOR as u128) / collateral_value;
    ratio.min(u64::MAX as u128) as u64
}

/// Liquidation eligibility, compared without intermediate truncation:
/// `debt * 10000 >= value * threshold`.
pub fn is_liquidatable(debt: u64, collateral_value: u128, threshold_bps: u16) -> bool {
    if debt == 0 {
        return false;
    }

    (debt as u128).saturating_mul(fees::BPS_DENOMINATOR as u128)
        >= collateral_value.saturating_mul(threshold_bps as u128)
}

/// Maximum issuable debt for a collateral value under the given allowance
pub fn max_borrowable(collateral_value: u128, total_ltv_bps: u16) -> VaultResult<u64> {
    let max = collateral_value
        .checked_mul(total_ltv_bps as u128)
        .ok_or(VaultError::Overflow)?
        / fees::BPS_DENOMINATOR as u128;

    u64::try_from(max).map_err(|_| VaultError::Overflow)
}

/// `amount * bps / 10000`, floored
pub fn apply_bps(amount: u64, bps: u16) -> VaultResult<u64> {
    let result = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(VaultError::Overflow)?
        / fees::BPS_DENOMINATOR as u128;

    u64::try_from(result).map_err(|_| VaultError::Overflow)
}

/// Simulated staking rewards over an elapsed interval:
/// `collateral * apy_bps * elapsed / (10000 * seconds_per_year)`.
///
/// Non-positive intervals accrue nothing.
pub fn accrued_yield(collateral: u64, apy_bps: u64, elapsed_secs: i64) -> VaultResult<u64> {
    if elapsed_secs <= 0 || collateral == 0 || apy_bps == 0 {
        return Ok(0);
    }

    let denominator = (fees::BPS_DENOMINATOR as u128)
        .checked_mul(time::SECONDS_PER_YEAR as u128)
        .ok_or(VaultError::Overflow)?;

    let rewards = (collateral as u128)
        .checked_mul(apy_bps as u128)
        .ok_or(VaultError::Overflow)?
        .checked_mul(elapsed_secs as u128)
        .ok_or(VaultError::Overflow)?
        / denominator;

    u64::try_from(rewards).map_err(|_| VaultError::Overflow)
}

/// Checked addition
pub fn safe_add(a: u64, b: u64) -> VaultResult<u64> {
    a.checked_add(b).ok_or(VaultError::Overflow)
}
