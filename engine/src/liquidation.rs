//! Liquidation Engine
//!
//! Full liquidation of positions whose LTV has reached the configured
//! threshold. The liquidator repays the entire debt and receives the
//! debt-equivalent collateral plus a penalty bonus; the treasury takes
//! its fee cut out of the penalty portion.
//!
//! ```text
//! debt * 10000 >= collateral_value * threshold_bps
//!                 │
//!                 ▼
//! liquidator burns debt gUSD
//!                 │
//!                 ▼
//! seized = debt_in_collateral * (10000 + penalty_bps) / 10000
//!          (capped at the position's collateral)
//!                 │
//!          ┌──────┴───────┐
//!          ▼              ▼
//!   to_liquidator    to_treasury
//!   (seized - fee)   (fee on the penalty portion)
//! ```
//!
//! Liquidate-to-zero: no partial liquidation, no residual debt. When the
//! seizure is capped by the available collateral the shortfall is
//! reported once as an uncollateralized loss and never retried.

use crate::constants::fees;
use crate::custody::{Asset, Custody, CustodyLeg};
use crate::errors::{VaultError, VaultResult};
use crate::events::{EventLog, VaultEvent};
use crate::math;
use crate::oracle::{read_price, PriceFeed};
use crate::types::{Identity, VaultState};
use crate::Vec;

// ============================================================================
// Requests / Results
// ============================================================================

/// Liquidation request
#[derive(Debug, Clone)]
pub struct LiquidationRequest {
    /// Owner of the position to liquidate
    pub owner: Identity,
    /// Caller repaying the debt and receiving the seizure
    pub liquidator: Identity,
    /// Trusted clock (unix seconds)
    pub now: i64,
}

/// Liquidation outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidationResult {
    /// gUSD burned from the liquidator
    pub debt_repaid: u64,
    /// Collateral removed from the position
    pub collateral_seized: u64,
    /// Seized collateral paid to the liquidator
    pub to_liquidator: u64,
    /// Seized collateral routed to the treasury
    pub to_treasury: u64,
    /// Seizure shortfall in collateral units; zero when fully covered
    pub shortfall: u64,
    /// Collateral left with the (now debt-free) owner
    pub remaining_collateral: u64,
}

// ============================================================================
// Operation
// ============================================================================

/// Liquidate a position at or above the liquidation threshold.
///
/// Eligibility and cooldown are re-checked against the caller-supplied
/// clock and a fresh oracle read; a healthy position fails
/// `NotLiquidatable` with the observed LTV.
pub fn liquidate(
    state: &mut VaultState,
    custody: &mut Custody,
    feed: &PriceFeed,
    events: &mut EventLog,
    request: LiquidationRequest,
) -> VaultResult<LiquidationResult> {
    // 1. Gates that need no oracle
    state.ensure_active()?;
    let loan = state.loans.require(&request.owner)?;
    if loan.debt_amount == 0 {
        return Err(VaultError::NotLiquidatable {
            owner: request.owner,
            current_ltv_bps: 0,
        });
    }

    let elapsed_secs = request.now - loan.last_action_ts;
    let required_secs = state.config.liquidation_cooldown_secs as i64;
    if elapsed_secs < required_secs {
        return Err(VaultError::CooldownActive {
            elapsed_secs,
            required_secs,
        });
    }

    let debt = loan.debt_amount;
    let collateral = loan.collateral_amount;

    // 2. Price the position
    let price = read_price(feed, &state.config, request.now)?;
    let collateral_value = price.value_of(collateral)?;

    // 3. Eligibility, cross-multiplied to avoid intermediate truncation
    if !math::is_liquidatable(debt, collateral_value, state.config.liquidation_threshold_bps) {
        return Err(VaultError::NotLiquidatable {
            owner: request.owner,
            current_ltv_bps: math::current_ltv_bps(debt, collateral_value),
        });
    }

    // 4. Seizure arithmetic
    let debt_in_collateral = price.collateral_for(debt)?;
    let seize_bps =
        (fees::BPS_DENOMINATOR as u16).saturating_add(state.config.liquidation_penalty_bps);
    let uncapped = math::apply_bps(debt_in_collateral, seize_bps)?;
    let collateral_seized = uncapped.min(collateral);
    let shortfall = uncapped - collateral_seized;

    let penalty_portion = collateral_seized.saturating_sub(debt_in_collateral);
    let to_treasury = math::apply_bps(penalty_portion, state.config.harvest_fee_bps)?;
    let to_liquidator = collateral_seized - to_treasury;

    // Treasury credit is rehearsed up front so the post-custody ledger
    // writes cannot fail
    let mut treasury_after = state.treasury;
    treasury_after.credit(to_treasury)?;

    // 5. Custody: debt burn plus collateral payouts, atomically
    let mut legs = Vec::new();
    legs.push(CustodyLeg::Burn {
        asset: Asset::Debt,
        from: request.liquidator,
        amount: debt,
    });
    if to_liquidator > 0 {
        legs.push(CustodyLeg::Transfer {
            asset: Asset::Collateral,
            from: custody.vault_identity(),
            to: request.liquidator,
            amount: to_liquidator,
        });
    }
    if to_treasury > 0 {
        legs.push(CustodyLeg::Transfer {
            asset: Asset::Collateral,
            from: custody.vault_identity(),
            to: state.treasury_identity,
            amount: to_treasury,
        });
    }
    custody.execute(&legs)?;

    // 6. Ledger writes (infallible from here)
    let loan = state.loans.require_mut(&request.owner)?;
    loan.collateral_amount -= collateral_seized;
    loan.debt_amount = 0;
    loan.last_action_ts = request.now;
    let remaining_collateral = loan.collateral_amount;

    state.treasury = treasury_after;
    state.total_collateral = state.total_collateral.saturating_sub(collateral_seized);
    state.total_debt = state.total_debt.saturating_sub(debt);

    events.emit(VaultEvent::LoanLiquidated {
        owner: request.owner,
        liquidator: request.liquidator,
        debt_repaid: debt,
        collateral_seized,
        to_liquidator,
        to_treasury,
        timestamp: request.now,
    });
    if shortfall > 0 {
        events.emit(VaultEvent::UncollateralizedLoss {
            owner: request.owner,
            shortfall,
            timestamp: request.now,
        });
    }

    Ok(LiquidationResult {
        debt_repaid: debt,
        collateral_seized,
        to_liquidator,
        to_treasury,
        shortfall,
        remaining_collateral,
    })
}

// ============================================================================
// Tests
// ============================================================================
