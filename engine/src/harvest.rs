//! Yield Harvest and Fee Accounting
//!
//! Deposited collateral is yield-bearing. Harvesting materializes the
//! yield accrued since the position's watermark, takes the protocol fee
//! (with the attributed guardian's commission carved out of it), and
//! applies the net rewards as debt reduction at the current oracle price.
//!
//! On networks where rewards flow in through the staking program itself
//! the simulated APY is zero and harvest is a watermark refresh.

use crate::constants::staking;
use crate::custody::{Asset, Custody, CustodyLeg};
use crate::errors::VaultResult;
use crate::events::{EventLog, VaultEvent};
use crate::math;
use crate::oracle::{read_price, PriceFeed};
use crate::types::{Identity, VaultState};
use crate::Vec;

// ============================================================================
// Fee Split
// ============================================================================

/// Split an amount into (treasury_share, remainder) by the fee rate.
///
/// Floor division; deterministic and idempotent for identical inputs.
/// At-most-once application is the caller's job, via the accrual
/// watermark.
pub fn split_fee(amount: u64, fee_bps: u16) -> VaultResult<(u64, u64)> {
    let treasury_share = math::apply_bps(amount, fee_bps)?;
    Ok((treasury_share, amount - treasury_share))
}

// ============================================================================
// Harvest Operation
// ============================================================================

/// Harvest outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestResult {
    /// Yield accrued since the watermark (collateral units)
    pub rewards_earned: u64,
    /// Protocol fee taken from the rewards (collateral units)
    pub fee_taken: u64,
    /// Share of the fee paid to the attributed guardian
    pub guardian_commission: u64,
    /// Debt cleared by the net rewards (gUSD units)
    pub debt_reduced: u64,
    /// Debt left on the position
    pub remaining_debt: u64,
}

/// Harvest accrued yield for one position.
///
/// Zero accrual (fresh watermark, zero APY, or empty position) refreshes
/// the watermark and returns zeros without an event; the watermark never
/// moves backward. Net rewards reduce debt saturating at zero; excess
/// yield is not refunded.
pub fn harvest(
    state: &mut VaultState,
    custody: &mut Custody,
    feed: &PriceFeed,
    events: &mut EventLog,
    depositor: Identity,
    now: i64,
) -> VaultResult<HarvestResult> {
    state.ensure_active()?;
    let loan = state.loans.require(&depositor)?;
    let price = read_price(feed, &state.config, now)?;

    let elapsed_secs = now - loan.last_harvest_ts;
    let rewards_earned =
        math::accrued_yield(loan.collateral_amount, staking::SIM_APY_BPS, elapsed_secs)?;

    if rewards_earned == 0 {
        let loan = state.loans.require_mut(&depositor)?;
        // A clock behind the watermark must not reopen an interval that
        // was already harvested
        if elapsed_secs > 0 {
            loan.last_harvest_ts = now;
        }
        let remaining_debt = loan.debt_amount;
        return Ok(HarvestResult {
            rewards_earned: 0,
            fee_taken: 0,
            guardian_commission: 0,
            debt_reduced: 0,
            remaining_debt,
        });
    }

    let (fee_taken, net_rewards) = split_fee(rewards_earned, state.config.harvest_fee_bps)?;
    let commission_bps = state.guardians.commission_bps_for(loan.guardian);
    let guardian_commission = math::apply_bps(fee_taken, commission_bps)?;
    let treasury_share = fee_taken - guardian_commission;

    let net_value = price.value_of(net_rewards)?;
    let debt_reduced = net_value.min(loan.debt_amount as u128) as u64;
    let guardian = loan.guardian;

    // Rehearse the treasury credit so post-custody writes cannot fail
    let mut treasury_after = state.treasury;
    treasury_after.credit(treasury_share)?;

    // Yield enters the system here: the fee portions are minted as fresh
    // collateral units; the net portion is consumed as debt reduction
    let mut legs = Vec::new();
    if treasury_share > 0 {
        legs.push(CustodyLeg::Mint {
            asset: Asset::Collateral,
            to: state.treasury_identity,
            amount: treasury_share,
        });
    }
    if guardian_commission > 0 {
        if let Some(guardian_identity) = guardian {
            legs.push(CustodyLeg::Mint {
                asset: Asset::Collateral,
                to: guardian_identity,
                amount: guardian_commission,
            });
        }
    }
    custody.execute(&legs)?;

    let loan = state.loans.require_mut(&depositor)?;
    loan.debt_amount -= debt_reduced;
    loan.last_harvest_ts = now;
    let remaining_debt = loan.debt_amount;

    state.treasury = treasury_after;
    state.total_debt = state.total_debt.saturating_sub(debt_reduced);

    events.emit(VaultEvent::RewardHarvested {
        owner: depositor,
        rewards_earned,
        fee_taken,
        guardian_commission,
        debt_reduced,
        timestamp: now,
    });

    Ok(HarvestResult {
        rewards_earned,
        fee_taken,
        guardian_commission,
        debt_reduced,
        remaining_debt,
    })
}

// ============================================================================
// Tests
// ============================================================================
