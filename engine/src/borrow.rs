//! Borrow Engine
//!
//! Deposit yield-bearing collateral, mint gUSD against it up to the
//! configured LTV allowance, and repay. The auto-max path (no explicit
//! borrow amount) mints the full allowance in one call.
//!
//! ## Operation Flow
//!
//! 1. Parameter validation (pause gate, amounts, guardian whitelist)
//! 2. Oracle read (pure, fails closed on stale/invalid feeds)
//! 3. LTV arithmetic in u128
//! 4. Custody legs, validated then applied atomically
//! 5. Ledger mutation and event emission (infallible)

use crate::custody::{Asset, Custody, CustodyLeg};
use crate::errors::{AmountErrorReason, VaultError, VaultResult};
use crate::events::{EventLog, VaultEvent};
use crate::math;
use crate::oracle::{read_price, PriceFeed};
use crate::types::{Identity, VaultState};
use crate::Vec;

// ============================================================================
// Requests / Results
// ============================================================================

/// Deposit-and-borrow request
#[derive(Debug, Clone)]
pub struct DepositBorrowRequest {
    /// Depositor identity (collateral source, gUSD recipient)
    pub depositor: Identity,
    /// Collateral to move into vault custody (smallest units)
    pub collateral_amount: u64,
    /// Exact debt to mint; `None` mints the full allowance
    pub borrow_amount: Option<u64>,
    /// Optional guardian attribution, recorded on first touch
    pub guardian: Option<Identity>,
    /// Trusted clock (unix seconds)
    pub now: i64,
}

/// Deposit-and-borrow outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositBorrowResult {
    /// Collateral moved into custody by this call
    pub collateral_deposited: u64,
    /// gUSD minted by this call
    pub debt_minted: u64,
    /// Position collateral after the call
    pub position_collateral: u64,
    /// Position debt after the call
    pub position_debt: u64,
    /// Observed position LTV after the call (bps)
    pub ltv_bps: u64,
}

/// Repay request
#[derive(Debug, Clone)]
pub struct RepayRequest {
    /// Position owner and gUSD source
    pub depositor: Identity,
    /// Amount to repay; capped at the outstanding debt
    pub amount: u64,
    /// Trusted clock (unix seconds)
    pub now: i64,
}

/// Repay outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepayResult {
    /// gUSD actually burned (after capping)
    pub repaid: u64,
    /// Debt left on the position
    pub remaining_debt: u64,
}

// ============================================================================
// Validation
// ============================================================================

/// Validate deposit parameters before any oracle or custody work
pub fn validate_deposit_params(
    state: &VaultState,
    request: &DepositBorrowRequest,
) -> VaultResult<()> {
    state.ensure_active()?;

    if request.collateral_amount == 0 {
        return Err(VaultError::InvalidAmount {
            amount: 0,
            reason: AmountErrorReason::Zero,
        });
    }

    if let Some(guardian) = request.guardian {
        if !state.guardians.contains(&guardian) {
            return Err(VaultError::GuardianNotFound { identity: guardian });
        }
    }

    Ok(())
}

/// Validate repay parameters
pub fn validate_repay_params(state: &VaultState, request: &RepayRequest) -> VaultResult<()> {
    state.ensure_active()?;

    if request.amount == 0 {
        return Err(VaultError::InvalidAmount {
            amount: 0,
            reason: AmountErrorReason::Zero,
        });
    }

    Ok(())
}

// ============================================================================
// Operations
// ============================================================================

/// Deposit collateral and mint gUSD against the position.
///
/// With `borrow_amount: Some(x)` the call fails `ExceedsMaxBorrow` if the
/// new total debt would exceed the allowance; with `None` it mints
/// whatever allowance remains (possibly zero). Validation completes
/// before any custody or ledger mutation.
pub fn deposit_and_borrow(
    state: &mut VaultState,
    custody: &mut Custody,
    feed: &PriceFeed,
    events: &mut EventLog,
    request: DepositBorrowRequest,
) -> VaultResult<DepositBorrowResult> {
    validate_deposit_params(state, &request)?;
    let price = read_price(feed, &state.config, request.now)?;

    let (existing_collateral, existing_debt) = state
        .loans
        .get(&request.depositor)
        .map(|l| (l.collateral_amount, l.debt_amount))
        .unwrap_or((0, 0));

    let position_collateral = math::safe_add(existing_collateral, request.collateral_amount)?;
    let position_value = price.value_of(position_collateral)?;
    let total_ltv_bps = state.config.total_ltv_bps();
    let max_debt = math::max_borrowable(position_value, total_ltv_bps)?;

    let issued = match request.borrow_amount {
        Some(requested) => {
            let new_debt = math::safe_add(existing_debt, requested)?;
            if new_debt > max_debt {
                return Err(VaultError::ExceedsMaxBorrow {
                    requested,
                    max_debt,
                });
            }
            requested
        }
        // Auto-max: mint the remaining allowance; zero if the position
        // is already at or above it
        None => max_debt.saturating_sub(existing_debt),
    };

    let mut legs = Vec::new();
    legs.push(CustodyLeg::Transfer {
        asset: Asset::Collateral,
        from: request.depositor,
        to: custody.vault_identity(),
        amount: request.collateral_amount,
    });
    if issued > 0 {
        legs.push(CustodyLeg::Mint {
            asset: Asset::Debt,
            to: request.depositor,
            amount: issued,
        });
    }
    custody.execute(&legs)?;

    // Point of no return: ledger mutation is infallible from here
    let fresh = state
        .loans
        .get(&request.depositor)
        .map(|l| l.is_empty())
        .unwrap_or(true);
    let loan = state.loans.find_or_create(request.depositor, request.now);
    if fresh {
        loan.created_at = request.now;
        loan.unstake_requested_at = 0;
        loan.guardian = request.guardian;
        loan.initial_ltv_bps = total_ltv_bps;
    }
    // The accrual watermark resets on every deposit: a top-up earns
    // yield only from this point forward
    loan.last_harvest_ts = request.now;
    loan.collateral_amount = loan.collateral_amount.saturating_add(request.collateral_amount);
    loan.debt_amount = loan.debt_amount.saturating_add(issued);
    loan.last_action_ts = request.now;
    let position_debt = loan.debt_amount;
    let guardian = loan.guardian;

    state.total_collateral = state.total_collateral.saturating_add(request.collateral_amount);
    state.total_debt = state.total_debt.saturating_add(issued);

    let ltv_bps = math::current_ltv_bps(position_debt, position_value);

    events.emit(VaultEvent::LoanCreated {
        owner: request.depositor,
        collateral_deposited: request.collateral_amount,
        debt_minted: issued,
        ltv_bps: ltv_bps.min(u16::MAX as u64) as u16,
        guardian,
        timestamp: request.now,
    });

    Ok(DepositBorrowResult {
        collateral_deposited: request.collateral_amount,
        debt_minted: issued,
        position_collateral,
        position_debt,
        ltv_bps,
    })
}

/// Deposit and mint the full remaining allowance
pub fn deposit_and_borrow_max(
    state: &mut VaultState,
    custody: &mut Custody,
    feed: &PriceFeed,
    events: &mut EventLog,
    depositor: Identity,
    collateral_amount: u64,
    guardian: Option<Identity>,
    now: i64,
) -> VaultResult<DepositBorrowResult> {
    deposit_and_borrow(
        state,
        custody,
        feed,
        events,
        DepositBorrowRequest {
            depositor,
            collateral_amount,
            borrow_amount: None,
            guardian,
            now,
        },
    )
}

/// Burn gUSD against the position's debt.
///
/// The amount is capped at the outstanding debt; repaying a debt-free
/// position is a no-op that touches nothing.
pub fn repay(
    state: &mut VaultState,
    custody: &mut Custody,
    events: &mut EventLog,
    request: RepayRequest,
) -> VaultResult<RepayResult> {
    validate_repay_params(state, &request)?;

    let outstanding = state.loans.require(&request.depositor)?.debt_amount;
    let capped = request.amount.min(outstanding);
    if capped == 0 {
        return Ok(RepayResult {
            repaid: 0,
            remaining_debt: 0,
        });
    }

    custody.execute(&[CustodyLeg::Burn {
        asset: Asset::Debt,
        from: request.depositor,
        amount: capped,
    }])?;

    let loan = state.loans.require_mut(&request.depositor)?;
    loan.debt_amount -= capped;
    loan.last_action_ts = request.now;
    let remaining_debt = loan.debt_amount;

    state.total_debt = state.total_debt.saturating_sub(capped);

    events.emit(VaultEvent::DebtRepaid {
        owner: request.depositor,
        amount: capped,
        remaining_debt,
        timestamp: request.now,
    });

    Ok(RepayResult {
        repaid: capped,
        remaining_debt,
    })
}

// ============================================================================
// Tests
// ============================================================================
