//! Collateral Withdrawal
//!
//! Leaving the vault is a two-phase exit for debt-free positions: the
//! first call starts the cooldown, the second (after it elapses) releases
//! the entire collateral balance back to the depositor. The loan record
//! is zeroed in place, never deleted, so a later deposit reuses it as a
//! fresh position.

use crate::custody::{Asset, Custody, CustodyLeg};
use crate::errors::{AmountErrorReason, VaultError, VaultResult};
use crate::events::{EventLog, VaultEvent};
use crate::types::{Identity, VaultState};

/// Outcome of a withdrawal call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawOutcome {
    /// Cooldown started; call again once `available_at` is reached
    CooldownStarted { available_at: i64 },
    /// Collateral released back to the depositor
    Withdrawn { amount: u64 },
}

/// Request or complete a full collateral withdrawal.
///
/// Fails `DebtOutstanding` while any debt remains; the position must be
/// repaid (or harvested down) to zero first. Phase one moves no funds.
pub fn withdraw_collateral(
    state: &mut VaultState,
    custody: &mut Custody,
    events: &mut EventLog,
    depositor: Identity,
    now: i64,
) -> VaultResult<WithdrawOutcome> {
    state.ensure_active()?;
    let loan = state.loans.require(&depositor)?;

    if loan.debt_amount > 0 {
        return Err(VaultError::DebtOutstanding {
            remaining_debt: loan.debt_amount,
        });
    }
    if loan.collateral_amount == 0 {
        return Err(VaultError::InvalidAmount {
            amount: 0,
            reason: AmountErrorReason::Zero,
        });
    }

    // Phase 1: start the clock
    if loan.unstake_requested_at == 0 {
        let available_at = now + state.config.liquidation_cooldown_secs as i64;
        let loan = state.loans.require_mut(&depositor)?;
        loan.unstake_requested_at = now;

        events.emit(VaultEvent::UnstakeRequested {
            owner: depositor,
            available_at,
            timestamp: now,
        });

        return Ok(WithdrawOutcome::CooldownStarted { available_at });
    }

    // Phase 2: release once the cooldown has elapsed
    let elapsed_secs = now - loan.unstake_requested_at;
    let required_secs = state.config.liquidation_cooldown_secs as i64;
    if elapsed_secs < required_secs {
        return Err(VaultError::CooldownActive {
            elapsed_secs,
            required_secs,
        });
    }

    let amount = loan.collateral_amount;
    custody.execute(&[CustodyLeg::Transfer {
        asset: Asset::Collateral,
        from: custody.vault_identity(),
        to: depositor,
        amount,
    }])?;

    let loan = state.loans.require_mut(&depositor)?;
    loan.collateral_amount = 0;
    loan.unstake_requested_at = 0;
    loan.last_action_ts = now;

    state.total_collateral = state.total_collateral.saturating_sub(amount);

    events.emit(VaultEvent::CollateralWithdrawn {
        owner: depositor,
        amount,
        timestamp: now,
    });

    Ok(WithdrawOutcome::Withdrawn { amount })
}

// ============================================================================
// Tests
// ============================================================================
