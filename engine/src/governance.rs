//! Governance Operations
//!
//! The authority-gated admin surface: guardian whitelist management,
//! config and oracle rotation, pause control, and treasury withdrawal.
//! Every entrypoint checks the caller against the vault authority before
//! anything else. Governance stays available while the vault is paused;
//! the pause flag gates user operations only.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::custody::{Asset, Custody, CustodyLeg};
use crate::errors::{AmountErrorReason, VaultError, VaultResult};
use crate::events::{EventLog, VaultEvent};
use crate::types::{FeedHandle, Identity, VaultConfig, VaultState};

/// Treasury withdrawal outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreasuryWithdrawResult {
    /// Collateral units paid out
    pub withdrawn: u64,
    /// Treasury balance left after the withdrawal
    pub remaining_balance: u64,
}

/// Whitelist a guardian.
///
/// Authority-only; the registry enforces the commission, name-length,
/// duplicate, and capacity bounds.
pub fn add_guardian(
    state: &mut VaultState,
    events: &mut EventLog,
    caller: &Identity,
    identity: Identity,
    name: String,
    commission_bps: u16,
    now: i64,
) -> VaultResult<()> {
    state.ensure_authority(caller)?;
    state.guardians.add(identity, name.clone(), commission_bps)?;

    events.emit(VaultEvent::GuardianAdded {
        identity,
        name,
        commission_bps,
        timestamp: now,
    });

    Ok(())
}

/// Remove a guardian from the whitelist.
///
/// Loans already attributed to the removed guardian keep the attribution
/// but stop earning commission.
pub fn remove_guardian(
    state: &mut VaultState,
    events: &mut EventLog,
    caller: &Identity,
    identity: Identity,
    now: i64,
) -> VaultResult<()> {
    state.ensure_authority(caller)?;
    state.guardians.remove(identity)?;

    events.emit(VaultEvent::GuardianRemoved {
        identity,
        timestamp: now,
    });

    Ok(())
}

/// Replace the vault configuration.
///
/// The new config is validated in full before it is written; a rejected
/// config leaves the old one in place.
pub fn update_config(
    state: &mut VaultState,
    events: &mut EventLog,
    caller: &Identity,
    new_config: VaultConfig,
    now: i64,
) -> VaultResult<()> {
    state.ensure_authority(caller)?;
    new_config.validate()?;

    state.config = new_config;
    events.emit(VaultEvent::ConfigUpdated {
        new_config,
        timestamp: now,
    });

    Ok(())
}

/// Rotate the trusted price feed
pub fn update_oracle(
    state: &mut VaultState,
    events: &mut EventLog,
    caller: &Identity,
    new_feed: FeedHandle,
    now: i64,
) -> VaultResult<()> {
    state.ensure_authority(caller)?;
    if new_feed == [0u8; 32] {
        return Err(VaultError::InvalidAddress {
            reason: "price feed cannot be zero",
        });
    }

    let old_feed = state.config.price_feed;
    state.config.price_feed = new_feed;

    events.emit(VaultEvent::OracleUpdated {
        old_feed,
        new_feed,
        timestamp: now,
    });

    Ok(())
}

/// Pause or unpause user operations.
///
/// Setting the flag to its current value is a no-op without an event.
pub fn set_paused(
    state: &mut VaultState,
    events: &mut EventLog,
    caller: &Identity,
    paused: bool,
    now: i64,
) -> VaultResult<()> {
    state.ensure_authority(caller)?;
    if state.paused == paused {
        return Ok(());
    }

    state.paused = paused;
    events.emit(if paused {
        VaultEvent::VaultPaused {
            by: *caller,
            timestamp: now,
        }
    } else {
        VaultEvent::VaultUnpaused {
            by: *caller,
            timestamp: now,
        }
    });

    Ok(())
}

/// Pay accrued fees out of the treasury
pub fn withdraw_treasury(
    state: &mut VaultState,
    custody: &mut Custody,
    events: &mut EventLog,
    caller: &Identity,
    to: Identity,
    amount: u64,
    now: i64,
) -> VaultResult<TreasuryWithdrawResult> {
    state.ensure_authority(caller)?;
    if amount == 0 {
        return Err(VaultError::InvalidAmount {
            amount: 0,
            reason: AmountErrorReason::Zero,
        });
    }
    if to == [0u8; 32] {
        return Err(VaultError::InvalidAddress {
            reason: "recipient cannot be zero address",
        });
    }

    // Rehearse the debit so the post-custody write cannot fail
    let mut treasury_after = state.treasury;
    treasury_after.debit(amount)?;

    custody.execute(&[CustodyLeg::Transfer {
        asset: Asset::Collateral,
        from: state.treasury_identity,
        to,
        amount,
    }])?;

    state.treasury = treasury_after;
    let remaining_balance = state.treasury.balance;

    events.emit(VaultEvent::TreasuryWithdrawal {
        to,
        amount,
        remaining_balance,
        timestamp: now,
    });

    Ok(TreasuryWithdrawResult {
        withdrawn: amount,
        remaining_balance,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;
    #[cfg(not(feature = "std"))]
    use alloc::string::ToString;

    const NOW: i64 = 1_700_000_000;
    const FEED: [u8; 32] = [9u8; 32];

    fn authority() -> Identity {
        [0xADu8; 32]
    }

    fn intruder() -> Identity {
        [0x66u8; 32]
    }

    fn treasury_id() -> Identity {
        [0xFEu8; 32]
    }

    fn guardian1() -> Identity {
        [0x61u8; 32]
    }

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

    fn setup() -> (VaultState, EventLog) {
        let state = VaultState::new(authority(), treasury_id(), config()).unwrap();
        (state, EventLog::new())
    }

    #[test]
    fn test_guardian_ops_require_authority() {
        let (mut state, mut events) = setup();

        let result = add_guardian(
            &mut state,
            &mut events,
            &intruder(),
            guardian1(),
            "Alpha".to_string(),
            500,
            NOW,
        );
        assert!(matches!(result, Err(VaultError::Unauthorized { .. })));

        let result = remove_guardian(&mut state, &mut events, &intruder(), guardian1(), NOW);
        assert!(matches!(result, Err(VaultError::Unauthorized { .. })));
        assert!(!events.has_events());
    }

    #[test]
    fn test_add_and_remove_guardian() {
        let (mut state, mut events) = setup();

        add_guardian(
            &mut state,
            &mut events,
            &authority(),
            guardian1(),
            "Alpha Wallet".to_string(),
            500,
            NOW,
        )
        .unwrap();
        assert!(state.guardians.contains(&guardian1()));
        assert_eq!(events.filter_by_type(EventType::GuardianAdded).len(), 1);

        remove_guardian(&mut state, &mut events, &authority(), guardian1(), NOW + 1).unwrap();
        assert!(!state.guardians.contains(&guardian1()));
        assert_eq!(events.filter_by_type(EventType::GuardianRemoved).len(), 1);
    }

    #[test]
    fn test_commission_bound_via_entrypoint() {
        let (mut state, mut events) = setup();

        let result = add_guardian(
            &mut state,
            &mut events,
            &authority(),
            guardian1(),
            "Greedy".to_string(),
            701,
            NOW,
        );
        assert_eq!(
            result,
            Err(VaultError::InvalidCommission {
                commission_bps: 701,
                max_bps: 700,
            })
        );

        // At the bound it goes through
        add_guardian(
            &mut state,
            &mut events,
            &authority(),
            guardian1(),
            "Fair".to_string(),
            700,
            NOW,
        )
        .unwrap();
    }

    #[test]
    fn test_update_config_validates_before_write() {
        let (mut state, mut events) = setup();

        let mut bad = config();
        bad.liquidation_threshold_bps = 5500; // == base + bonus
        let result = update_config(&mut state, &mut events, &authority(), bad, NOW);
        assert!(matches!(
            result,
            Err(VaultError::ConfigInvariantViolated { .. })
        ));
        // Old config still in place
        assert_eq!(state.config.liquidation_threshold_bps, 8000);
        assert!(!events.has_events());

        let mut good = config();
        good.harvest_fee_bps = 1500;
        update_config(&mut state, &mut events, &authority(), good, NOW).unwrap();
        assert_eq!(state.config.harvest_fee_bps, 1500);
        assert_eq!(events.filter_by_type(EventType::ConfigUpdated).len(), 1);
    }

    #[test]
    fn test_oracle_rotation() {
        let (mut state, mut events) = setup();
        let new_feed = [0x77u8; 32];

        update_oracle(&mut state, &mut events, &authority(), new_feed, NOW).unwrap();
        assert_eq!(state.config.price_feed, new_feed);

        let rotated = events.filter_by_type(EventType::OracleUpdated);
        assert_eq!(rotated.len(), 1);
        assert!(matches!(
            rotated[0],
            VaultEvent::OracleUpdated {
                old_feed: FEED,
                ..
            }
        ));

        let result = update_oracle(&mut state, &mut events, &authority(), [0u8; 32], NOW);
        assert!(matches!(result, Err(VaultError::InvalidAddress { .. })));
    }

    #[test]
    fn test_pause_toggle_emits_once() {
        let (mut state, mut events) = setup();

        set_paused(&mut state, &mut events, &authority(), true, NOW).unwrap();
        assert!(state.paused);
        // Repeat is a silent no-op
        set_paused(&mut state, &mut events, &authority(), true, NOW + 1).unwrap();
        assert_eq!(events.filter_by_type(EventType::VaultPaused).len(), 1);

        set_paused(&mut state, &mut events, &authority(), false, NOW + 2).unwrap();
        assert!(!state.paused);
        assert_eq!(events.filter_by_type(EventType::VaultUnpaused).len(), 1);
    }

    #[test]
    fn test_governance_available_while_paused() {
        let (mut state, mut events) = setup();
        set_paused(&mut state, &mut events, &authority(), true, NOW).unwrap();

        // Config and guardian management still work under pause
        add_guardian(
            &mut state,
            &mut events,
            &authority(),
            guardian1(),
            "Alpha".to_string(),
            500,
            NOW + 1,
        )
        .unwrap();
        update_oracle(&mut state, &mut events, &authority(), [0x77u8; 32], NOW + 2).unwrap();
    }

    #[test]
    fn test_treasury_withdrawal() {
        let (mut state, mut events) = setup();
        let mut custody = Custody::new([0xAAu8; 32]);
        let recipient = [3u8; 32];

        // Accrue some fees: ledger record plus custody balance
        state.treasury.credit(1_000_000).unwrap();
        custody
            .execute(&[CustodyLeg::Mint {
                asset: Asset::Collateral,
                to: treasury_id(),
                amount: 1_000_000,
            }])
            .unwrap();

        let result = withdraw_treasury(
            &mut state,
            &mut custody,
            &mut events,
            &authority(),
            recipient,
            300_000,
            NOW,
        )
        .unwrap();

        assert_eq!(
            result,
            TreasuryWithdrawResult {
                withdrawn: 300_000,
                remaining_balance: 700_000,
            }
        );
        assert_eq!(custody.collateral.balance_of(&recipient), 300_000);
        assert_eq!(custody.collateral.balance_of(&treasury_id()), 700_000);
        assert_eq!(state.treasury.lifetime_accrued, 1_000_000);
        assert_eq!(
            events.filter_by_type(EventType::TreasuryWithdrawal).len(),
            1
        );

        // Over-withdrawal is refused before custody is touched
        let result = withdraw_treasury(
            &mut state,
            &mut custody,
            &mut events,
            &authority(),
            recipient,
            700_001,
            NOW + 1,
        );
        assert_eq!(
            result,
            Err(VaultError::InsufficientBalance {
                available: 700_000,
                requested: 700_001,
            })
        );
    }

    #[test]
    fn test_treasury_withdrawal_guards() {
        let (mut state, mut events) = setup();
        let mut custody = Custody::new([0xAAu8; 32]);
        state.treasury.credit(1_000_000).unwrap();

        let result = withdraw_treasury(
            &mut state,
            &mut custody,
            &mut events,
            &intruder(),
            [3u8; 32],
            100,
            NOW,
        );
        assert!(matches!(result, Err(VaultError::Unauthorized { .. })));

        let result = withdraw_treasury(
            &mut state,
            &mut custody,
            &mut events,
            &authority(),
            [3u8; 32],
            0,
            NOW,
        );
        assert!(matches!(result, Err(VaultError::InvalidAmount { .. })));

        let result = withdraw_treasury(
            &mut state,
            &mut custody,
            &mut events,
            &authority(),
            [0u8; 32],
            100,
            NOW,
        );
        assert!(matches!(result, Err(VaultError::InvalidAddress { .. })));
    }
}
