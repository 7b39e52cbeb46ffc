//! Vault Events
//!
//! Events are appended by mutating operations and can be indexed
//! off-engine for building UIs, analytics, and alerting. The log is the
//! engine's observable record of what happened and why.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::types::{FeedHandle, Identity, VaultConfig};
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Loan Events (0x01 - 0x1F)
    LoanCreated = 0x01,
    DebtRepaid = 0x02,
    UnstakeRequested = 0x03,
    CollateralWithdrawn = 0x04,

    // Liquidation Events (0x20 - 0x3F)
    LoanLiquidated = 0x20,
    UncollateralizedLoss = 0x21,

    // Harvest Events (0x40 - 0x5F)
    RewardHarvested = 0x40,

    // Governance Events (0x80 - 0x9F)
    VaultPaused = 0x80,
    VaultUnpaused = 0x81,
    GuardianAdded = 0x82,
    GuardianRemoved = 0x83,
    OracleUpdated = 0x84,
    ConfigUpdated = 0x85,
    TreasuryWithdrawal = 0x86,
}

/// Main event enum containing all vault events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum VaultEvent {
    // ============ Loan Events ============

    /// Emitted when a deposit mints debt (including follow-up deposits)
    LoanCreated {
        owner: Identity,
        collateral_deposited: u64,
        debt_minted: u64,
        ltv_bps: u16,
        guardian: Option<Identity>,
        timestamp: i64,
    },

    /// Emitted when debt is repaid
    DebtRepaid {
        owner: Identity,
        amount: u64,
        remaining_debt: u64,
        timestamp: i64,
    },

    /// Emitted when a withdrawal cooldown starts
    UnstakeRequested {
        owner: Identity,
        available_at: i64,
        timestamp: i64,
    },

    /// Emitted when collateral leaves vault custody back to the owner
    CollateralWithdrawn {
        owner: Identity,
        amount: u64,
        timestamp: i64,
    },

    // ============ Liquidation Events ============

    /// Emitted when a position is liquidated
    LoanLiquidated {
        owner: Identity,
        liquidator: Identity,
        debt_repaid: u64,
        collateral_seized: u64,
        to_liquidator: u64,
        to_treasury: u64,
        timestamp: i64,
    },

    /// Emitted when seizure was capped by the available collateral
    UncollateralizedLoss {
        owner: Identity,
        shortfall: u64,
        timestamp: i64,
    },

    // ============ Harvest Events ============

    /// Emitted when yield is harvested against a position
    RewardHarvested {
        owner: Identity,
        rewards_earned: u64,
        fee_taken: u64,
        guardian_commission: u64,
        debt_reduced: u64,
        timestamp: i64,
    },

    // ============ Governance Events ============

    /// Emitted when the vault is paused
    VaultPaused { by: Identity, timestamp: i64 },

    /// Emitted when the vault is unpaused
    VaultUnpaused { by: Identity, timestamp: i64 },

    /// Emitted when a guardian joins the whitelist
    GuardianAdded {
        identity: Identity,
        name: String,
        commission_bps: u16,
        timestamp: i64,
    },

    /// Emitted when a guardian is removed
    GuardianRemoved { identity: Identity, timestamp: i64 },

    /// Emitted when the price feed is rotated
    OracleUpdated {
        old_feed: FeedHandle,
        new_feed: FeedHandle,
        timestamp: i64,
    },

    /// Emitted when the configuration changes
    ConfigUpdated {
        new_config: VaultConfig,
        timestamp: i64,
    },

    /// Emitted when governance withdraws accrued fees
    TreasuryWithdrawal {
        to: Identity,
        amount: u64,
        remaining_balance: u64,
        timestamp: i64,
    },
}

impl VaultEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::LoanCreated { .. } => EventType::LoanCreated,
            Self::DebtRepaid { .. } => EventType::DebtRepaid,
            Self::UnstakeRequested { .. } => EventType::UnstakeRequested,
            Self::CollateralWithdrawn { .. } => EventType::CollateralWithdrawn,
            Self::LoanLiquidated { .. } => EventType::LoanLiquidated,
            Self::UncollateralizedLoss { .. } => EventType::UncollateralizedLoss,
            Self::RewardHarvested { .. } => EventType::RewardHarvested,
            Self::VaultPaused { .. } => EventType::VaultPaused,
            Self::VaultUnpaused { .. } => EventType::VaultUnpaused,
            Self::GuardianAdded { .. } => EventType::GuardianAdded,
            Self::GuardianRemoved { .. } => EventType::GuardianRemoved,
            Self::OracleUpdated { .. } => EventType::OracleUpdated,
            Self::ConfigUpdated { .. } => EventType::ConfigUpdated,
            Self::TreasuryWithdrawal { .. } => EventType::TreasuryWithdrawal,
        }
    }

    /// Get the timestamp when the event occurred
    pub fn timestamp(&self) -> i64 {
        match self {
            Self::LoanCreated { timestamp, .. } => *timestamp,
            Self::DebtRepaid { timestamp, .. } => *timestamp,
            Self::UnstakeRequested { timestamp, .. } => *timestamp,
            Self::CollateralWithdrawn { timestamp, .. } => *timestamp,
            Self::LoanLiquidated { timestamp, .. } => *timestamp,
            Self::UncollateralizedLoss { timestamp, .. } => *timestamp,
            Self::RewardHarvested { timestamp, .. } => *timestamp,
            Self::VaultPaused { timestamp, .. } => *timestamp,
            Self::VaultUnpaused { timestamp, .. } => *timestamp,
            Self::GuardianAdded { timestamp, .. } => *timestamp,
            Self::GuardianRemoved { timestamp, .. } => *timestamp,
            Self::OracleUpdated { timestamp, .. } => *timestamp,
            Self::ConfigUpdated { timestamp, .. } => *timestamp,
            Self::TreasuryWithdrawal { timestamp, .. } => *timestamp,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<VaultEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (append to log)
    pub fn emit(&mut self, event: VaultEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<VaultEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&VaultEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_and_timestamp() {
        let event = VaultEvent::LoanCreated {
            owner: [1u8; 32],
            collateral_deposited: 100_000_000,
            debt_minted: 550_000_000,
            ltv_bps: 5500,
            guardian: None,
            timestamp: 1_700_000_000,
        };

        assert_eq!(event.event_type(), EventType::LoanCreated);
        assert_eq!(event.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_event_serialization() {
        let event = VaultEvent::LoanLiquidated {
            owner: [1u8; 32],
            liquidator: [2u8; 32],
            debt_repaid: 550_000_000,
            collateral_seized: 84_000_000,
            to_liquidator: 83_600_000,
            to_treasury: 400_000,
            timestamp: 1_700_000_100,
        };

        let bytes = event.to_bytes();
        let restored = VaultEvent::from_bytes(&bytes).unwrap();

        assert_eq!(event, restored);
    }

    #[test]
    fn test_event_log_filtering() {
        let mut log = EventLog::new();

        log.emit(VaultEvent::VaultPaused {
            by: [1u8; 32],
            timestamp: 10,
        });
        log.emit(VaultEvent::VaultUnpaused {
            by: [1u8; 32],
            timestamp: 20,
        });
        log.emit(VaultEvent::VaultPaused {
            by: [1u8; 32],
            timestamp: 30,
        });

        assert_eq!(log.len(), 3);
        assert!(log.has_events());
        assert_eq!(log.filter_by_type(EventType::VaultPaused).len(), 2);
        assert_eq!(log.filter_by_type(EventType::LoanCreated).len(), 0);
    }
}
