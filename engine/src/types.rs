//! Core Types for the Guardian Vault Engine
//!
//! The persisted records of the vault: configuration, per-user loans,
//! treasury, and the aggregate state every operation works against.

use crate::constants::{fees, ltv};
use crate::errors::{VaultError, VaultResult};
use crate::guardians::GuardianRegistry;
use crate::ledger::PositionLedger;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for depositor/guardian/authority identities (32-byte key)
pub type Identity = [u8; 32];

/// Type alias for opaque oracle feed handles
pub type FeedHandle = [u8; 32];

// ============ Configuration ============

/// Vault parameters, mutated only through governance.
///
/// Every write path re-runs [`VaultConfig::validate`], so a config that
/// violates the threshold invariant can never reach the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct VaultConfig {
    /// Share of yield/liquidation proceeds routed to the treasury (bps)
    pub harvest_fee_bps: u16,
    /// Maximum borrowable fraction of collateral value (bps)
    pub base_ltv_bps: u16,
    /// Additional allowance on top of the base LTV at issuance time (bps)
    pub bonus_ltv_bps: u16,
    /// Seconds a position must sit still before liquidation or unstake
    pub liquidation_cooldown_secs: u32,
    /// LTV at or above which a position is liquidatable (bps)
    pub liquidation_threshold_bps: u16,
    /// Extra collateral seized beyond the debt value (bps)
    pub liquidation_penalty_bps: u16,
    /// Trusted oracle source for the collateral price
    pub price_feed: FeedHandle,
}

impl VaultConfig {
    /// Combined issuance allowance (base + bonus)
    pub fn total_ltv_bps(&self) -> u16 {
        self.base_ltv_bps.saturating_add(self.bonus_ltv_bps)
    }

    /// Checks every parameter bound and the threshold invariant.
    ///
    /// A threshold at or below base + bonus would make freshly opened
    /// positions immediately liquidatable, so it is rejected here, at
    /// write time, never discovered at liquidation time.
    pub fn validate(&self) -> VaultResult<()> {
        if self.base_ltv_bps > ltv::MAX_BASE_LTV_BPS {
            return Err(VaultError::ConfigInvariantViolated {
                field: "base_ltv_bps",
                value: self.base_ltv_bps as u64,
                limit: ltv::MAX_BASE_LTV_BPS as u64,
            });
        }

        let total = self.base_ltv_bps as u64 + self.bonus_ltv_bps as u64;
        if total > ltv::MAX_TOTAL_LTV_BPS as u64 {
            return Err(VaultError::ConfigInvariantViolated {
                field: "bonus_ltv_bps",
                value: total,
                limit: ltv::MAX_TOTAL_LTV_BPS as u64,
            });
        }

        if self.liquidation_threshold_bps as u64 <= total {
            return Err(VaultError::ConfigInvariantViolated {
                field: "liquidation_threshold_bps",
                value: self.liquidation_threshold_bps as u64,
                limit: total,
            });
        }

        if self.liquidation_threshold_bps > ltv::MAX_LIQUIDATION_THRESHOLD_BPS {
            return Err(VaultError::ConfigInvariantViolated {
                field: "liquidation_threshold_bps",
                value: self.liquidation_threshold_bps as u64,
                limit: ltv::MAX_LIQUIDATION_THRESHOLD_BPS as u64,
            });
        }

        if self.harvest_fee_bps > fees::MAX_HARVEST_FEE_BPS {
            return Err(VaultError::ConfigInvariantViolated {
                field: "harvest_fee_bps",
                value: self.harvest_fee_bps as u64,
                limit: fees::MAX_HARVEST_FEE_BPS as u64,
            });
        }

        if self.liquidation_penalty_bps > fees::MAX_LIQUIDATION_PENALTY_BPS {
            return Err(VaultError::ConfigInvariantViolated {
                field: "liquidation_penalty_bps",
                value: self.liquidation_penalty_bps as u64,
                limit: fees::MAX_LIQUIDATION_PENALTY_BPS as u64,
            });
        }

        Ok(())
    }
}

// ============ Position Record ============

/// Per-depositor loan record.
///
/// Created on first deposit and never deleted; a fully exited position is
/// zeroed in place. `collateral_amount == 0` implies `debt_amount == 0`
/// after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct UserLoan {
    /// Depositor identity this record belongs to
    pub owner: Identity,
    /// Collateral held in vault custody (smallest units)
    pub collateral_amount: u64,
    /// Synthetic debt outstanding (smallest units)
    pub debt_amount: u64,
    /// Creation timestamp (unix seconds)
    pub created_at: i64,
    /// Last ledger-mutating action (deposit, borrow, repay, liquidation)
    pub last_action_ts: i64,
    /// Yield accrual watermark
    pub last_harvest_ts: i64,
    /// Pending withdrawal request timestamp, 0 when none
    pub unstake_requested_at: i64,
    /// Guardian attributed for commission routing, if any
    pub guardian: Option<Identity>,
    /// LTV allowance that was applied at first borrow (bps)
    pub initial_ltv_bps: u16,
}

impl UserLoan {
    /// Creates an empty record for a first-time depositor
    pub fn new(owner: Identity, now: i64) -> Self {
        Self {
            owner,
            collateral_amount: 0,
            debt_amount: 0,
            created_at: now,
            last_action_ts: now,
            last_harvest_ts: now,
            unstake_requested_at: 0,
            guardian: None,
            initial_ltv_bps: 0,
        }
    }

    /// Returns true if the position holds neither collateral nor debt
    pub fn is_empty(&self) -> bool {
        self.collateral_amount == 0 && self.debt_amount == 0
    }

    /// Returns true if the record satisfies the zero-collateral invariant
    pub fn is_consistent(&self) -> bool {
        self.collateral_amount > 0 || self.debt_amount == 0
    }
}

// ============ Treasury ============

/// Protocol treasury, denominated in collateral smallest units.
///
/// Credits are append-only; the lifetime counter survives withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Treasury {
    /// Currently withdrawable balance
    pub balance: u64,
    /// Total fees ever accrued
    pub lifetime_accrued: u64,
}

impl Treasury {
    /// Credits harvested fees
    pub fn credit(&mut self, amount: u64) -> VaultResult<()> {
        self.balance = self.balance.checked_add(amount).ok_or(VaultError::Overflow)?;
        self.lifetime_accrued = self
            .lifetime_accrued
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        Ok(())
    }

    /// Debits a governance withdrawal
    pub fn debit(&mut self, amount: u64) -> VaultResult<()> {
        if amount > self.balance {
            return Err(VaultError::InsufficientBalance {
                available: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

// ============ Aggregate State ============

/// Every persisted record of the vault, as one aggregate.
///
/// The sub-records stay independently typed so a storage layer can place
/// them separately; operations take the aggregate so a single call is a
/// single atomic state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct VaultState {
    /// Governance authority for guardian/config/oracle/pause/treasury ops
    pub authority: Identity,
    /// Identity credited with treasury withdrawals in custody
    pub treasury_identity: Identity,
    /// Current parameters (snapshot-read by each operation)
    pub config: VaultConfig,
    /// Whitelisted guardians, insertion-ordered
    pub guardians: GuardianRegistry,
    /// Per-depositor loan records
    pub loans: PositionLedger,
    /// Accrued protocol fees
    pub treasury: Treasury,
    /// Blocks deposit/repay/liquidate/harvest/withdraw while set
    pub paused: bool,
    /// Sum of collateral across all loans (smallest units)
    pub total_collateral: u64,
    /// Sum of debt across all loans (smallest units)
    pub total_debt: u64,
}

impl VaultState {
    /// Creates the vault with a validated configuration.
    pub fn new(authority: Identity, treasury_identity: Identity, config: VaultConfig) -> VaultResult<Self> {
        if authority == [0u8; 32] {
            return Err(VaultError::InvalidAddress {
                reason: "authority cannot be zero address",
            });
        }
        if treasury_identity == [0u8; 32] {
            return Err(VaultError::InvalidAddress {
                reason: "treasury cannot be zero address",
            });
        }
        config.validate()?;

        Ok(Self {
            authority,
            treasury_identity,
            config,
            guardians: GuardianRegistry::new(),
            loans: PositionLedger::new(),
            treasury: Treasury::default(),
            paused: false,
            total_collateral: 0,
            total_debt: 0,
        })
    }

    /// Fails with `Unauthorized` unless the caller is the authority
    pub fn ensure_authority(&self, caller: &Identity) -> VaultResult<()> {
        if *caller != self.authority {
            return Err(VaultError::Unauthorized {
                expected: self.authority,
                actual: *caller,
            });
        }
        Ok(())
    }

    /// Fails with `Paused` while the vault is paused
    pub fn ensure_active(&self) -> VaultResult<()> {
        if self.paused {
            return Err(VaultError::Paused);
        }
        Ok(())
    }
}

// ============ Helper Functions ============

/// Derive a deterministic custody identity for a vault pool.
///
/// Hosts derive the pool address from the authority instead of picking
/// one, so the same deployment always lands on the same identity.
pub fn derive_vault_identity(authority: &Identity, nonce: u64) -> Identity {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(b"guardian-vault/pool");
    hasher.update(authority);
    hasher.update(nonce.to_le_bytes());
    let result = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&result);
    id
}
