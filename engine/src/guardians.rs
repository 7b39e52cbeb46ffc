//! Guardian Registry
//!
//! Guardians are whitelisted partner entities (wallets, frontends) that
//! route deposits into the vault and earn a commission share of harvest
//! fees for positions they originated. The registry is a small ordered
//! list managed by governance.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::constants::{fees, limits};
use crate::errors::{VaultError, VaultResult};
use crate::types::Identity;
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A whitelisted guardian entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct GuardianEntry {
    /// Guardian identity (receives commission payouts)
    pub identity: Identity,
    /// Display name, at most 32 bytes
    pub name: String,
    /// Commission share of harvest fees, in basis points
    pub commission_bps: u16,
}

/// Ordered whitelist of guardians, capacity-bounded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct GuardianRegistry {
    entries: Vec<GuardianEntry>,
}

impl GuardianRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a guardian to the whitelist.
    ///
    /// Validation order: commission bound, name length, duplicate scan,
    /// capacity. Insertion order is preserved.
    pub fn add(&mut self, identity: Identity, name: String, commission_bps: u16) -> VaultResult<()> {
        if commission_bps > fees::MAX_GUARDIAN_COMMISSION_BPS {
            return Err(VaultError::InvalidCommission {
                commission_bps,
                max_bps: fees::MAX_GUARDIAN_COMMISSION_BPS,
            });
        }

        if name.len() > limits::MAX_GUARDIAN_NAME_LEN {
            return Err(VaultError::GuardianNameTooLong {
                len: name.len(),
                max: limits::MAX_GUARDIAN_NAME_LEN,
            });
        }

        if self.entries.iter().any(|g| g.identity == identity) {
            return Err(VaultError::GuardianAlreadyWhitelisted { identity });
        }

        if self.entries.len() >= limits::MAX_GUARDIANS {
            return Err(VaultError::GuardianListFull {
                capacity: limits::MAX_GUARDIANS,
            });
        }

        self.entries.push(GuardianEntry {
            identity,
            name,
            commission_bps,
        });

        Ok(())
    }

    /// Remove a guardian, preserving the relative order of the rest
    pub fn remove(&mut self, identity: Identity) -> VaultResult<GuardianEntry> {
        let position = self
            .entries
            .iter()
            .position(|g| g.identity == identity)
            .ok_or(VaultError::GuardianNotFound { identity })?;

        Ok(self.entries.remove(position))
    }

    /// Look up a guardian by identity
    pub fn get(&self, identity: &Identity) -> Option<&GuardianEntry> {
        self.entries.iter().find(|g| &g.identity == identity)
    }

    /// Check whether an identity is whitelisted
    pub fn contains(&self, identity: &Identity) -> bool {
        self.entries.iter().any(|g| &g.identity == identity)
    }

    /// Commission rate for an optional attribution, in basis points.
    ///
    /// Returns 0 when the loan has no guardian or the guardian has since
    /// been removed from the whitelist.
    pub fn commission_bps_for(&self, guardian: Option<Identity>) -> u16 {
        guardian
            .and_then(|id| self.get(&id))
            .map(|g| g.commission_bps)
            .unwrap_or(0)
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[GuardianEntry] {
        &self.entries
    }

    /// Number of whitelisted guardians
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
