//! Token Custody Module
//!
//! Balance accounting for the collateral asset and the gUSD debt asset,
//! keyed by identity, with the vault pool and treasury as distinguished
//! holders. Mutating vault operations describe their token movements as a
//! batch of legs; the batch is validated in full before any leg is
//! applied, so a failing leg leaves every balance untouched.
//!
//! ## Key Features
//!
//! - **Two Asset Books**: collateral units and gUSD tracked separately
//! - **Atomic Batches**: all legs apply or none do
//! - **Supply Tracking**: cumulative mint/burn totals per asset
//! - **Uniform Failure**: every leg failure surfaces as `TransferFailed`

use crate::constants::token as token_config;
use crate::errors::{VaultError, VaultResult};
use crate::types::Identity;
use crate::Vec;

// ============================================================================
// Constants
// ============================================================================

/// Maximum gUSD supply (10 billion gUSD - fits in u64)
/// 10_000_000_000 * 1_000_000 = 10^16 < u64::MAX
pub const MAX_DEBT_SUPPLY: u64 = 10_000_000_000 * token_config::ONE;

/// Source identity reported for mint legs and sink for burn legs
pub const SUPPLY_IDENTITY: Identity = [0u8; 32];

// ============================================================================
// Types
// ============================================================================

/// Which asset book a leg operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    /// Yield-bearing collateral units
    Collateral,
    /// Synthetic debt token (gUSD)
    Debt,
}

/// A single token movement inside an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustodyLeg {
    /// Move balance between two holders
    Transfer {
        asset: Asset,
        from: Identity,
        to: Identity,
        amount: u64,
    },
    /// Create new units credited to a holder
    Mint {
        asset: Asset,
        to: Identity,
        amount: u64,
    },
    /// Destroy units debited from a holder
    Burn {
        asset: Asset,
        from: Identity,
        amount: u64,
    },
}

/// Balance entry for one holder
#[derive(Debug, Clone)]
pub struct Holding {
    /// Holder identity
    pub owner: Identity,
    /// Balance amount in smallest units
    pub balance: u64,
}

/// Per-asset balance book with supply counters
#[derive(Debug, Clone, Default)]
pub struct AssetBook {
    holdings: Vec<Holding>,
    /// Current outstanding supply
    pub total_supply: u64,
    /// Total minted (cumulative)
    pub total_minted: u64,
    /// Total burned (cumulative)
    pub total_burned: u64,
}

impl AssetBook {
    /// Balance of a holder (zero if unknown)
    pub fn balance_of(&self, owner: &Identity) -> u64 {
        self.holdings
            .iter()
            .find(|h| &h.owner == owner)
            .map(|h| h.balance)
            .unwrap_or(0)
    }

    /// Circulating supply (minted minus burned)
    pub fn circulating(&self) -> u64 {
        self.total_minted.saturating_sub(self.total_burned)
    }

    fn credit(&mut self, owner: Identity, amount: u64) -> VaultResult<()> {
        match self.holdings.iter_mut().find(|h| h.owner == owner) {
            Some(holding) => {
                holding.balance = holding
                    .balance
                    .checked_add(amount)
                    .ok_or(VaultError::Overflow)?;
            }
            None => {
                self.holdings.push(Holding {
                    owner,
                    balance: amount,
                });
            }
        }
        Ok(())
    }

    fn debit(&mut self, owner: &Identity, amount: u64) -> VaultResult<()> {
        let holding = self
            .holdings
            .iter_mut()
            .find(|h| &h.owner == owner)
            .ok_or(VaultError::InsufficientBalance {
                available: 0,
                requested: amount,
            })?;

        if holding.balance < amount {
            return Err(VaultError::InsufficientBalance {
                available: holding.balance,
                requested: amount,
            });
        }

        holding.balance -= amount;
        Ok(())
    }
}

/// Custody state: both asset books plus the vault pool identity
#[derive(Debug, Clone)]
pub struct Custody {
    vault_identity: Identity,
    /// Collateral asset book
    pub collateral: AssetBook,
    /// gUSD asset book
    pub debt: AssetBook,
}

// ============================================================================
// Custody Operations
// ============================================================================

impl Custody {
    /// Create custody with an empty book for each asset
    pub fn new(vault_identity: Identity) -> Self {
        Self {
            vault_identity,
            collateral: AssetBook::default(),
            debt: AssetBook::default(),
        }
    }

    /// Identity of the pooled collateral holder
    pub fn vault_identity(&self) -> Identity {
        self.vault_identity
    }

    /// Collateral held in the vault pool
    pub fn pooled_collateral(&self) -> u64 {
        self.collateral.balance_of(&self.vault_identity)
    }

    /// Execute a batch of legs atomically.
    ///
    /// The whole batch is validated against a scratch copy first; only if
    /// every leg passes is the state swapped in. Any failure is reported
    /// as `TransferFailed` naming the offending leg.
    pub fn execute(&mut self, legs: &[CustodyLeg]) -> VaultResult<()> {
        let mut preview = self.clone();
        for leg in legs {
            preview.apply(leg)?;
        }
        *self = preview;
        Ok(())
    }

    /// Host-side bridge for inbound external collateral.
    ///
    /// The engine never calls this from an operation; the hosting runtime
    /// (or a test) uses it to reflect tokens arriving in a holder's wallet.
    pub fn fund_collateral(&mut self, owner: Identity, amount: u64) -> VaultResult<()> {
        self.execute(&[CustodyLeg::Mint {
            asset: Asset::Collateral,
            to: owner,
            amount,
        }])
    }

    fn apply(&mut self, leg: &CustodyLeg) -> VaultResult<()> {
        match *leg {
            CustodyLeg::Transfer {
                asset,
                from,
                to,
                amount,
            } => {
                if amount == 0 {
                    return Err(transfer_failed(from, to, amount, "zero amount"));
                }
                if from == to {
                    return Err(transfer_failed(from, to, amount, "self transfer"));
                }
                let book = self.book_mut(asset);
                book.debit(&from, amount)
                    .map_err(|_| transfer_failed(from, to, amount, "insufficient balance"))?;
                book.credit(to, amount)
                    .map_err(|_| transfer_failed(from, to, amount, "balance overflow"))?;
                Ok(())
            }
            CustodyLeg::Mint { asset, to, amount } => {
                if amount == 0 {
                    return Err(transfer_failed(SUPPLY_IDENTITY, to, amount, "zero amount"));
                }
                let supply_cap = match asset {
                    Asset::Debt => MAX_DEBT_SUPPLY,
                    Asset::Collateral => u64::MAX,
                };
                let book = self.book_mut(asset);
                let new_supply = book
                    .total_supply
                    .checked_add(amount)
                    .filter(|s| *s <= supply_cap)
                    .ok_or_else(|| {
                        transfer_failed(SUPPLY_IDENTITY, to, amount, "supply overflow")
                    })?;
                book.credit(to, amount)
                    .map_err(|_| transfer_failed(SUPPLY_IDENTITY, to, amount, "balance overflow"))?;
                book.total_supply = new_supply;
                book.total_minted = book.total_minted.saturating_add(amount);
                Ok(())
            }
            CustodyLeg::Burn { asset, from, amount } => {
                if amount == 0 {
                    return Err(transfer_failed(from, SUPPLY_IDENTITY, amount, "zero amount"));
                }
                let book = self.book_mut(asset);
                book.debit(&from, amount).map_err(|_| {
                    transfer_failed(from, SUPPLY_IDENTITY, amount, "insufficient balance")
                })?;
                book.total_supply = book.total_supply.saturating_sub(amount);
                book.total_burned = book.total_burned.saturating_add(amount);
                Ok(())
            }
        }
    }

    fn book_mut(&mut self, asset: Asset) -> &mut AssetBook {
        match asset {
            Asset::Collateral => &mut self.collateral,
            Asset::Debt => &mut self.debt,
        }
    }
}

fn transfer_failed(from: Identity, to: Identity, amount: u64, reason: &'static str) -> VaultError {
    VaultError::TransferFailed {
        from,
        to,
        amount,
        reason,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_UNIT: u64 = 1_000_000;

    fn vault() -> Identity {
        [0xAAu8; 32]
    }

    fn alice() -> Identity {
        [1u8; 32]
    }

    fn bob() -> Identity {
        [2u8; 32]
    }

    fn funded_custody() -> Custody {
        let mut custody = Custody::new(vault());
        custody.fund_collateral(alice(), 1000 * ONE_UNIT).unwrap();
        custody
    }

    #[test]
    fn test_fund_and_balance() {
        let custody = funded_custody();

        assert_eq!(custody.collateral.balance_of(&alice()), 1000 * ONE_UNIT);
        assert_eq!(custody.collateral.balance_of(&bob()), 0);
        assert_eq!(custody.collateral.total_supply, 1000 * ONE_UNIT);
        assert_eq!(custody.pooled_collateral(), 0);
    }

    #[test]
    fn test_transfer_into_pool() {
        let mut custody = funded_custody();

        custody
            .execute(&[CustodyLeg::Transfer {
                asset: Asset::Collateral,
                from: alice(),
                to: vault(),
                amount: 100 * ONE_UNIT,
            }])
            .unwrap();

        assert_eq!(custody.collateral.balance_of(&alice()), 900 * ONE_UNIT);
        assert_eq!(custody.pooled_collateral(), 100 * ONE_UNIT);
        // Transfers do not change supply
        assert_eq!(custody.collateral.total_supply, 1000 * ONE_UNIT);
    }

    #[test]
    fn test_insufficient_balance_fails_whole_batch() {
        let mut custody = funded_custody();

        let result = custody.execute(&[
            CustodyLeg::Transfer {
                asset: Asset::Collateral,
                from: alice(),
                to: vault(),
                amount: 100 * ONE_UNIT,
            },
            CustodyLeg::Transfer {
                asset: Asset::Collateral,
                from: bob(),
                to: vault(),
                amount: 1,
            },
        ]);

        assert!(matches!(
            result,
            Err(VaultError::TransferFailed {
                reason: "insufficient balance",
                ..
            })
        ));
        // First leg must not have been applied
        assert_eq!(custody.collateral.balance_of(&alice()), 1000 * ONE_UNIT);
        assert_eq!(custody.pooled_collateral(), 0);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut custody = funded_custody();

        let result = custody.execute(&[CustodyLeg::Transfer {
            asset: Asset::Collateral,
            from: alice(),
            to: bob(),
            amount: 0,
        }]);

        assert!(matches!(
            result,
            Err(VaultError::TransferFailed {
                reason: "zero amount",
                ..
            })
        ));
    }

    #[test]
    fn test_self_transfer_rejected() {
        let mut custody = funded_custody();

        let result = custody.execute(&[CustodyLeg::Transfer {
            asset: Asset::Collateral,
            from: alice(),
            to: alice(),
            amount: ONE_UNIT,
        }]);

        assert!(matches!(
            result,
            Err(VaultError::TransferFailed {
                reason: "self transfer",
                ..
            })
        ));
    }

    #[test]
    fn test_mint_and_burn_debt() {
        let mut custody = Custody::new(vault());

        custody
            .execute(&[CustodyLeg::Mint {
                asset: Asset::Debt,
                to: alice(),
                amount: 550 * ONE_UNIT,
            }])
            .unwrap();

        assert_eq!(custody.debt.balance_of(&alice()), 550 * ONE_UNIT);
        assert_eq!(custody.debt.total_supply, 550 * ONE_UNIT);

        custody
            .execute(&[CustodyLeg::Burn {
                asset: Asset::Debt,
                from: alice(),
                amount: 200 * ONE_UNIT,
            }])
            .unwrap();

        assert_eq!(custody.debt.balance_of(&alice()), 350 * ONE_UNIT);
        assert_eq!(custody.debt.total_supply, 350 * ONE_UNIT);
        assert_eq!(custody.debt.total_minted, 550 * ONE_UNIT);
        assert_eq!(custody.debt.total_burned, 200 * ONE_UNIT);
        assert_eq!(custody.debt.circulating(), 350 * ONE_UNIT);
    }

    #[test]
    fn test_debt_supply_cap() {
        let mut custody = Custody::new(vault());

        custody
            .execute(&[CustodyLeg::Mint {
                asset: Asset::Debt,
                to: alice(),
                amount: MAX_DEBT_SUPPLY,
            }])
            .unwrap();

        let result = custody.execute(&[CustodyLeg::Mint {
            asset: Asset::Debt,
            to: bob(),
            amount: 1,
        }]);

        assert!(matches!(
            result,
            Err(VaultError::TransferFailed {
                reason: "supply overflow",
                ..
            })
        ));
        assert_eq!(custody.debt.total_supply, MAX_DEBT_SUPPLY);
    }

    #[test]
    fn test_multi_leg_batch_applies_together() {
        let mut custody = funded_custody();

        // Deposit-and-borrow shaped batch
        custody
            .execute(&[
                CustodyLeg::Transfer {
                    asset: Asset::Collateral,
                    from: alice(),
                    to: vault(),
                    amount: 100 * ONE_UNIT,
                },
                CustodyLeg::Mint {
                    asset: Asset::Debt,
                    to: alice(),
                    amount: 550 * ONE_UNIT,
                },
            ])
            .unwrap();

        assert_eq!(custody.pooled_collateral(), 100 * ONE_UNIT);
        assert_eq!(custody.debt.balance_of(&alice()), 550 * ONE_UNIT);
    }

    #[test]
    fn test_burn_more_than_held_fails() {
        let mut custody = Custody::new(vault());
        custody
            .execute(&[CustodyLeg::Mint {
                asset: Asset::Debt,
                to: alice(),
                amount: 100,
            }])
            .unwrap();

        let result = custody.execute(&[CustodyLeg::Burn {
            asset: Asset::Debt,
            from: alice(),
            amount: 101,
        }]);

        assert!(matches!(
            result,
            Err(VaultError::TransferFailed {
                reason: "insufficient balance",
                ..
            })
        ));
        assert_eq!(custody.debt.balance_of(&alice()), 100);
    }
}
