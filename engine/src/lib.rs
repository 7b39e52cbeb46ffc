//! Guardian Vault Engine
//!
//! Deterministic accounting core for a collateralized debt vault:
//! yield-bearing collateral goes in, synthetic gUSD debt comes out
//! against an oracle price, liquidation keeps positions solvent, and
//! harvested yield pays the protocol and its guardians.
//!
//! The engine is a pure state machine. Every operation is a single
//! atomic transition over [`types::VaultState`] plus a custody book:
//! validate, read the price, compute, move tokens, write the ledger.
//! Hosting runtimes provide the trusted clock and serialize conflicting
//! calls; nothing in here blocks or retries.
//!
//! ## Key Features
//!
//! - **Deposit & Borrow**: mint gUSD up to the configured LTV allowance,
//!   explicit or auto-max
//! - **Liquidation**: full liquidation at the threshold with a penalty
//!   bonus and treasury fee cut
//! - **Yield Harvest**: staking yield skims the protocol fee (guardian
//!   commission carved out) and self-repays debt
//! - **Two-Phase Withdrawal**: cooldown-gated exit for debt-free
//!   positions
//! - **Guardian Registry**: whitelisted partners earning commission on
//!   attributed positions
//! - **Governance Surface**: config/oracle rotation, pause control,
//!   treasury withdrawal, all authority-gated
//! - **Event Log**: append-only record of every mutation for off-engine
//!   indexing
//!
//! This crate is `no_std` compatible for constrained targets when built
//! without the `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export Vec for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::vec::Vec;

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod oracle;
pub mod events;
pub mod guardians;
pub mod ledger;
pub mod custody;
pub mod borrow;
pub mod liquidation;
pub mod harvest;
pub mod withdraw;
pub mod governance;


// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use types::*;
pub use math::*;
pub use oracle::*;
pub use events::*;
pub use guardians::*;
pub use ledger::*;
pub use custody::*;
pub use borrow::*;
pub use liquidation::*;
pub use harvest::*;
pub use withdraw::*;
pub use governance::*;
