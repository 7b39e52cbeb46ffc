//! Engine Constants
//!
//! All magic numbers and configuration bounds for the guardian vault.
//!
//! # Network Configuration
//!
//! Use feature flags to compile for different networks:
//! - `mainnet` - Production values (strict staleness, no simulated yield)
//! - Default (no feature) - Testnet values (lenient staleness, simulated yield)
//!
//! ```toml
//! # For mainnet deployment:
//! guardian-vault-engine = { path = "...", features = ["mainnet"] }
//! ```

/// Synthetic Debt Asset Metadata
pub mod token {
    /// Token name
    pub const NAME: &str = "Guardian USD";
    /// Token symbol
    pub const SYMBOL: &str = "gUSD";
    /// Decimal places
    pub const DECIMALS: u8 = 6;
    /// One unit with decimals (1 gUSD = 1_000_000 base units)
    pub const ONE: u64 = 1_000_000;
}

/// Collateral Asset Parameters
pub mod collateral {
    /// Decimal places of the staked collateral asset
    pub const DECIMALS: u8 = 6;
    /// One unit with decimals
    pub const ONE: u64 = 1_000_000;
}

/// LTV Bounds (basis points, enforced at configuration-write time)
pub mod ltv {
    /// Maximum base LTV (80%)
    pub const MAX_BASE_LTV_BPS: u16 = 8_000;

    /// Maximum base + bonus LTV (90%)
    pub const MAX_TOTAL_LTV_BPS: u16 = 9_000;

    /// Maximum liquidation threshold (95%)
    pub const MAX_LIQUIDATION_THRESHOLD_BPS: u16 = 9_500;
}

/// Fee Configuration (basis points, 100 = 1%)
pub mod fees {
    /// Basis points denominator
    pub const BPS_DENOMINATOR: u64 = 10_000;

    /// Maximum harvest fee (20%)
    pub const MAX_HARVEST_FEE_BPS: u16 = 2_000;

    /// Maximum liquidation penalty (15%)
    pub const MAX_LIQUIDATION_PENALTY_BPS: u16 = 1_500;

    /// Maximum guardian commission (7%)
    pub const MAX_GUARDIAN_COMMISSION_BPS: u16 = 700;
}

/// Registry Limits
pub mod limits {
    /// Maximum number of whitelisted guardians
    pub const MAX_GUARDIANS: usize = 10;

    /// Maximum guardian display-name length in bytes
    pub const MAX_GUARDIAN_NAME_LEN: usize = 32;

    /// Helper to check if running in mainnet mode
    #[cfg(feature = "mainnet")]
    pub const IS_MAINNET: bool = true;
    #[cfg(not(feature = "mainnet"))]
    pub const IS_MAINNET: bool = false;
}

/// Oracle Configuration
pub mod oracle {
    /// Maximum feed age in seconds before considered stale
    /// - Mainnet: 60 s (tight bound against price manipulation)
    /// - Testnet: 300 s (devnet feeds update slowly)
    #[cfg(feature = "mainnet")]
    pub const MAX_PRICE_AGE_SECS: i64 = 60;
    #[cfg(not(feature = "mainnet"))]
    pub const MAX_PRICE_AGE_SECS: i64 = 300;
}

/// Value Precision
pub mod precision {
    /// Decimal places of USD values produced by the valuation math
    pub const VALUE_DECIMALS: u8 = 6;

    /// One dollar in value units
    pub const ONE_USD: u64 = 1_000_000;
}

/// Staking Yield Simulation
pub mod staking {
    /// Annual yield applied by harvest, in basis points
    /// - Mainnet: 0 (rewards enter through the staking program itself)
    /// - Testnet: 700 (7% APY simulation)
    #[cfg(feature = "mainnet")]
    pub const SIM_APY_BPS: u64 = 0;
    #[cfg(not(feature = "mainnet"))]
    pub const SIM_APY_BPS: u64 = 700;
}

/// Time-related constants (i64 to match unix timestamps)
pub mod time {
    /// Seconds per year (365 days)
    pub const SECONDS_PER_YEAR: i64 = 31_536_000;

    /// Seconds per day
    pub const SECONDS_PER_DAY: i64 = 86_400;
}
