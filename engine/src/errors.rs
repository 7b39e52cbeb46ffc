//! Error Types for the Guardian Vault Engine
//!
//! Typed, data-carrying errors so callers can tell apart a bad request,
//! a stale oracle, and a custody failure without string matching.

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

/// Main error enum for all vault engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    // ============ Authorization Errors ============
    /// Caller is not the governance authority (or the record owner)
    Unauthorized { expected: [u8; 32], actual: [u8; 32] },

    // ============ Configuration Errors ============
    /// A configuration write violated a parameter bound or the
    /// threshold > base + bonus invariant
    ConfigInvariantViolated {
        field: &'static str,
        value: u64,
        limit: u64,
    },

    /// Invalid address (e.g., zero address)
    InvalidAddress { reason: &'static str },

    // ============ Guardian Errors ============
    /// Commission exceeds the allowed maximum
    InvalidCommission { commission_bps: u16, max_bps: u16 },

    /// Guardian identity already present in the registry
    GuardianAlreadyWhitelisted { identity: [u8; 32] },

    /// Guardian identity not present in the registry
    GuardianNotFound { identity: [u8; 32] },

    /// Guardian display name exceeds the byte limit
    GuardianNameTooLong { len: usize, max: usize },

    /// Registry is at capacity
    GuardianListFull { capacity: usize },

    // ============ Oracle Errors ============
    /// Feed handle does not match the configured price feed
    InvalidFeed {
        expected: [u8; 32],
        actual: [u8; 32],
    },

    /// Feed reported a non-positive price
    InvalidPrice { price: i64 },

    /// Feed snapshot is older than the staleness bound
    StalePrice { age_secs: i64, max_age_secs: i64 },

    // ============ Amount Errors ============
    /// Invalid amount provided
    InvalidAmount { amount: u64, reason: AmountErrorReason },

    /// Insufficient balance for operation
    InsufficientBalance { available: u64, requested: u64 },

    // ============ Position Errors ============
    /// No loan record exists for the given owner
    PositionNotFound { owner: [u8; 32] },

    /// Requested debt exceeds the LTV-capped maximum
    ExceedsMaxBorrow { requested: u64, max_debt: u64 },

    /// Operation requires a debt-free position
    DebtOutstanding { remaining_debt: u64 },

    // ============ Liquidation / Cooldown Errors ============
    /// The configured cooldown has not elapsed yet
    CooldownActive {
        elapsed_secs: i64,
        required_secs: i64,
    },

    /// Position LTV is below the liquidation threshold
    NotLiquidatable {
        owner: [u8; 32],
        current_ltv_bps: u64,
    },

    // ============ Custody Errors ============
    /// Token custody leg failed; never masked by operation-specific errors
    TransferFailed {
        from: [u8; 32],
        to: [u8; 32],
        amount: u64,
        reason: &'static str,
    },

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Division by zero
    DivisionByZero,

    // ============ State Errors ============
    /// Vault is paused
    Paused,
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Amount is zero when non-zero required
    Zero,
    /// Amount exceeds maximum
    TooLarge,
    /// Amount below minimum
    TooSmall,
}

impl VaultError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "E001_UNAUTHORIZED",
            Self::ConfigInvariantViolated { .. } => "E010_CONFIG_INVARIANT",
            Self::InvalidAddress { .. } => "E011_INVALID_ADDRESS",
            Self::InvalidCommission { .. } => "E020_INVALID_COMMISSION",
            Self::GuardianAlreadyWhitelisted { .. } => "E021_GUARDIAN_EXISTS",
            Self::GuardianNotFound { .. } => "E022_GUARDIAN_NOT_FOUND",
            Self::GuardianNameTooLong { .. } => "E023_GUARDIAN_NAME_LEN",
            Self::GuardianListFull { .. } => "E024_GUARDIAN_LIST_FULL",
            Self::InvalidFeed { .. } => "E030_INVALID_FEED",
            Self::InvalidPrice { .. } => "E031_INVALID_PRICE",
            Self::StalePrice { .. } => "E032_STALE_PRICE",
            Self::InvalidAmount { .. } => "E040_INVALID_AMOUNT",
            Self::InsufficientBalance { .. } => "E041_INSUFFICIENT_BALANCE",
            Self::PositionNotFound { .. } => "E050_POSITION_NOT_FOUND",
            Self::ExceedsMaxBorrow { .. } => "E051_EXCEEDS_MAX_BORROW",
            Self::DebtOutstanding { .. } => "E052_DEBT_OUTSTANDING",
            Self::CooldownActive { .. } => "E060_COOLDOWN_ACTIVE",
            Self::NotLiquidatable { .. } => "E061_NOT_LIQUIDATABLE",
            Self::TransferFailed { .. } => "E070_TRANSFER_FAILED",
            Self::Overflow => "E080_OVERFLOW",
            Self::DivisionByZero => "E081_DIV_ZERO",
            Self::Paused => "E090_PAUSED",
        }
    }

    /// Returns true if this error is recoverable (caller can fix and retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::StalePrice { .. } => true,          // Wait for a feed update
            Self::CooldownActive { .. } => true,      // Wait out the cooldown
            Self::InsufficientBalance { .. } => true, // Get more funds
            Self::ExceedsMaxBorrow { .. } => true,    // Lower the request
            _ => false,
        }
    }
}
