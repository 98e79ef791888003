//! Error types for the Pool Staking program.
//!
//! Every failure is raised before the instruction returns, so the runtime
//! discards the whole transaction and no partial state is observable.
//!
//! ## Error Code Ranges
//! - 6000-6002: Authorization and account validation errors
//! - 6003-6007: Parameter and pool state errors
//! - 6008-6010: Balance and custody errors
//! - 6011: Position lifecycle errors
//! - 6012-6013: Math errors

use anchor_lang::prelude::*;

/// Custom error codes for the Pool Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Authorization / Account Validation ==========
    /// [6000] Signer is not the principal this operation requires.
    #[msg("Unauthorized: signer does not match the required authority or owner")]
    Unauthorized,

    /// [6001] Referenced accounts are not consistent with each other.
    #[msg("Account mismatch: referenced accounts do not belong together")]
    AccountMismatch,

    /// [6002] The record being created already exists.
    #[msg("Account already exists")]
    AlreadyExists,

    // ========== Parameters / Pool State ==========
    /// [6003] An argument or configuration value is out of range.
    #[msg("Invalid parameter")]
    InvalidParameter,

    /// [6004] Stake would push the pool above its capacity.
    #[msg("Pool capacity exceeded")]
    CapacityExceeded,

    /// [6005] New stakes are rejected while the pool is deactivated.
    #[msg("Pool is deactivated")]
    PoolDeactivated,

    /// [6006] The lock window of the position has not elapsed.
    #[msg("Lock period is still active")]
    LockActive,

    /// [6007] The pool vault would no longer cover stakers' principal and rewards.
    #[msg("Withdrawal would break the vault coverage invariant")]
    VaultInvariantViolation,

    // ========== Balances / Custody ==========
    /// [6008] Unstake amount exceeds the staked balance of the position.
    #[msg("Insufficient staked balance for this operation")]
    InsufficientStake,

    /// [6009] Source token account cannot cover the transfer.
    #[msg("Insufficient funds in source token account")]
    InsufficientFunds,

    /// [6010] No reward has accrued for this position.
    #[msg("Nothing to harvest")]
    NothingToHarvest,

    // ========== Position Lifecycle ==========
    /// [6011] The user position account has not been created.
    #[msg("User position not found - call create_user first")]
    PositionNotFound,

    // ========== Math ==========
    /// [6012] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6013] Integer conversion failed (value out of range).
    #[msg("Integer conversion failed - value out of range")]
    ConversionOverflow,
}
