//! Program constants for the Pool Staking program.
//!
//! PDA seeds, time periods and fixed-point scales shared by every pool.

/// Seed for deriving the per-authority global config PDA
pub const STATE_SEED: &[u8] = b"state";

/// Seed for deriving pool PDAs (followed by mint and pool index)
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for deriving the pool vault PDA
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for deriving user position PDAs
pub const USER_SEED: &[u8] = b"user";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Fixed-point scale of `Pool::acc_per_share`
pub const PRECISION: u128 = 1_000_000_000_000; // 10^12

/// Pool indexes are a single seed byte
pub const MAX_POOLS: u16 = 256;
