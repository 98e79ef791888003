//! Checked fixed-point helpers for reward accrual.
//!
//! Every intermediate product is widened to `u128`; anything that can still
//! overflow surfaces as [`StakingError::MathOverflow`] instead of wrapping.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;

/// Seconds between two timestamps, zero if the clock went backwards.
pub fn elapsed_seconds(from: i64, to: i64) -> u64 {
    to.saturating_sub(from).max(0) as u64
}

/// Accumulator increase per staked unit over `elapsed` seconds at an
/// annualized `numerator / denominator` rate, scaled by [`PRECISION`]:
///
/// `numerator * elapsed * PRECISION / (denominator * SECONDS_PER_YEAR)`
///
/// Multiplied by the pool's total stake this is the reward the pool emits,
/// `total_staked * numerator * elapsed / (denominator * SECONDS_PER_YEAR)`.
pub fn reward_per_share(numerator: u64, denominator: u64, elapsed: u64) -> Result<u128> {
    require!(denominator > 0, StakingError::InvalidParameter);

    let scaled_denominator = (denominator as u128)
        .checked_mul(SECONDS_PER_YEAR as u128)
        .ok_or(StakingError::MathOverflow)?;

    let increment = (numerator as u128)
        .checked_mul(elapsed as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(PRECISION)
        .ok_or(StakingError::MathOverflow)?
        / scaled_denominator;

    Ok(increment)
}

/// Accumulator increase for distributing `emitted` over `total_staked`.
pub fn per_share(emitted: u64, total_staked: u64) -> Result<u128> {
    if total_staked == 0 {
        return Ok(0);
    }
    let increment = (emitted as u128)
        .checked_mul(PRECISION)
        .ok_or(StakingError::MathOverflow)?
        / total_staked as u128;
    Ok(increment)
}

/// Reward owed to `amount` staked units at accumulator value `acc_per_share`.
pub fn accrued(amount: u64, acc_per_share: u128) -> Result<u128> {
    let owed = (amount as u128)
        .checked_mul(acc_per_share)
        .ok_or(StakingError::MathOverflow)?
        / PRECISION;
    Ok(owed)
}

/// Fee charged on `amount` at `fee_basis_points`, rounded down.
pub fn fee(amount: u64, fee_basis_points: u16) -> Result<u64> {
    let fee = (amount as u128)
        .checked_mul(fee_basis_points as u128)
        .ok_or(StakingError::MathOverflow)?
        / BASIS_POINTS_DENOMINATOR as u128;
    u64::try_from(fee).map_err(|_| error!(StakingError::ConversionOverflow))
}

/// First instant at which a stake made at `stake_timestamp` may be withdrawn.
pub fn unlock_time(stake_timestamp: i64, lock_duration_seconds: u64) -> Result<i64> {
    let lock = i64::try_from(lock_duration_seconds).map_err(|_| StakingError::ConversionOverflow)?;
    stake_timestamp
        .checked_add(lock)
        .ok_or(error!(StakingError::MathOverflow))
}

/// Amount-weighted average of the existing stake timestamp and `now`.
pub fn weighted_timestamp(
    current_timestamp: i64,
    current_amount: u64,
    now: i64,
    added_amount: u64,
) -> Result<i64> {
    let total = (current_amount as i128)
        .checked_add(added_amount as i128)
        .ok_or(StakingError::MathOverflow)?;
    if total == 0 {
        return Ok(now);
    }

    let weighted = (current_timestamp as i128)
        .checked_mul(current_amount as i128)
        .ok_or(StakingError::MathOverflow)?
        .checked_add(
            (now as i128)
                .checked_mul(added_amount as i128)
                .ok_or(StakingError::MathOverflow)?,
        )
        .ok_or(StakingError::MathOverflow)?
        / total;

    i64::try_from(weighted).map_err(|_| error!(StakingError::ConversionOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_never_negative() {
        assert_eq!(elapsed_seconds(100, 50), 0);
        assert_eq!(elapsed_seconds(50, 100), 50);
    }

    #[test]
    fn one_year_accrual_matches_rate() {
        let increment = reward_per_share(25, 1_000, SECONDS_PER_YEAR).unwrap();
        assert_eq!(increment, 25 * PRECISION / 1_000);
        assert_eq!(accrued(1_000, increment).unwrap(), 25);
    }

    #[test]
    fn short_intervals_keep_sub_token_precision() {
        // a single second is far below one token but still moves the accumulator
        let increment = reward_per_share(25, 1_000, 1).unwrap();
        assert!(increment > 0);
        assert_eq!(accrued(1_000, increment).unwrap(), 0);
    }

    #[test]
    fn reward_per_share_rejects_zero_denominator() {
        assert!(reward_per_share(1, 0, 1).is_err());
    }

    #[test]
    fn reward_per_share_overflow_is_reported() {
        assert!(reward_per_share(u64::MAX, 1, u64::MAX).is_err());
    }

    #[test]
    fn per_share_and_accrued_agree() {
        let inc = per_share(25, 1_000).unwrap();
        assert_eq!(inc, 25 * PRECISION / 1_000);
        assert_eq!(accrued(1_000, inc).unwrap(), 25);
        assert_eq!(per_share(25, 0).unwrap(), 0);
    }

    #[test]
    fn fee_in_basis_points() {
        assert_eq!(fee(1_000, 10).unwrap(), 1);
        assert_eq!(fee(1_000, 250).unwrap(), 25);
        assert_eq!(fee(1_000, 0).unwrap(), 0);
        assert_eq!(fee(999, 10).unwrap(), 0);
        assert_eq!(fee(u64::MAX, 10_000).unwrap(), u64::MAX);
    }

    #[test]
    fn unlock_time_adds_lock() {
        assert_eq!(unlock_time(1_000, 30).unwrap(), 1_030);
        assert!(unlock_time(i64::MAX, 1).is_err());
        assert!(unlock_time(0, u64::MAX).is_err());
    }

    #[test]
    fn weighted_timestamp_is_pro_rata() {
        // 100 units at t=0, 100 more at t=1000 -> t=500
        assert_eq!(weighted_timestamp(0, 100, 1_000, 100).unwrap(), 500);
        // 300 old units dominate
        assert_eq!(weighted_timestamp(0, 300, 1_000, 100).unwrap(), 250);
        // empty position takes `now`
        assert_eq!(weighted_timestamp(42, 0, 1_000, 100).unwrap(), 1_000);
    }
}
