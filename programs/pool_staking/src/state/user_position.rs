use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::math;

/// A user's stake and reward state within one pool,
/// PDA `["user", pool, owner]`.
#[account]
#[derive(Default, InitSpace)]
pub struct UserPosition {
    pub owner: Pubkey,
    pub pool: Pubkey,

    pub staked_amount: u64,
    pub stake_timestamp: i64,

    /// `staked_amount * acc_per_share / PRECISION` at the last settlement.
    pub reward_debt: u128,
    /// Settled reward not yet harvested.
    pub accrued_reward: u64,
    pub total_harvested: u64,

    pub bump: u8,
}

impl UserPosition {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Fails `AlreadyExists` once the position has been created.
    pub fn require_new(&self) -> Result<()> {
        require!(!self.is_initialized(), StakingError::AlreadyExists);
        Ok(())
    }

    /// Both principal and unharvested reward have reached zero.
    pub fn is_empty(&self) -> bool {
        self.staked_amount == 0 && self.accrued_reward == 0
    }

    pub fn is_lock_ended(&self, now: i64, lock_duration_seconds: u64) -> Result<bool> {
        Ok(now >= math::unlock_time(self.stake_timestamp, lock_duration_seconds)?)
    }

    /// Reward earned since the last settlement at accumulator `acc_per_share`.
    pub fn pending_reward(&self, acc_per_share: u128) -> Result<u64> {
        let owed = math::accrued(self.staked_amount, acc_per_share)?;
        let pending = owed.saturating_sub(self.reward_debt);
        u64::try_from(pending).map_err(|_| error!(StakingError::ConversionOverflow))
    }

    /// Moves pending reward into `accrued_reward` and snapshots the debt.
    pub fn settle(&mut self, acc_per_share: u128) -> Result<u64> {
        let pending = self.pending_reward(acc_per_share)?;
        self.accrued_reward = self
            .accrued_reward
            .checked_add(pending)
            .ok_or(StakingError::MathOverflow)?;
        self.sync_debt(acc_per_share)?;
        Ok(pending)
    }

    pub fn sync_debt(&mut self, acc_per_share: u128) -> Result<()> {
        self.reward_debt = math::accrued(self.staked_amount, acc_per_share)?;
        Ok(())
    }
}
