use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::math;
use crate::state::UserPosition;

/// Where the unstake fee ends up. The fee never leaves the vault.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum FeePolicy {
    /// Credited to the pool's reward reserve.
    #[default]
    Reserve,
    /// Left as vault surplus, reclaimable by the authority through `withdraw`.
    Authority,
}

/// How `stake_timestamp` moves when a position is topped up.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum LockPolicy {
    /// Every deposit restarts the lock window for the whole position.
    #[default]
    ResetOnStake,
    /// The timestamp moves to the amount-weighted average of old and new stake.
    WeightedExtend,
}

/// A single pool parameter change for `update_pool`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolUpdate {
    RewardRate { numerator: u64, denominator: u64 },
    LockDuration(u64),
    FeeBasisPoints(u16),
    Capacity(u64),
    FeePolicy(FeePolicy),
    LockPolicy(LockPolicy),
    Activated(bool),
    Funder(Pubkey),
}

/// Staking pool, PDA `["pool", config, mint, [pool_index]]`.
#[account]
#[derive(Default, InitSpace)]
pub struct Pool {
    pub authority: Pubkey,
    /// The `GlobalConfig` that handed out `pool_index`.
    pub config: Pubkey,
    pub funder: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub pool_index: u8,

    pub capacity: u64,
    pub reward_rate_numerator: u64,
    pub reward_rate_denominator: u64,
    pub lock_duration_seconds: u64,
    pub fee_basis_points: u16,
    pub fee_policy: FeePolicy,
    pub lock_policy: LockPolicy,
    pub activated: bool,

    pub total_staked: u64,
    pub total_reward_funded: u64,
    /// Reward already emitted into `acc_per_share`, paid or not.
    pub total_reward_allocated: u64,
    pub total_reward_paid: u64,
    pub total_fees_collected: u64,

    pub acc_per_share: u128,
    pub last_accrual_timestamp: i64,

    pub staker_count: u64,
    pub config_version: u64,
    pub created_at: i64,

    pub bump: u8,
    pub vault_bump: u8,
}

/// Outcome of advancing the accumulator to a given time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accrual {
    pub per_share: u128,
    pub emitted: u64,
}

/// Token movements an unstake asks the vault to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnstakeOutcome {
    pub payout: u64,
    pub fee: u64,
    pub reward_settled: u64,
}

impl Pool {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    pub fn validate_parameters(
        capacity: u64,
        reward_rate_numerator: u64,
        reward_rate_denominator: u64,
        fee_basis_points: u16,
    ) -> Result<()> {
        require!(capacity > 0, StakingError::InvalidParameter);
        require!(reward_rate_denominator > 0, StakingError::InvalidParameter);
        require!(
            fee_basis_points as u64 <= BASIS_POINTS_DENOMINATOR,
            StakingError::InvalidParameter
        );
        // a full year of accrual must stay representable
        math::reward_per_share(reward_rate_numerator, reward_rate_denominator, SECONDS_PER_YEAR)?;
        Ok(())
    }

    /// Reserve funded but not yet emitted to stakers.
    pub fn unallocated_reserve(&self) -> u64 {
        self.total_reward_funded
            .saturating_sub(self.total_reward_allocated)
    }

    /// Funded reward the vault still has to hold.
    pub fn outstanding_reward(&self) -> u64 {
        self.total_reward_funded.saturating_sub(self.total_reward_paid)
    }

    /// Lower bound on the vault balance: principal plus unpaid reward.
    pub fn required_vault_balance(&self) -> Result<u64> {
        self.total_staked
            .checked_add(self.outstanding_reward())
            .ok_or(error!(StakingError::MathOverflow))
    }

    /// Accumulator advance from `last_accrual_timestamp` to `now`, without
    /// touching state. Emission is capped at the unallocated reserve.
    ///
    /// An uncapped emission too large for u128 is necessarily above the
    /// reserve, so a long idle period settles to the cap instead of failing.
    pub fn accrual(&self, now: i64) -> Result<Accrual> {
        let elapsed = math::elapsed_seconds(self.last_accrual_timestamp, now);
        if elapsed == 0 || self.total_staked == 0 {
            return Ok(Accrual::default());
        }

        let reserve = self.unallocated_reserve();
        let uncapped = math::reward_per_share(
            self.reward_rate_numerator,
            self.reward_rate_denominator,
            elapsed,
        )
        .and_then(|per_share| Ok((per_share, math::accrued(self.total_staked, per_share)?)));

        match uncapped {
            Ok((per_share, emitted)) if emitted <= reserve as u128 => Ok(Accrual {
                per_share,
                emitted: emitted as u64,
            }),
            _ => Ok(Accrual {
                per_share: math::per_share(reserve, self.total_staked)?,
                emitted: reserve,
            }),
        }
    }

    /// Settles the accumulator up to `now` at the current rate.
    pub fn settle(&mut self, now: i64) -> Result<u64> {
        let accrual = self.accrual(now)?;

        self.acc_per_share = self
            .acc_per_share
            .checked_add(accrual.per_share)
            .ok_or(StakingError::MathOverflow)?;
        self.total_reward_allocated = self
            .total_reward_allocated
            .checked_add(accrual.emitted)
            .ok_or(StakingError::MathOverflow)?;
        if now > self.last_accrual_timestamp {
            self.last_accrual_timestamp = now;
        }

        Ok(accrual.emitted)
    }

    /// Applies one parameter change. Accrual up to `now` is settled at the
    /// old parameters first.
    pub fn apply_update(&mut self, update: PoolUpdate, now: i64) -> Result<()> {
        match update {
            PoolUpdate::RewardRate { numerator, denominator } => {
                Self::validate_parameters(self.capacity, numerator, denominator, self.fee_basis_points)?;
            }
            PoolUpdate::FeeBasisPoints(fee_basis_points) => {
                require!(
                    fee_basis_points as u64 <= BASIS_POINTS_DENOMINATOR,
                    StakingError::InvalidParameter
                );
            }
            PoolUpdate::Capacity(capacity) => {
                require!(
                    capacity > 0 && capacity >= self.total_staked,
                    StakingError::InvalidParameter
                );
            }
            PoolUpdate::LockDuration(lock_duration_seconds) => {
                require!(
                    i64::try_from(lock_duration_seconds).is_ok(),
                    StakingError::InvalidParameter
                );
            }
            PoolUpdate::Funder(funder) => {
                require!(funder != Pubkey::default(), StakingError::InvalidParameter);
            }
            PoolUpdate::FeePolicy(_) | PoolUpdate::LockPolicy(_) | PoolUpdate::Activated(_) => {}
        }

        self.settle(now)?;

        match update {
            PoolUpdate::RewardRate { numerator, denominator } => {
                self.reward_rate_numerator = numerator;
                self.reward_rate_denominator = denominator;
            }
            PoolUpdate::LockDuration(lock_duration_seconds) => {
                self.lock_duration_seconds = lock_duration_seconds;
            }
            PoolUpdate::FeeBasisPoints(fee_basis_points) => self.fee_basis_points = fee_basis_points,
            PoolUpdate::Capacity(capacity) => self.capacity = capacity,
            PoolUpdate::FeePolicy(policy) => self.fee_policy = policy,
            PoolUpdate::LockPolicy(policy) => self.lock_policy = policy,
            PoolUpdate::Activated(activated) => self.activated = activated,
            PoolUpdate::Funder(funder) => self.funder = funder,
        }

        Ok(())
    }

    /// Counts a newly created position.
    pub fn add_staker(&mut self) -> Result<u64> {
        self.staker_count = self
            .staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(self.staker_count)
    }

    /// Records `amount` of reward reserve deposited into the vault.
    pub fn record_funding(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, StakingError::InvalidParameter);
        let funded = self
            .total_reward_funded
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        // past periods stay capped by the reserve they actually had
        self.settle(now)?;
        self.total_reward_funded = funded;
        Ok(())
    }

    /// Books a deposit of `amount` into `position`.
    pub fn stake(&mut self, position: &mut UserPosition, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, StakingError::InvalidParameter);
        require!(self.activated, StakingError::PoolDeactivated);

        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        require!(total_staked <= self.capacity, StakingError::CapacityExceeded);
        let staked_amount = position
            .staked_amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        let stake_timestamp = match self.lock_policy {
            LockPolicy::ResetOnStake => now,
            LockPolicy::WeightedExtend => math::weighted_timestamp(
                position.stake_timestamp,
                position.staked_amount,
                now,
                amount,
            )?,
        };

        self.settle(now)?;
        position.settle(self.acc_per_share)?;

        position.staked_amount = staked_amount;
        position.stake_timestamp = stake_timestamp;
        position.sync_debt(self.acc_per_share)?;
        self.total_staked = total_staked;

        Ok(())
    }

    /// Books a withdrawal of `amount` principal from `position`.
    pub fn unstake(
        &mut self,
        position: &mut UserPosition,
        amount: u64,
        now: i64,
    ) -> Result<UnstakeOutcome> {
        require!(amount > 0, StakingError::InvalidParameter);
        require!(
            position.is_lock_ended(now, self.lock_duration_seconds)?,
            StakingError::LockActive
        );
        require!(
            amount <= position.staked_amount,
            StakingError::InsufficientStake
        );

        let fee = math::fee(amount, self.fee_basis_points)?;
        let payout = amount - fee;

        self.settle(now)?;
        let reward_settled = position.settle(self.acc_per_share)?;

        position.staked_amount -= amount;
        position.sync_debt(self.acc_per_share)?;
        self.total_staked -= amount;

        self.total_fees_collected = self
            .total_fees_collected
            .checked_add(fee)
            .ok_or(StakingError::MathOverflow)?;
        if self.fee_policy == FeePolicy::Reserve {
            self.total_reward_funded = self
                .total_reward_funded
                .checked_add(fee)
                .ok_or(StakingError::MathOverflow)?;
        }

        Ok(UnstakeOutcome {
            payout,
            fee,
            reward_settled,
        })
    }

    /// Reward `position` could harvest at `now`.
    ///
    /// Per-position rounding can leave the sum of claims a few units above
    /// what the pool emitted; that dust stays on the position until more
    /// reward is emitted.
    pub fn claimable(&self, position: &UserPosition, now: i64) -> Result<u64> {
        let accrual = self.accrual(now)?;
        let acc_per_share = self
            .acc_per_share
            .checked_add(accrual.per_share)
            .ok_or(StakingError::MathOverflow)?;
        let earned = position
            .accrued_reward
            .checked_add(position.pending_reward(acc_per_share)?)
            .ok_or(StakingError::MathOverflow)?;
        let payable = self
            .total_reward_allocated
            .saturating_add(accrual.emitted)
            .saturating_sub(self.total_reward_paid);
        Ok(earned.min(payable))
    }

    /// Books payment of what `position` can claim; returns the amount.
    pub fn harvest(&mut self, position: &mut UserPosition, now: i64) -> Result<u64> {
        let amount = self.claimable(position, now)?;
        require!(amount > 0, StakingError::NothingToHarvest);
        let total_reward_paid = self
            .total_reward_paid
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        let total_harvested = position
            .total_harvested
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.settle(now)?;
        position.settle(self.acc_per_share)?;

        position.accrued_reward = position
            .accrued_reward
            .checked_sub(amount)
            .ok_or(StakingError::MathOverflow)?;
        position.total_harvested = total_harvested;
        self.total_reward_paid = total_reward_paid;

        Ok(amount)
    }

    /// Books an authority reclaim of `amount` from a vault currently holding
    /// `vault_balance`. Surplus goes first, then unallocated reserve; returns
    /// the part taken out of the reserve.
    pub fn reclaim(&mut self, amount: u64, vault_balance: u64, now: i64) -> Result<u64> {
        require!(amount > 0, StakingError::InvalidParameter);

        let accrual = self.accrual(now)?;
        let unallocated = self.unallocated_reserve().saturating_sub(accrual.emitted);
        let surplus = vault_balance.saturating_sub(self.required_vault_balance()?);
        let from_reserve = amount.saturating_sub(surplus).min(unallocated);

        let remaining = vault_balance
            .checked_sub(amount)
            .ok_or(StakingError::VaultInvariantViolation)?;
        let required = self
            .required_vault_balance()?
            .checked_sub(from_reserve)
            .ok_or(StakingError::MathOverflow)?;
        require!(remaining >= required, StakingError::VaultInvariantViolation);

        self.settle(now)?;
        self.total_reward_funded -= from_reserve;

        Ok(from_reserve)
    }
}
