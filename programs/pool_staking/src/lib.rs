//! # Pool Staking Program
//!
//! A multi-pool staking program. An authority creates any number of pools
//! against its reward token; users stake into a pool, accrue rewards lazily
//! through a reward-per-share accumulator, and withdraw principal once the
//! pool's lock window has elapsed.
//!
//! ## Features
//! - Per-authority global config, up to 256 pools each
//! - O(1) reward settlement per instruction, no background accrual
//! - Emission capped by the funded reserve
//! - Unstake fee kept in the vault (reserve or authority surplus)
//! - Authority reclaim limited to funds owed to nobody
//! - Safe math with overflow protection

use anchor_lang::prelude::*;

declare_id!("6EwUPfH1Psu3GTqd1JaUnEDZUaSK84G5WNhFV7e4zR6E");

pub mod authorization;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod vault;

use instructions::*;
use state::PoolUpdate;

#[program]
pub mod pool_staking {
    use super::*;

    /// Creates the global config of the signing authority.
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the authority already has a config.
    pub fn create_state(ctx: Context<CreateState>) -> Result<()> {
        instructions::create_state::handler(ctx)
    }

    /// Creates a pool and its vault under the authority's config.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for pool creation
    /// * `capacity` - Maximum total stake
    /// * `reward_rate_numerator` - Annualized reward rate numerator
    /// * `reward_rate_denominator` - Annualized reward rate denominator
    /// * `lock_duration_seconds` - Minimum time a stake must remain
    /// * `fee_basis_points` - Fee charged on unstaked principal
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the config authority
    /// - Capacity or rate denominator is zero, or fee exceeds 10000 bp
    /// - Mint is not the config's reward mint
    pub fn create_pool(
        ctx: Context<CreatePool>,
        capacity: u64,
        reward_rate_numerator: u64,
        reward_rate_denominator: u64,
        lock_duration_seconds: u64,
        fee_basis_points: u16,
    ) -> Result<()> {
        instructions::create_pool::handler(
            ctx,
            capacity,
            reward_rate_numerator,
            reward_rate_denominator,
            lock_duration_seconds,
            fee_basis_points,
        )
    }

    /// Replaces one pool parameter, settling accrual at the old value first.
    ///
    /// # Errors
    /// Returns an error if the caller is not the authority or the new value
    /// is out of range.
    pub fn update_pool(ctx: Context<UpdatePool>, update: PoolUpdate, _pool_index: u8) -> Result<()> {
        instructions::update_pool::handler(ctx, update)
    }

    /// Deposits reward tokens into the pool vault.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is neither the authority nor the designated funder
    /// - Amount is zero
    /// - Funder balance is insufficient
    pub fn fund_reward_token(ctx: Context<FundRewardToken>, amount: u64, _pool_index: u8) -> Result<()> {
        instructions::fund_reward_token::handler(ctx, amount)
    }

    /// Opens the signer's position in a pool.
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the position was already created.
    pub fn create_user(ctx: Context<CreateUser>, _pool_index: u8) -> Result<()> {
        instructions::create_user::handler(ctx)
    }

    /// Stakes tokens into a pool.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Position does not exist or is not the signer's
    /// - Amount is zero or exceeds the remaining capacity
    /// - Pool is deactivated
    /// - Insufficient balance
    pub fn stake(ctx: Context<Stake>, amount: u64, _pool_index: u8) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Unstakes principal, minus the pool fee.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Lock period has not ended
    /// - Amount exceeds staked balance
    /// - Amount is zero
    pub fn unstake(ctx: Context<Unstake>, amount: u64, _pool_index: u8) -> Result<()> {
        instructions::unstake::handler(ctx, amount)
    }

    /// Pays out all accrued rewards without unstaking.
    ///
    /// # Errors
    /// Returns `NothingToHarvest` if no reward has accrued.
    pub fn harvest(ctx: Context<Harvest>, _pool_index: u8) -> Result<()> {
        instructions::harvest::handler(ctx)
    }

    /// Authority reclaim of vault surplus and unallocated reserve.
    ///
    /// # Errors
    /// Returns `VaultInvariantViolation` if the vault would no longer cover
    /// staked principal plus unpaid rewards.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64, _pool_index: u8) -> Result<()> {
        instructions::withdraw::handler(ctx, amount)
    }

    /// Returns the reward a position could harvest now.
    pub fn view_pending_reward(ctx: Context<ViewPendingReward>, _pool_index: u8) -> Result<u64> {
        instructions::view_pending_reward::handler(ctx)
    }
}
