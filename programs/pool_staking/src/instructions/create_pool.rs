/// Create pool instruction handler.
///
/// Creates a staking pool and its custody vault under a global config.
///
/// ## Security Guarantees
/// - Only the config authority can create pools
/// - Vault is a PDA whose token authority is the pool PDA
/// - Pool mint is locked to the config's reward mint

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authorization;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolCreated;
use crate::state::{FeePolicy, GlobalConfig, LockPolicy, Pool};

/// Accounts required for pool creation.
#[derive(Accounts)]
pub struct CreatePool<'info> {
    /// The config authority.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The authority's global config; hands out the pool index.
    #[account(
        mut,
        seeds = [STATE_SEED, config.authority.as_ref()],
        bump = config.bump,
        constraint = config.pool_count < MAX_POOLS @ StakingError::InvalidParameter
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The stake/reward token mint.
    #[account(
        constraint = mint.key() == config.reward_mint @ StakingError::AccountMismatch
    )]
    pub mint: Account<'info, Mint>,

    /// The pool account to be created.
    #[account(
        init,
        payer = authority,
        space = Pool::LEN,
        seeds = [POOL_SEED, config.key().as_ref(), mint.key().as_ref(), &[config.pool_count as u8]],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// The vault that will hold both staked principal and reward reserve.
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = pool
    )]
    pub vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> CreatePool<'info> {
    pub fn validate(&self) -> Result<()> {
        authorization::require_authority(&self.config, None, &self.authority.key())
    }
}

/// Create a new staking pool.
///
/// # Arguments
/// * `ctx` - CreatePool accounts context
/// * `capacity` - Maximum total stake
/// * `reward_rate_numerator` - Annualized reward rate numerator
/// * `reward_rate_denominator` - Annualized reward rate denominator
/// * `lock_duration_seconds` - Minimum time a stake must stay
/// * `fee_basis_points` - Fee on unstaked principal
///
/// # Returns
/// Result indicating success or error
pub fn handler(
    ctx: Context<CreatePool>,
    capacity: u64,
    reward_rate_numerator: u64,
    reward_rate_denominator: u64,
    lock_duration_seconds: u64,
    fee_basis_points: u16,
) -> Result<()> {
    ctx.accounts.validate()?;

    Pool::validate_parameters(
        capacity,
        reward_rate_numerator,
        reward_rate_denominator,
        fee_basis_points,
    )?;
    require!(
        i64::try_from(lock_duration_seconds).is_ok(),
        StakingError::InvalidParameter
    );

    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;
    let pool_index = config.register_pool()?;

    let pool = &mut ctx.accounts.pool;
    pool.authority = config.authority;
    pool.config = config.key();
    pool.funder = config.authority;
    pool.mint = ctx.accounts.mint.key();
    pool.vault = ctx.accounts.vault.key();
    pool.pool_index = pool_index;
    pool.capacity = capacity;
    pool.reward_rate_numerator = reward_rate_numerator;
    pool.reward_rate_denominator = reward_rate_denominator;
    pool.lock_duration_seconds = lock_duration_seconds;
    pool.fee_basis_points = fee_basis_points;
    pool.fee_policy = FeePolicy::Reserve;
    pool.lock_policy = LockPolicy::ResetOnStake;
    pool.activated = true;
    pool.total_staked = 0;
    pool.total_reward_funded = 0;
    pool.total_reward_allocated = 0;
    pool.total_reward_paid = 0;
    pool.total_fees_collected = 0;
    pool.acc_per_share = 0;
    pool.last_accrual_timestamp = clock.unix_timestamp;
    pool.staker_count = 0;
    pool.config_version = config.config_version;
    pool.created_at = clock.unix_timestamp;

    // Store bumps for PDA verification in future instructions
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.vault;

    msg!("Pool {} created for mint {}", pool_index, pool.mint);
    msg!("Capacity: {}, lock: {}s, fee: {}bp", capacity, lock_duration_seconds, fee_basis_points);
    msg!("Reward rate: {}/{} per year", reward_rate_numerator, reward_rate_denominator);

    emit!(PoolCreated {
        pool: pool.key(),
        mint: pool.mint,
        pool_index,
        capacity,
        reward_rate_numerator,
        reward_rate_denominator,
        lock_duration_seconds,
        fee_basis_points,
    });

    Ok(())
}
