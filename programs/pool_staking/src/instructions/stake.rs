//! Stake instruction handler.
//!
//! Handles depositing tokens into a pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authorization;
use crate::constants::*;
use crate::events::UserStaked;
use crate::state::Pool;
use crate::vault;

/// Accounts required for staking.
#[derive(Accounts)]
#[instruction(amount: u64, pool_index: u8)]
pub struct Stake<'info> {
    /// The position owner.
    pub owner: Signer<'info>,

    /// The pool.
    #[account(
        mut,
        seeds = [POOL_SEED, pool.config.as_ref(), pool.mint.as_ref(), &[pool_index]],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Owner's position, created beforehand by `create_user`.
    /// CHECK: deserialized by `authorization::load_position`
    #[account(
        mut,
        seeds = [USER_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: UncheckedAccount<'info>,

    /// The pool's token mint.
    pub mint: Account<'info, Mint>,

    /// Owner's token account funding the stake.
    #[account(mut)]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// Pool vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

impl<'info> Stake<'info> {
    pub fn validate(&self) -> Result<()> {
        let position = authorization::load_position(&self.position.to_account_info())?;
        let owner = self.owner.key();
        authorization::require_owner(&position, &owner)?;
        authorization::require_position_in_pool(&position, &self.pool.key())?;
        authorization::require_pool_accounts(&self.pool, &self.mint.key(), &self.vault.key())?;
        authorization::require_token_account(&self.owner_token_account, &owner, &self.pool.mint)
    }
}

/// Stake tokens into the pool.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Amount of tokens to stake
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    ctx.accounts.validate()?;

    let clock = Clock::get()?;
    let position_info = ctx.accounts.position.to_account_info();
    let mut position = authorization::load_position(&position_info)?;

    ctx.accounts
        .pool
        .stake(&mut position, amount, clock.unix_timestamp)?;

    vault::transfer_in(
        &ctx.accounts.token_program,
        &ctx.accounts.owner_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.owner,
        amount,
    )?;

    authorization::store_position(&position_info, &position)?;

    let pool = &ctx.accounts.pool;
    msg!("Staked {} tokens in pool {}", amount, pool.pool_index);
    msg!("Total staked by user: {}", position.staked_amount);
    msg!("Pool total staked: {} / {}", pool.total_staked, pool.capacity);

    emit!(UserStaked {
        pool: pool.key(),
        owner: position.owner,
        amount,
        staked_amount: position.staked_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
