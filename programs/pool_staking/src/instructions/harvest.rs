//! Harvest instruction handler.
//!
//! Pays out everything a position has earned without touching its stake.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authorization;
use crate::constants::*;
use crate::events::UserHarvested;
use crate::state::Pool;
use crate::vault;

/// Accounts required for harvesting.
#[derive(Accounts)]
#[instruction(pool_index: u8)]
pub struct Harvest<'info> {
    /// The position owner.
    pub owner: Signer<'info>,

    /// The pool.
    #[account(
        mut,
        seeds = [POOL_SEED, pool.config.as_ref(), pool.mint.as_ref(), &[pool_index]],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Owner's position.
    /// CHECK: deserialized by `authorization::load_position`
    #[account(
        mut,
        seeds = [USER_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: UncheckedAccount<'info>,

    /// The pool's token mint.
    pub mint: Account<'info, Mint>,

    /// Owner's token account receiving rewards.
    #[account(mut)]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// Pool vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

impl<'info> Harvest<'info> {
    pub fn validate(&self) -> Result<()> {
        let position = authorization::load_position(&self.position.to_account_info())?;
        let owner = self.owner.key();
        authorization::require_owner(&position, &owner)?;
        authorization::require_position_in_pool(&position, &self.pool.key())?;
        authorization::require_pool_accounts(&self.pool, &self.mint.key(), &self.vault.key())?;
        authorization::require_token_account(&self.owner_token_account, &owner, &self.pool.mint)
    }
}

/// Harvest accrued rewards.
///
/// # Arguments
/// * `ctx` - Harvest accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Harvest>) -> Result<()> {
    ctx.accounts.validate()?;

    let clock = Clock::get()?;
    let position_info = ctx.accounts.position.to_account_info();
    let mut position = authorization::load_position(&position_info)?;

    let amount = ctx
        .accounts
        .pool
        .harvest(&mut position, clock.unix_timestamp)?;

    vault::transfer_out(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.owner_token_account,
        &ctx.accounts.pool,
        amount,
    )?;

    authorization::store_position(&position_info, &position)?;

    let pool = &ctx.accounts.pool;
    msg!("Harvested {} reward tokens", amount);
    msg!("Total harvested by user: {}", position.total_harvested);
    msg!("Total paid from pool: {}", pool.total_reward_paid);

    emit!(UserHarvested {
        pool: pool.key(),
        owner: position.owner,
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
