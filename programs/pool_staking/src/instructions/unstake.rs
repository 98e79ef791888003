//! Unstake instruction handler.
//!
//! Handles withdrawing staked principal from a pool once the lock window
//! has elapsed. The unstake fee stays in the vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authorization;
use crate::constants::*;
use crate::events::UserUnstaked;
use crate::state::Pool;
use crate::vault;

/// Accounts required for unstaking.
#[derive(Accounts)]
#[instruction(amount: u64, pool_index: u8)]
pub struct Unstake<'info> {
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

    /// Owner's token account receiving the principal.
    #[account(mut)]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// Pool vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

impl<'info> Unstake<'info> {
    pub fn validate(&self) -> Result<()> {
        let position = authorization::load_position(&self.position.to_account_info())?;
        let owner = self.owner.key();
        authorization::require_owner(&position, &owner)?;
        authorization::require_position_in_pool(&position, &self.pool.key())?;
        authorization::require_pool_accounts(&self.pool, &self.mint.key(), &self.vault.key())?;
        authorization::require_token_account(&self.owner_token_account, &owner, &self.pool.mint)
    }
}

/// Unstake tokens from the pool.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
/// * `amount` - Amount of principal to withdraw, fee included
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    ctx.accounts.validate()?;

    let clock = Clock::get()?;
    let position_info = ctx.accounts.position.to_account_info();
    let mut position = authorization::load_position(&position_info)?;

    let outcome = ctx
        .accounts
        .pool
        .unstake(&mut position, amount, clock.unix_timestamp)?;

    vault::transfer_out(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.owner_token_account,
        &ctx.accounts.pool,
        outcome.payout,
    )?;

    authorization::store_position(&position_info, &position)?;

    let pool = &ctx.accounts.pool;
    msg!("Unstaked {} tokens ({} fee, {} paid out)", amount, outcome.fee, outcome.payout);
    msg!("Remaining staked: {}", position.staked_amount);
    msg!("Accrued rewards: {} (+{})", position.accrued_reward, outcome.reward_settled);
    if position.is_empty() {
        msg!("Position is empty");
    }

    emit!(UserUnstaked {
        pool: pool.key(),
        owner: position.owner,
        amount,
        fee: outcome.fee,
        payout: outcome.payout,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
