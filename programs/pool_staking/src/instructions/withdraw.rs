/// Withdraw instruction handler.
///
/// Lets the authority reclaim vault funds that are owed to nobody.
///
/// ## Security Guarantees
/// - Only the config authority can withdraw
/// - Staked principal and allocated-but-unpaid rewards are never reclaimable
/// - The vault keeps covering `total_staked + (funded - paid)` afterwards

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authorization;
use crate::constants::*;
use crate::events::ReserveWithdrawn;
use crate::state::{GlobalConfig, Pool};
use crate::vault;

/// Accounts required for an authority withdrawal.
#[derive(Accounts)]
#[instruction(amount: u64, pool_index: u8)]
pub struct Withdraw<'info> {
    /// The config authority.
    pub authority: Signer<'info>,

    /// The authority's global config.
    #[account(
        seeds = [STATE_SEED, config.authority.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The pool.
    #[account(
        mut,
        seeds = [POOL_SEED, config.key().as_ref(), pool.mint.as_ref(), &[pool_index]],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// The pool's token mint.
    pub mint: Account<'info, Mint>,

    /// Pool vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Authority's token account receiving the funds.
    #[account(mut)]
    pub authority_token_account: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

impl<'info> Withdraw<'info> {
    pub fn validate(&self) -> Result<()> {
        let authority = self.authority.key();
        authorization::require_authority(&self.config, Some(&self.pool), &authority)?;
        authorization::require_pool_accounts(&self.pool, &self.mint.key(), &self.vault.key())?;
        authorization::require_token_account(&self.authority_token_account, &authority, &self.pool.mint)
    }
}

/// Withdraw unowed funds from the pool vault.
///
/// # Arguments
/// * `ctx` - Withdraw accounts context
/// * `amount` - Amount of tokens to reclaim
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    ctx.accounts.validate()?;

    let clock = Clock::get()?;
    let vault_balance = vault::balance_of(&ctx.accounts.vault);

    let from_reserve = ctx
        .accounts
        .pool
        .reclaim(amount, vault_balance, clock.unix_timestamp)?;

    vault::transfer_out(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.authority_token_account,
        &ctx.accounts.pool,
        amount,
    )?;

    let pool = &ctx.accounts.pool;
    msg!("Authority withdrew {} tokens from pool {}", amount, pool.pool_index);
    msg!("Taken from unallocated reserve: {}", from_reserve);
    msg!("Remaining reward funded: {}", pool.total_reward_funded);

    emit!(ReserveWithdrawn {
        pool: pool.key(),
        authority: ctx.accounts.authority.key(),
        amount,
        from_reserve,
    });

    Ok(())
}
