/// Fund reward token instruction handler.
///
/// Handles depositing reward tokens into the pool vault.
///
/// ## Security Guarantees
/// - Only the pool authority or its designated funder may fund
/// - Vault and mint must be the ones recorded on the pool

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authorization;
use crate::constants::*;
use crate::events::RewardFunded;
use crate::state::Pool;
use crate::vault;

/// Accounts required for funding rewards.
#[derive(Accounts)]
#[instruction(amount: u64, pool_index: u8)]
pub struct FundRewardToken<'info> {
    /// The authority or designated funder.
    #[account(mut)]
    pub funder: Signer<'info>,

    /// The pool being funded.
    #[account(
        mut,
        seeds = [POOL_SEED, pool.config.as_ref(), pool.mint.as_ref(), &[pool_index]],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// The pool's token mint.
    pub mint: Account<'info, Mint>,

    /// Funder's token account.
    #[account(mut)]
    pub funder_token_account: Account<'info, TokenAccount>,

    /// Pool vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

impl<'info> FundRewardToken<'info> {
    pub fn validate(&self) -> Result<()> {
        let funder = self.funder.key();
        authorization::require_funder(&self.pool, &funder)?;
        authorization::require_pool_accounts(&self.pool, &self.mint.key(), &self.vault.key())?;
        authorization::require_token_account(&self.funder_token_account, &funder, &self.pool.mint)
    }
}

/// Fund the pool's reward reserve.
///
/// # Arguments
/// * `ctx` - FundRewardToken accounts context
/// * `amount` - Amount of reward tokens to deposit
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<FundRewardToken>, amount: u64) -> Result<()> {
    ctx.accounts.validate()?;

    let clock = Clock::get()?;

    ctx.accounts
        .pool
        .record_funding(amount, clock.unix_timestamp)?;

    vault::transfer_in(
        &ctx.accounts.token_program,
        &ctx.accounts.funder_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.funder,
        amount,
    )?;

    // Reload vault to get updated balance
    ctx.accounts.vault.reload()?;
    let vault_balance = vault::balance_of(&ctx.accounts.vault);
    let pool = &ctx.accounts.pool;

    msg!("Pool {} funded with {} tokens", pool.pool_index, amount);
    msg!("Total reward funded: {}", pool.total_reward_funded);
    msg!("New vault balance: {}", vault_balance);
    msg!("Funder: {}", ctx.accounts.funder.key());

    emit!(RewardFunded {
        pool: pool.key(),
        funder: ctx.accounts.funder.key(),
        amount,
        total_reward_funded: pool.total_reward_funded,
    });

    Ok(())
}
