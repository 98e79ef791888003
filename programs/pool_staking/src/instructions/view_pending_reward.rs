//! Read-only reward query.

use anchor_lang::prelude::*;

use crate::authorization;
use crate::constants::*;
use crate::state::Pool;

/// Accounts required for viewing a position's reward.
#[derive(Accounts)]
#[instruction(pool_index: u8)]
pub struct ViewPendingReward<'info> {
    /// The pool.
    #[account(
        seeds = [POOL_SEED, pool.config.as_ref(), pool.mint.as_ref(), &[pool_index]],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Any position of the pool.
    /// CHECK: deserialized by `authorization::load_position`
    pub position: UncheckedAccount<'info>,
}

/// Reward the position could harvest right now. Does not mutate state.
pub fn handler(ctx: Context<ViewPendingReward>) -> Result<u64> {
    let clock = Clock::get()?;
    let position = authorization::load_position(&ctx.accounts.position.to_account_info())?;
    authorization::require_position_in_pool(&position, &ctx.accounts.pool.key())?;

    let claimable = ctx.accounts.pool.claimable(&position, clock.unix_timestamp)?;
    msg!("Claimable reward for {}: {}", position.owner, claimable);

    Ok(claimable)
}
