//! Create user instruction handler.
//!
//! Opens the position record of one owner in one pool.

use anchor_lang::prelude::*;

use crate::authorization;
use crate::constants::*;
use crate::events::UserCreated;
use crate::state::{GlobalConfig, Pool, UserPosition};

/// Accounts required for creating a user position.
#[derive(Accounts)]
#[instruction(pool_index: u8)]
pub struct CreateUser<'info> {
    /// The position owner.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Global config of the pool's authority.
    #[account(
        seeds = [STATE_SEED, config.authority.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The pool to join.
    #[account(
        mut,
        seeds = [POOL_SEED, config.key().as_ref(), pool.mint.as_ref(), &[pool_index]],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// The position account. Re-issuing the instruction finds it
    /// initialized and fails.
    #[account(
        init_if_needed,
        payer = owner,
        space = UserPosition::LEN,
        seeds = [USER_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: Account<'info, UserPosition>,

    /// System program.
    pub system_program: Program<'info, System>,
}

impl<'info> CreateUser<'info> {
    pub fn validate(&self) -> Result<()> {
        authorization::require_pool_in_config(&self.config.key(), &self.config, &self.pool)
    }
}

/// Create a user position in a pool.
///
/// # Arguments
/// * `ctx` - CreateUser accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<CreateUser>) -> Result<()> {
    ctx.accounts.validate()?;

    let position = &mut ctx.accounts.position;
    let pool = &mut ctx.accounts.pool;

    position.require_new()?;

    position.owner = ctx.accounts.owner.key();
    position.pool = pool.key();
    position.staked_amount = 0;
    position.stake_timestamp = 0;
    position.reward_debt = 0;
    position.accrued_reward = 0;
    position.total_harvested = 0;
    position.bump = ctx.bumps.position;

    pool.add_staker()?;

    msg!("Position created for {} in pool {}", position.owner, pool.pool_index);
    msg!("Stakers in pool: {}", pool.staker_count);

    emit!(UserCreated {
        pool: pool.key(),
        position: position.key(),
        owner: position.owner,
    });

    Ok(())
}
