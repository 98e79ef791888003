/// Update pool instruction handler.
///
/// Replaces a single pool parameter.
///
/// ## Security Guarantees
/// - Only the config authority can update its pools
/// - Accrual up to now is settled at the old parameters first

use anchor_lang::prelude::*;

use crate::authorization;
use crate::constants::*;
use crate::events::PoolUpdated;
use crate::state::{GlobalConfig, Pool, PoolUpdate};

/// Accounts required for pool updates.
#[derive(Accounts)]
#[instruction(update: PoolUpdate, pool_index: u8)]
pub struct UpdatePool<'info> {
    /// The config authority.
    pub authority: Signer<'info>,

    /// The authority's global config.
    #[account(
        mut,
        seeds = [STATE_SEED, config.authority.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The pool to modify.
    #[account(
        mut,
        seeds = [POOL_SEED, config.key().as_ref(), pool.mint.as_ref(), &[pool_index]],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> UpdatePool<'info> {
    pub fn validate(&self) -> Result<()> {
        authorization::require_authority(&self.config, Some(&self.pool), &self.authority.key())
    }
}

/// Apply one parameter change to a pool.
///
/// # Arguments
/// * `ctx` - UpdatePool accounts context
/// * `update` - The parameter and its new value
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<UpdatePool>, update: PoolUpdate) -> Result<()> {
    ctx.accounts.validate()?;

    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool;

    let acc_before = pool.acc_per_share;
    pool.apply_update(update, clock.unix_timestamp)?;

    let config_version = ctx.accounts.config.bump_version()?;
    pool.config_version = config_version;

    msg!("Pool {} updated: {:?}", pool.pool_index, update);
    msg!("Accumulator settled: {} -> {}", acc_before, pool.acc_per_share);
    msg!("Config version: {}", config_version);

    emit!(PoolUpdated {
        pool: pool.key(),
        update,
        config_version,
    });

    Ok(())
}
