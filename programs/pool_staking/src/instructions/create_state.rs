//! Create state instruction handler.
//!
//! Creates the per-authority global config that every pool of this
//! authority hangs off.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::*;
use crate::events::StateCreated;
use crate::state::GlobalConfig;

/// Accounts required for creating a global config.
#[derive(Accounts)]
pub struct CreateState<'info> {
    /// The authority that will administer every pool under this config.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The config account, one per authority.
    /// Re-issuing the instruction finds it initialized and fails.
    #[account(
        init_if_needed,
        payer = authority,
        space = GlobalConfig::LEN,
        seeds = [STATE_SEED, authority.key().as_ref()],
        bump
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The reward (and stake) token of this authority's pools.
    pub reward_mint: Account<'info, Mint>,

    /// System program.
    pub system_program: Program<'info, System>,
}

/// Initialize the global config.
///
/// # Arguments
/// * `ctx` - CreateState accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<CreateState>) -> Result<()> {
    let config = &mut ctx.accounts.config;

    config.require_new()?;

    config.authority = ctx.accounts.authority.key();
    config.reward_mint = ctx.accounts.reward_mint.key();
    config.config_version = 0;
    config.pool_count = 0;
    config.bump = ctx.bumps.config;

    msg!("Global config created");
    msg!("Authority: {}", config.authority);
    msg!("Reward mint: {}", config.reward_mint);

    emit!(StateCreated {
        authority: config.authority,
        reward_mint: config.reward_mint,
    });

    Ok(())
}
