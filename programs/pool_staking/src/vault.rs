//! Vault custody adapter.
//!
//! Every token movement into or out of a pool vault goes through here. The
//! vault's token authority is the pool PDA, so outbound transfers are signed
//! with the pool seeds and never by a human key.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::Pool;

/// Current token balance of a custody or user account.
pub fn balance_of(account: &TokenAccount) -> u64 {
    account.amount
}

/// `source` can cover a transfer of `amount`.
pub fn require_balance(source: &TokenAccount, amount: u64) -> Result<()> {
    require!(balance_of(source) >= amount, StakingError::InsufficientFunds);
    Ok(())
}

/// Moves `amount` from a caller-owned token account into the pool vault.
///
/// # Errors
/// `InsufficientFunds` if `from` holds less than `amount`.
pub fn transfer_in<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    require_balance(from, amount)?;

    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: vault.to_account_info(),
        authority: authority.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}

/// Moves `amount` out of the pool vault, signed by the pool PDA.
///
/// # Errors
/// `InsufficientFunds` if the vault holds less than `amount`.
pub fn transfer_out<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    pool: &Account<'info, Pool>,
    amount: u64,
) -> Result<()> {
    require_balance(vault, amount)?;

    let config = pool.config;
    let mint = pool.mint;
    let pool_index = [pool.pool_index];
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, config.as_ref(), mint.as_ref(), &pool_index, &bump];
    let signer_seeds = &[seeds];

    let cpi_accounts = Transfer {
        from: vault.to_account_info(),
        to: to.to_account_info(),
        authority: pool.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)
}
