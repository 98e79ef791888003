//! Capability and account-consistency checks.
//!
//! Each handler runs its accounts' `validate()` first, so a rejected caller
//! never reaches the accounting engine.
//!
//! ## Security Guarantees
//! - Admin operations require signer == recorded authority
//! - User operations require signer == position owner
//! - Vault, mint and position must belong to the named pool

use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::error::StakingError;
use crate::state::{GlobalConfig, Pool, UserPosition};

/// Signer must be the authority recorded on the config and on the pool.
pub fn require_authority(config: &GlobalConfig, pool: Option<&Pool>, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(config.authority, *signer, StakingError::Unauthorized);
    if let Some(pool) = pool {
        require_keys_eq!(pool.authority, config.authority, StakingError::AccountMismatch);
    }
    Ok(())
}

/// Signer must own the position.
pub fn require_owner(position: &UserPosition, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(position.owner, *signer, StakingError::Unauthorized);
    Ok(())
}

/// Signer must be the pool authority or its designated funder.
pub fn require_funder(pool: &Pool, signer: &Pubkey) -> Result<()> {
    require!(
        *signer == pool.authority || *signer == pool.funder,
        StakingError::Unauthorized
    );
    Ok(())
}

/// Pool was created under the config at `config_key`.
pub fn require_pool_in_config(config_key: &Pubkey, config: &GlobalConfig, pool: &Pool) -> Result<()> {
    require_keys_eq!(pool.config, *config_key, StakingError::AccountMismatch);
    require_keys_eq!(pool.authority, config.authority, StakingError::AccountMismatch);
    Ok(())
}

/// Mint and vault are the ones recorded on the pool.
pub fn require_pool_accounts(pool: &Pool, mint: &Pubkey, vault: &Pubkey) -> Result<()> {
    require_keys_eq!(pool.mint, *mint, StakingError::AccountMismatch);
    require_keys_eq!(pool.vault, *vault, StakingError::AccountMismatch);
    Ok(())
}

/// Position was created for `pool`.
pub fn require_position_in_pool(position: &UserPosition, pool: &Pubkey) -> Result<()> {
    require_keys_eq!(position.pool, *pool, StakingError::AccountMismatch);
    Ok(())
}

/// External token account is held by `owner` and denominated in `mint`.
pub fn require_token_account(account: &TokenAccount, owner: &Pubkey, mint: &Pubkey) -> Result<()> {
    require_keys_eq!(account.owner, *owner, StakingError::AccountMismatch);
    require_keys_eq!(account.mint, *mint, StakingError::AccountMismatch);
    Ok(())
}

/// Deserializes a user position, reporting a missing account as
/// `PositionNotFound` instead of a generic deserialization failure.
pub fn load_position(info: &AccountInfo) -> Result<UserPosition> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return err!(StakingError::PositionNotFound);
    }
    let data = info.try_borrow_data()?;
    let position = UserPosition::try_deserialize(&mut &data[..])?;
    require!(position.is_initialized(), StakingError::PositionNotFound);
    Ok(position)
}

/// Writes a position loaded with [`load_position`] back to its account.
pub fn store_position(info: &AccountInfo, position: &UserPosition) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    position.try_serialize(&mut writer)
}
