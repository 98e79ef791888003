use anchor_lang::prelude::*;

use crate::constants::MAX_POOLS;
use crate::error::StakingError;

/// Per-authority configuration, PDA `["state", authority]`.
#[account]
#[derive(Default, InitSpace)]
pub struct GlobalConfig {
    pub authority: Pubkey,
    pub reward_mint: Pubkey,

    /// Bumped on every administrative change to this authority's pools.
    pub config_version: u64,
    /// Index handed to the next pool created under this config.
    pub pool_count: u16,

    pub bump: u8,
}

impl GlobalConfig {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    /// Fails `AlreadyExists` once the config has been created.
    pub fn require_new(&self) -> Result<()> {
        require!(!self.is_initialized(), StakingError::AlreadyExists);
        Ok(())
    }

    pub fn next_pool_index(&self) -> Result<u8> {
        require!(self.pool_count < MAX_POOLS, StakingError::InvalidParameter);
        u8::try_from(self.pool_count).map_err(|_| error!(StakingError::ConversionOverflow))
    }

    pub fn bump_version(&mut self) -> Result<u64> {
        self.config_version = self
            .config_version
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        Ok(self.config_version)
    }

    /// Reserves the next pool index and returns it.
    pub fn register_pool(&mut self) -> Result<u8> {
        let index = self.next_pool_index()?;
        self.pool_count += 1;
        self.bump_version()?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_indexes_are_sequential_and_bounded() {
        let mut config = GlobalConfig {
            authority: Pubkey::new_unique(),
            ..Default::default()
        };
        assert_eq!(config.register_pool().unwrap(), 0);
        assert_eq!(config.register_pool().unwrap(), 1);
        assert_eq!(config.config_version, 2);

        config.pool_count = MAX_POOLS - 1;
        assert_eq!(config.register_pool().unwrap(), 255);
        assert!(config.register_pool().is_err());
        assert_eq!(config.pool_count, MAX_POOLS);
    }

    #[test]
    fn default_config_is_uninitialized() {
        assert!(!GlobalConfig::default().is_initialized());
        assert!(GlobalConfig::default().require_new().is_ok());
    }

    #[test]
    fn created_config_cannot_be_created_again() {
        let config = GlobalConfig {
            authority: Pubkey::new_unique(),
            ..Default::default()
        };
        let err = config.require_new().unwrap_err();
        assert_eq!(
            ProgramError::from(err),
            ProgramError::Custom(StakingError::AlreadyExists.into())
        );
    }
}
