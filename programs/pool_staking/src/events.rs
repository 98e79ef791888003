use anchor_lang::prelude::*;

use crate::state::PoolUpdate;

#[event]
pub struct StateCreated {
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
}

#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub pool_index: u8,
    pub capacity: u64,
    pub reward_rate_numerator: u64,
    pub reward_rate_denominator: u64,
    pub lock_duration_seconds: u64,
    pub fee_basis_points: u16,
}

#[event]
pub struct PoolUpdated {
    pub pool: Pubkey,
    pub update: PoolUpdate,
    pub config_version: u64,
}

#[event]
pub struct RewardFunded {
    pub pool: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub total_reward_funded: u64,
}

#[event]
pub struct UserCreated {
    pub pool: Pubkey,
    pub position: Pubkey,
    pub owner: Pubkey,
}

#[event]
pub struct UserStaked {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct UserUnstaked {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub payout: u64,
    pub timestamp: i64,
}

#[event]
pub struct UserHarvested {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct ReserveWithdrawn {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub from_reserve: u64,
}
