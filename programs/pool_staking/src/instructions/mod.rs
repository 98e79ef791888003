//! Instruction handlers for the Pool Staking program.
//!
//! This module contains all instruction implementations.

pub mod create_pool;
pub mod create_state;
pub mod create_user;
pub mod fund_reward_token;
pub mod harvest;
pub mod stake;
pub mod unstake;
pub mod update_pool;
pub mod view_pending_reward;
pub mod withdraw;

pub use create_pool::*;
pub use create_state::*;
pub use create_user::*;
pub use fund_reward_token::*;
pub use harvest::*;
pub use stake::*;
pub use unstake::*;
pub use update_pool::*;
pub use view_pending_reward::*;
pub use withdraw::*;
