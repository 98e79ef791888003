//! State structures for the Pool Staking program.
//!
//! This module defines all account structures used to store program state.

pub mod global_config;
pub mod pool;
pub mod user_position;

pub use global_config::*;
pub use pool::*;
pub use user_position::*;
