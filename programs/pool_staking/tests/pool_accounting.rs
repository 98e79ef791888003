//! Multi-step accounting scenarios.
//!
//! Drives the pool engine the way the instruction handlers do and mirrors
//! every token movement on a simulated vault, checking custody invariants
//! after each step.

use anchor_lang::prelude::*;
use pool_staking::constants::{SECONDS_PER_DAY, SECONDS_PER_YEAR};
use pool_staking::error::StakingError;
use pool_staking::state::{FeePolicy, LockPolicy, Pool, PoolUpdate, UserPosition};

const DAY: i64 = SECONDS_PER_DAY;
const YEAR: i64 = SECONDS_PER_YEAR as i64;

fn assert_fails<T: std::fmt::Debug>(result: Result<T>, expected: StakingError) {
    let err: anchor_lang::error::Error = result.expect_err("operation should fail");
    assert_eq!(ProgramError::from(err), ProgramError::Custom(expected.into()));
}

/// A pool with its vault and the external balances of its users.
struct Ledger {
    pool: Pool,
    vault: u64,
    authority_wallet: u64,
    users: Vec<(UserPosition, u64)>,
}

impl Ledger {
    fn new(capacity: u64, numerator: u64, denominator: u64, lock: u64, fee: u16) -> Self {
        Pool::validate_parameters(capacity, numerator, denominator, fee).unwrap();
        let authority = Pubkey::new_unique();
        let pool = Pool {
            authority,
            funder: authority,
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            capacity,
            reward_rate_numerator: numerator,
            reward_rate_denominator: denominator,
            lock_duration_seconds: lock,
            fee_basis_points: fee,
            activated: true,
            ..Default::default()
        };
        Self {
            pool,
            vault: 0,
            authority_wallet: 10_000_000_000_000,
            users: Vec::new(),
        }
    }

    fn add_user(&mut self, wallet: u64) -> usize {
        let position = UserPosition {
            owner: Pubkey::new_unique(),
            pool: Pubkey::new_unique(),
            ..Default::default()
        };
        self.pool.add_staker().unwrap();
        self.users.push((position, wallet));
        self.users.len() - 1
    }

    fn fund(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(self.authority_wallet >= amount, StakingError::InsufficientFunds);
        self.pool.record_funding(amount, now)?;
        self.authority_wallet -= amount;
        self.vault += amount;
        self.check();
        Ok(())
    }

    fn stake(&mut self, user: usize, amount: u64, now: i64) -> Result<()> {
        let (position, wallet) = &mut self.users[user];
        require!(*wallet >= amount, StakingError::InsufficientFunds);
        self.pool.stake(position, amount, now)?;
        *wallet -= amount;
        self.vault += amount;
        self.check();
        Ok(())
    }

    fn unstake(&mut self, user: usize, amount: u64, now: i64) -> Result<u64> {
        let (position, wallet) = &mut self.users[user];
        let outcome = self.pool.unstake(position, amount, now)?;
        *wallet += outcome.payout;
        self.vault -= outcome.payout;
        self.check();
        Ok(outcome.payout)
    }

    fn harvest(&mut self, user: usize, now: i64) -> Result<u64> {
        let (position, wallet) = &mut self.users[user];
        let amount = self.pool.harvest(position, now)?;
        *wallet += amount;
        self.vault -= amount;
        self.check();
        Ok(amount)
    }

    fn withdraw(&mut self, amount: u64, now: i64) -> Result<()> {
        self.pool.reclaim(amount, self.vault, now)?;
        self.vault -= amount;
        self.authority_wallet += amount;
        self.check();
        Ok(())
    }

    fn check(&self) {
        let pool = &self.pool;
        assert!(pool.total_staked <= pool.capacity);
        assert!(pool.total_reward_paid <= pool.total_reward_allocated);
        assert!(pool.total_reward_allocated <= pool.total_reward_funded);
        assert!(self.vault >= pool.required_vault_balance().unwrap());

        let staked: u64 = self.users.iter().map(|(p, _)| p.staked_amount).sum();
        assert_eq!(staked, pool.total_staked);
    }
}

#[test]
fn unstake_before_lock_fails_then_returns_principal_minus_fee() {
    let lock = 30 * DAY as u64;
    let mut ledger = Ledger::new(100_000_000_000, 25, 1_000, lock, 10);
    let alice = ledger.add_user(1_000_000_000_000);

    ledger.fund(1_000_000_000_000, 0).unwrap();
    ledger.stake(alice, 1_000, 0).unwrap();

    assert_fails(ledger.unstake(alice, 1_000, 0), StakingError::LockActive);
    assert_fails(ledger.unstake(alice, 1_000, 30 * DAY - 1), StakingError::LockActive);

    let before = ledger.users[alice].1;
    let payout = ledger.unstake(alice, 1_000, 30 * DAY).unwrap();
    assert_eq!(payout, 999);
    assert_eq!(ledger.users[alice].1 - before, 999);
    assert_eq!(ledger.users[alice].0.staked_amount, 0);
}

#[test]
fn full_share_for_one_year_earns_the_annual_rate() {
    let mut ledger = Ledger::new(100_000_000_000, 25, 1_000, 30 * DAY as u64, 10);
    let alice = ledger.add_user(100_000_000_000);

    ledger.fund(1_000_000_000_000, 0).unwrap();
    ledger.stake(alice, 100_000_000_000, 0).unwrap();

    // 25/1000 of 100_000_000_000
    assert_eq!(ledger.harvest(alice, YEAR).unwrap(), 2_500_000_000);
}

#[test]
fn reward_is_bounded_by_funded_reserve() {
    let mut ledger = Ledger::new(100_000_000_000, 25, 1_000, 0, 0);
    let alice = ledger.add_user(100_000_000_000);

    ledger.fund(1_000_000, 0).unwrap();
    ledger.stake(alice, 100_000_000_000, 0).unwrap();

    assert_eq!(ledger.harvest(alice, YEAR).unwrap(), 1_000_000);
    assert_fails(ledger.harvest(alice, 2 * YEAR), StakingError::NothingToHarvest);

    // topping up resumes emission from the funding time only
    ledger.fund(500, 2 * YEAR).unwrap();
    assert_eq!(ledger.pool.claimable(&ledger.users[alice].0, 2 * YEAR).unwrap(), 0);
    assert_eq!(ledger.harvest(alice, 3 * YEAR).unwrap(), 500);
}

#[test]
fn stakers_split_rewards_by_share_and_time() {
    let mut ledger = Ledger::new(u64::MAX, 100, 1_000, 0, 0);
    let alice = ledger.add_user(1_000_000);
    let bob = ledger.add_user(1_000_000);

    ledger.fund(1_000_000, 0).unwrap();
    ledger.stake(alice, 300_000, 0).unwrap();
    ledger.stake(bob, 100_000, YEAR / 2).unwrap();

    // alice alone for half a year: 15_000
    // then 3:1 split of 20_000 for the second half
    assert_eq!(ledger.harvest(alice, YEAR).unwrap(), 15_000 + 15_000);
    assert_eq!(ledger.harvest(bob, YEAR).unwrap(), 5_000);
}

#[test]
fn double_harvest_pays_once() {
    let mut ledger = Ledger::new(1_000_000, 25, 1_000, 0, 0);
    let alice = ledger.add_user(1_000_000);
    ledger.fund(1_000_000, 0).unwrap();
    ledger.stake(alice, 1_000_000, 0).unwrap();

    let first = ledger.harvest(alice, 10 * DAY).unwrap();
    assert!(first > 0);
    assert_fails(ledger.harvest(alice, 10 * DAY), StakingError::NothingToHarvest);
    assert_eq!(ledger.users[alice].0.total_harvested, first);
}

#[test]
fn rate_update_applies_only_going_forward() {
    let mut ledger = Ledger::new(u64::MAX, 25, 1_000, 0, 0);
    let alice = ledger.add_user(1_000_000);
    ledger.fund(1_000_000, 0).unwrap();
    ledger.stake(alice, 1_000_000, 0).unwrap();

    let before = ledger.pool.claimable(&ledger.users[alice].0, YEAR / 2).unwrap();
    ledger
        .pool
        .apply_update(PoolUpdate::RewardRate { numerator: 0, denominator: 1 }, YEAR / 2)
        .unwrap();
    let after = ledger.pool.claimable(&ledger.users[alice].0, YEAR / 2).unwrap();
    assert_eq!(before, 12_500);
    assert_eq!(before, after);

    // zero rate: nothing more accrues
    assert_eq!(ledger.harvest(alice, YEAR).unwrap(), 12_500);
}

#[test]
fn authority_cannot_reclaim_what_stakers_are_owed() {
    let mut ledger = Ledger::new(u64::MAX, 25, 1_000, 0, 0);
    let alice = ledger.add_user(1_000_000);
    ledger.fund(10_000, 0).unwrap();
    ledger.stake(alice, 1_000_000, 0).unwrap();

    // a year allocates 10_000 (capped): nothing is reclaimable
    assert_fails(ledger.withdraw(1, YEAR), StakingError::VaultInvariantViolation);

    ledger.harvest(alice, YEAR).unwrap();
    assert_fails(ledger.withdraw(1, YEAR), StakingError::VaultInvariantViolation);
    assert_eq!(ledger.vault, 1_000_000);
}

#[test]
fn authority_fee_policy_makes_fees_reclaimable() {
    let mut ledger = Ledger::new(u64::MAX, 25, 1_000, 0, 100);
    ledger
        .pool
        .apply_update(PoolUpdate::FeePolicy(FeePolicy::Authority), 0)
        .unwrap();
    let alice = ledger.add_user(10_000);
    ledger.stake(alice, 10_000, 0).unwrap();
    assert_eq!(ledger.unstake(alice, 10_000, 0).unwrap(), 9_900);

    ledger.withdraw(100, 0).unwrap();
    assert_eq!(ledger.vault, 0);
    assert_fails(ledger.withdraw(1, 0), StakingError::VaultInvariantViolation);
}

#[test]
fn reserve_fee_policy_feeds_rewards() {
    let mut ledger = Ledger::new(u64::MAX, 1, 1, 0, 1_000);
    let alice = ledger.add_user(10_000);
    let bob = ledger.add_user(10_000);
    ledger.stake(alice, 10_000, 0).unwrap();
    ledger.stake(bob, 10_000, 0).unwrap();

    // alice leaves paying 1_000 into the reserve; bob alone earns it
    assert_eq!(ledger.unstake(alice, 10_000, 0).unwrap(), 9_000);
    assert_eq!(ledger.pool.total_reward_funded, 1_000);
    assert_eq!(ledger.harvest(bob, YEAR).unwrap(), 1_000);
    assert_fails(ledger.withdraw(1, YEAR), StakingError::VaultInvariantViolation);
}

#[test]
fn weighted_lock_policy_tracks_average_entry() {
    let lock = 10 * DAY as u64;
    let mut ledger = Ledger::new(u64::MAX, 25, 1_000, lock, 0);
    ledger
        .pool
        .apply_update(PoolUpdate::LockPolicy(LockPolicy::WeightedExtend), 0)
        .unwrap();
    let alice = ledger.add_user(1_000);
    ledger.stake(alice, 500, 0).unwrap();
    ledger.stake(alice, 500, 10 * DAY).unwrap();

    // average entry at day 5, unlocked at day 15
    assert_fails(ledger.unstake(alice, 1_000, 15 * DAY - 1), StakingError::LockActive);
    assert_eq!(ledger.unstake(alice, 1_000, 15 * DAY).unwrap(), 1_000);
}

#[test]
fn capacity_holds_across_users() {
    let mut ledger = Ledger::new(1_000, 25, 1_000, 0, 0);
    let alice = ledger.add_user(1_000);
    let bob = ledger.add_user(1_000);
    ledger.stake(alice, 700, 0).unwrap();
    assert_fails(ledger.stake(bob, 301, 0), StakingError::CapacityExceeded);
    ledger.stake(bob, 300, 0).unwrap();
    ledger.unstake(alice, 200, 1).unwrap();
    ledger.stake(bob, 200, 2).unwrap();
    assert_eq!(ledger.pool.total_staked, 1_000);
}

#[test]
fn random_operation_sequences_keep_invariants() {
    let mut ledger = Ledger::new(5_000_000, 80, 1_000, 3 * DAY as u64, 25);
    let users: Vec<usize> = (0..4).map(|_| ledger.add_user(2_000_000)).collect();
    ledger.fund(100_000, 0).unwrap();

    let mut stakes = vec![0u64; users.len()];
    let mut seed: u64 = 0x5eed_1234_abcd_0001;
    let mut next = move || {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        seed >> 33
    };

    let mut now = 0;
    for _ in 0..2_000 {
        now += (next() % (DAY as u64)) as i64;
        let user = users[(next() % users.len() as u64) as usize];
        match next() % 5 {
            0 | 1 => {
                let amount = next() % 300_000 + 1;
                if ledger.stake(user, amount, now).is_ok() {
                    stakes[user] += amount;
                }
            }
            2 => {
                let amount = next() % 300_000 + 1;
                if ledger.unstake(user, amount, now).is_ok() {
                    stakes[user] -= amount;
                }
            }
            3 => {
                let _ = ledger.harvest(user, now);
            }
            _ => {
                let _ = ledger.fund(next() % 10_000 + 1, now);
            }
        }
        assert_eq!(ledger.users[user].0.staked_amount, stakes[user]);
    }

    // everyone can still leave and collect
    now += 10 * DAY;
    for &user in &users {
        let staked = ledger.users[user].0.staked_amount;
        if staked > 0 {
            ledger.unstake(user, staked, now).unwrap();
        }
        let _ = ledger.harvest(user, now);
    }
    assert_eq!(ledger.pool.total_staked, 0);
}
