//! Yield accrual and the deposit pause, introduced with V2.
//!
//! Yield is simple interest at the annual rate in force while a balance was
//! held. A global index accumulates `rate_bps * seconds` and is flushed at
//! the old rate before every rate change, so a new rate only applies from the
//! moment it is set. Each user keeps a snapshot of the index; any change to
//! their balance first settles what accrued since the snapshot into
//! `UnclaimedYield` and moves the snapshot to the current index.

use soroban_sdk::{Address, Env};

use crate::error::VaultError;
use crate::events;
use crate::ledger::BPS_DENOMINATOR;
use crate::storage;
use crate::transfer;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// `rate_bps * elapsed`, the amount the yield index grows by over `elapsed`
/// seconds at a constant rate.
pub fn index_growth(rate_bps: u32, elapsed: u64) -> Result<i128, VaultError> {
    (rate_bps as i128)
        .checked_mul(elapsed as i128)
        .ok_or(VaultError::ArithmeticOverflow)
}

/// `floor(balance * index_delta / (10000 * SECONDS_PER_YEAR))`
pub fn compute_yield(balance: i128, index_delta: i128) -> Result<i128, VaultError> {
    if balance <= 0 || index_delta <= 0 {
        return Ok(0);
    }
    let numerator = balance
        .checked_mul(index_delta)
        .ok_or(VaultError::ArithmeticOverflow)?;
    Ok(numerator / (BPS_DENOMINATOR * SECONDS_PER_YEAR as i128))
}

/// Yield index as of now, without writing it.
pub fn current_index(env: &Env) -> Result<i128, VaultError> {
    let elapsed = env
        .ledger()
        .timestamp()
        .saturating_sub(storage::index_updated_at(env));
    storage::yield_index(env)
        .checked_add(index_growth(storage::yield_rate_bps(env), elapsed)?)
        .ok_or(VaultError::ArithmeticOverflow)
}

/// Folds the time elapsed at the current rate into the stored index.
pub fn flush_index(env: &Env) -> Result<i128, VaultError> {
    let index = current_index(env)?;
    storage::set_yield_index(env, index);
    storage::set_index_updated_at(env, env.ledger().timestamp());
    Ok(index)
}

fn owed_at(env: &Env, user: &Address, index: i128) -> Result<i128, VaultError> {
    let delta = index
        .checked_sub(storage::accrual_index(env, user))
        .ok_or(VaultError::ArithmeticOverflow)?;
    storage::unclaimed_yield(env, user)
        .checked_add(compute_yield(storage::balance(env, user), delta)?)
        .ok_or(VaultError::ArithmeticOverflow)
}

/// Settled plus not-yet-settled yield owed to `user` right now.
pub fn pending_yield(env: &Env, user: &Address) -> Result<i128, VaultError> {
    owed_at(env, user, current_index(env)?)
}

/// Books everything accrued so far and moves the user's snapshot to the
/// current index. Must run before any change to the user's balance.
pub fn settle(env: &Env, user: &Address) -> Result<i128, VaultError> {
    let index = current_index(env)?;
    let owed = owed_at(env, user, index)?;
    storage::set_unclaimed_yield(env, user, owed);
    storage::set_accrual_index(env, user, index);
    Ok(owed)
}

pub fn require_deposits_open(env: &Env) -> Result<(), VaultError> {
    if storage::deposits_paused(env) {
        return Err(VaultError::DepositsPaused);
    }
    Ok(())
}

/// Flushes the index at the old rate, then switches to `bps`.
pub fn set_yield_rate(env: &Env, admin: &Address, bps: u32) -> Result<(), VaultError> {
    flush_index(env)?;
    let old = storage::yield_rate_bps(env);
    storage::set_yield_rate_bps(env, bps);

    events::publish_yield_rate_set(env, admin.clone(), old, bps);
    Ok(())
}

pub fn set_deposits_paused(env: &Env, admin: &Address, paused: bool) -> Result<(), VaultError> {
    storage::set_deposits_paused(env, paused);

    events::publish_pause(env, admin.clone(), paused);
    Ok(())
}

/// Pays out everything owed to `user` from the vault float.
///
/// If the float cannot cover it the call fails and the snapshot move made
/// by `settle` is rolled back with it.
pub fn claim_yield(env: &Env, user: &Address) -> Result<i128, VaultError> {
    let owed = settle(env, user)?;
    if owed == 0 {
        return Ok(0);
    }

    storage::set_unclaimed_yield(env, user, 0);
    transfer::push_from_float(env, user, owed)?;

    events::publish_yield_claimed(env, user.clone(), owed);
    Ok(owed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i128 = SECONDS_PER_YEAR as i128;

    #[test]
    fn one_year_at_five_percent() {
        const UNIT: i128 = 10_000_000;
        assert_eq!(
            compute_yield(950 * UNIT, 500 * YEAR),
            Ok(47 * UNIT + UNIT / 2)
        );
    }

    #[test]
    fn partial_year_rounds_down() {
        // 1000 * 5% * (1/2 year) = 25
        assert_eq!(compute_yield(1_000, 500 * YEAR / 2), Ok(25));
        // 1000 * 5% * 1s is far below one unit
        assert_eq!(compute_yield(1_000, 500), Ok(0));
    }

    #[test]
    fn nothing_accrues_without_growth_or_balance() {
        assert_eq!(compute_yield(1_000, 0), Ok(0));
        assert_eq!(compute_yield(0, 500 * YEAR), Ok(0));
        assert_eq!(compute_yield(1_000, -1), Ok(0));
    }

    #[test]
    fn index_growth_is_rate_times_seconds() {
        assert_eq!(index_growth(500, SECONDS_PER_YEAR), Ok(500 * YEAR));
        assert_eq!(index_growth(0, SECONDS_PER_YEAR), Ok(0));
        assert_eq!(index_growth(u32::MAX, u64::MAX), Ok(u32::MAX as i128 * u64::MAX as i128));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            compute_yield(i128::MAX / 2, 10_000 * YEAR),
            Err(VaultError::ArithmeticOverflow)
        );
    }
}
