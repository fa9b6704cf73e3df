//! Ledger core: fee-bearing deposits and instant withdrawals.
//!
//! Present in every revision. Later revisions wrap these functions with
//! their own pre-checks (pause, accrual settlement) rather than replacing
//! them, so the balance bookkeeping lives in exactly one place.

use soroban_sdk::{Address, Env};

use crate::error::VaultError;
use crate::events;
use crate::storage;
use crate::transfer;

/// Basis points in one whole.
pub const BPS_DENOMINATOR: i128 = 10_000;

pub const MAX_FEE_BPS: u32 = 10_000;

pub fn validate_fee(bps: u32) -> Result<(), VaultError> {
    if bps > MAX_FEE_BPS {
        return Err(VaultError::InvalidFee);
    }
    Ok(())
}

pub fn require_positive_amount(amount: i128) -> Result<(), VaultError> {
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    Ok(())
}

/// Splits a gross deposit into `(fee, net)`. The fee rounds down.
pub fn split_fee(amount: i128, fee_bps: u32) -> Result<(i128, i128), VaultError> {
    let fee = amount
        .checked_mul(fee_bps as i128)
        .ok_or(VaultError::ArithmeticOverflow)?
        / BPS_DENOMINATOR;
    Ok((fee, amount - fee))
}

/// Credits the net amount to `user`, then pulls the gross amount from their
/// wallet. Returns the net credit.
pub fn deposit(env: &Env, user: &Address, amount: i128) -> Result<i128, VaultError> {
    require_positive_amount(amount)?;
    let (fee, net) = split_fee(amount, storage::deposit_fee_bps(env))?;

    storage::adjust_balance(env, user, net)?;
    transfer::pull(env, user, amount)?;

    events::publish_deposit(env, user.clone(), amount, fee, net);
    Ok(net)
}

/// Debits `amount` from `user`, then sends it to them. Any amount outside
/// `1..=balance` is an `InsufficientBalance`.
pub fn withdraw(env: &Env, user: &Address, amount: i128) -> Result<(), VaultError> {
    if amount <= 0 || storage::balance(env, user) < amount {
        return Err(VaultError::InsufficientBalance);
    }

    storage::adjust_balance(env, user, -amount)?;
    transfer::push(env, user, amount)?;

    events::publish_withdraw(env, user.clone(), amount);
    Ok(())
}

pub fn set_deposit_fee(env: &Env, admin: &Address, bps: u32) -> Result<(), VaultError> {
    validate_fee(bps)?;
    let old = storage::deposit_fee_bps(env);
    storage::set_deposit_fee_bps(env, bps);

    events::publish_fee_set(env, admin.clone(), old, bps);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_rounds_down() {
        assert_eq!(split_fee(1_000, 500), Ok((50, 950)));
        assert_eq!(split_fee(19, 500), Ok((0, 19)));
        assert_eq!(split_fee(39, 500), Ok((1, 38)));
    }

    #[test]
    fn fee_bounds() {
        assert_eq!(split_fee(1_000, 0), Ok((0, 1_000)));
        assert_eq!(split_fee(1_000, 10_000), Ok((1_000, 0)));
        assert_eq!(validate_fee(10_000), Ok(()));
        assert_eq!(validate_fee(10_001), Err(VaultError::InvalidFee));
    }

    #[test]
    fn fee_overflow_is_reported() {
        assert_eq!(split_fee(i128::MAX, 2), Err(VaultError::ArithmeticOverflow));
    }
}
