//! Two-phase withdrawals and the emergency exit, introduced with V3.
//!
//! A request moves the amount out of the user's available balance at once
//! and parks it in `PendingWithdrawal` (counted in `TotalPending`) until the
//! delay passes. The emergency exit pays out the available balance with no
//! delay and leaves a parked request alone.

use soroban_sdk::{Address, Env};

use crate::accrual;
use crate::error::VaultError;
use crate::events;
use crate::ledger;
use crate::storage::{self, WithdrawalRequest};
use crate::transfer;

pub fn set_withdrawal_delay(env: &Env, admin: &Address, seconds: u64) -> Result<(), VaultError> {
    let old = storage::withdrawal_delay(env);
    storage::set_withdrawal_delay(env, seconds);

    events::publish_delay_set(env, admin.clone(), old, seconds);
    Ok(())
}

pub fn request_withdrawal(env: &Env, user: &Address, amount: i128) -> Result<(), VaultError> {
    ledger::require_positive_amount(amount)?;
    if storage::pending_withdrawal(env, user).is_some() {
        return Err(VaultError::PendingRequestExists);
    }
    if storage::balance(env, user) < amount {
        return Err(VaultError::InsufficientBalance);
    }

    accrual::settle(env, user)?;
    storage::adjust_balance(env, user, -amount)?;

    let total_pending = storage::total_pending(env)
        .checked_add(amount)
        .ok_or(VaultError::ArithmeticOverflow)?;
    storage::set_total_pending(env, total_pending);

    let requested_at = env.ledger().timestamp();
    storage::set_pending_withdrawal(env, user, &WithdrawalRequest { amount, requested_at });

    events::publish_withdrawal_requested(env, user.clone(), amount, requested_at);
    Ok(())
}

pub fn execute_withdrawal(env: &Env, user: &Address) -> Result<i128, VaultError> {
    let request = storage::pending_withdrawal(env, user).ok_or(VaultError::NoPendingRequest)?;

    let waited = env.ledger().timestamp().saturating_sub(request.requested_at);
    if waited < storage::withdrawal_delay(env) {
        return Err(VaultError::DelayNotElapsed);
    }

    let total_pending = storage::total_pending(env)
        .checked_sub(request.amount)
        .ok_or(VaultError::ArithmeticOverflow)?;
    storage::clear_pending_withdrawal(env, user);
    storage::set_total_pending(env, total_pending);
    transfer::push(env, user, request.amount)?;

    events::publish_withdrawal_executed(env, user.clone(), request.amount);
    Ok(request.amount)
}

/// Pays out the whole available balance immediately, regardless of the
/// withdrawal delay or the deposit pause.
pub fn emergency_withdraw(env: &Env, user: &Address) -> Result<i128, VaultError> {
    let available = storage::balance(env, user);
    if available <= 0 {
        return Err(VaultError::InsufficientBalance);
    }

    accrual::settle(env, user)?;
    storage::adjust_balance(env, user, -available)?;
    transfer::push(env, user, available)?;

    events::publish_emergency_withdraw(env, user.clone(), available);
    Ok(available)
}

/// `(amount, requested_at)`, or `(0, 0)` when nothing is pending.
pub fn withdrawal_request(env: &Env, user: &Address) -> (i128, u64) {
    storage::pending_withdrawal(env, user)
        .map(|r| (r.amount, r.requested_at))
        .unwrap_or((0, 0))
}
