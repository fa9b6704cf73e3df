//! Persisted layout of a vault instance.
//!
//! Every field is a variant of [`DataKey`]. Keys serialize by variant name, so
//! the layout is a name → value mapping: a newer schema adds variants and
//! never renames, retypes or removes an existing one. [`LAYOUT`] records which
//! schema introduced each field and is the reference checked by the layout
//! tests.
//!
//! Instance storage holds contract-wide configuration and totals. Persistent
//! storage holds per-user entries.

use soroban_sdk::{contracttype, Address, Env};

use crate::error::VaultError;
use crate::revision::Revision;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    // schema 1
    Ledger,
    Admin(Address),
    AdminCount,
    DepositFeeBps,
    Balance(Address),
    TotalDeposits,
    Revision,
    SchemaVersion,
    // schema 2
    YieldRateBps,
    DepositsPaused,
    YieldIndex,
    IndexUpdatedAt,
    AccrualIndex(Address),
    UnclaimedYield(Address),
    // schema 3
    WithdrawalDelay,
    PendingWithdrawal(Address),
    TotalPending,
}

/// A delayed withdrawal waiting for its delay to pass.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    pub amount: i128,
    pub requested_at: u64,
}

/// One persisted field and the schema that introduced it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: u32,
}

/// Upper bound on the number of fields a vault instance may ever declare.
pub const SCHEMA_CAPACITY: u32 = 50;

/// Append-only field list. Entries are ordered by introducing schema.
pub const LAYOUT: &[Field] = &[
    Field { name: "Ledger", schema: 1 },
    Field { name: "Admin", schema: 1 },
    Field { name: "AdminCount", schema: 1 },
    Field { name: "DepositFeeBps", schema: 1 },
    Field { name: "Balance", schema: 1 },
    Field { name: "TotalDeposits", schema: 1 },
    Field { name: "Revision", schema: 1 },
    Field { name: "SchemaVersion", schema: 1 },
    Field { name: "YieldRateBps", schema: 2 },
    Field { name: "DepositsPaused", schema: 2 },
    Field { name: "YieldIndex", schema: 2 },
    Field { name: "IndexUpdatedAt", schema: 2 },
    Field { name: "AccrualIndex", schema: 2 },
    Field { name: "UnclaimedYield", schema: 2 },
    Field { name: "WithdrawalDelay", schema: 3 },
    Field { name: "PendingWithdrawal", schema: 3 },
    Field { name: "TotalPending", schema: 3 },
];

/// Number of fields declared by `schema` and every schema before it.
pub fn fields_in_schema(schema: u32) -> u32 {
    LAYOUT.iter().filter(|f| f.schema <= schema).count() as u32
}

/// Unused capacity left for future schemas once `schema` is applied.
pub fn reserved_gap(schema: u32) -> u32 {
    SCHEMA_CAPACITY.saturating_sub(fields_in_schema(schema))
}

// ── instance lifecycle ──────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Revision)
}

pub fn revision(env: &Env) -> Result<Revision, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Revision)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_revision(env: &Env, revision: Revision) {
    env.storage().instance().set(&DataKey::Revision, &revision);
}

pub fn schema_version(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::SchemaVersion)
        .unwrap_or(0)
}

pub fn set_schema_version(env: &Env, version: u32) {
    env.storage().instance().set(&DataKey::SchemaVersion, &version);
}

// ── schema 1 ────────────────────────────────────────────────────────────────

pub fn ledger(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Ledger)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_ledger(env: &Env, ledger: &Address) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
}

pub fn is_admin(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Admin(account.clone()))
        .unwrap_or(false)
}

pub fn set_admin(env: &Env, account: &Address, holds_role: bool) {
    let key = DataKey::Admin(account.clone());
    if holds_role {
        env.storage().persistent().set(&key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

pub fn admin_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::AdminCount)
        .unwrap_or(0)
}

pub fn set_admin_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::AdminCount, &count);
}

pub fn deposit_fee_bps(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::DepositFeeBps)
        .unwrap_or(0)
}

pub fn set_deposit_fee_bps(env: &Env, bps: u32) {
    env.storage().instance().set(&DataKey::DepositFeeBps, &bps);
}

pub fn balance(env: &Env, user: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(user.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, user: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(user.clone()), &amount);
}

pub fn total_deposits(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalDeposits)
        .unwrap_or(0)
}

pub fn set_total_deposits(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalDeposits, &total);
}

/// Adds `delta` (which may be negative) to both the user's balance and the
/// running total, keeping `sum(balances) == total_deposits`.
pub fn adjust_balance(env: &Env, user: &Address, delta: i128) -> Result<i128, VaultError> {
    let balance = balance(env, user)
        .checked_add(delta)
        .ok_or(VaultError::ArithmeticOverflow)?;
    if balance < 0 {
        return Err(VaultError::InsufficientBalance);
    }
    let total = total_deposits(env)
        .checked_add(delta)
        .ok_or(VaultError::ArithmeticOverflow)?;

    set_balance(env, user, balance);
    set_total_deposits(env, total);
    Ok(balance)
}

// ── schema 2 ────────────────────────────────────────────────────────────────

pub fn yield_rate_bps(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::YieldRateBps)
        .unwrap_or(0)
}

pub fn set_yield_rate_bps(env: &Env, bps: u32) {
    env.storage().instance().set(&DataKey::YieldRateBps, &bps);
}

pub fn deposits_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::DepositsPaused)
        .unwrap_or(false)
}

pub fn set_deposits_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::DepositsPaused, &paused);
}

/// Cumulative `rate_bps * seconds` since yield was switched on, as of
/// [`index_updated_at`].
pub fn yield_index(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::YieldIndex)
        .unwrap_or(0)
}

pub fn set_yield_index(env: &Env, index: i128) {
    env.storage().instance().set(&DataKey::YieldIndex, &index);
}

pub fn index_updated_at(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::IndexUpdatedAt)
        .unwrap_or(0)
}

pub fn set_index_updated_at(env: &Env, timestamp: u64) {
    env.storage()
        .instance()
        .set(&DataKey::IndexUpdatedAt, &timestamp);
}

/// Yield index at the user's last settlement. Balances carried over from V1
/// have none and start from zero, the index value when V2 was installed.
pub fn accrual_index(env: &Env, user: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::AccrualIndex(user.clone()))
        .unwrap_or(0)
}

pub fn set_accrual_index(env: &Env, user: &Address, index: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::AccrualIndex(user.clone()), &index);
}

pub fn unclaimed_yield(env: &Env, user: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::UnclaimedYield(user.clone()))
        .unwrap_or(0)
}

pub fn set_unclaimed_yield(env: &Env, user: &Address, amount: i128) {
    let key = DataKey::UnclaimedYield(user.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
    }
}

// ── schema 3 ────────────────────────────────────────────────────────────────

pub fn withdrawal_delay(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::WithdrawalDelay)
        .unwrap_or(0)
}

pub fn set_withdrawal_delay(env: &Env, seconds: u64) {
    env.storage().instance().set(&DataKey::WithdrawalDelay, &seconds);
}

pub fn pending_withdrawal(env: &Env, user: &Address) -> Option<WithdrawalRequest> {
    env.storage()
        .persistent()
        .get(&DataKey::PendingWithdrawal(user.clone()))
}

pub fn set_pending_withdrawal(env: &Env, user: &Address, request: &WithdrawalRequest) {
    env.storage()
        .persistent()
        .set(&DataKey::PendingWithdrawal(user.clone()), request);
}

pub fn clear_pending_withdrawal(env: &Env, user: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::PendingWithdrawal(user.clone()));
}

pub fn total_pending(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalPending)
        .unwrap_or(0)
}

pub fn set_total_pending(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalPending, &total);
}

/// Amount the vault owes users: available balances plus queued withdrawals.
pub fn liabilities(env: &Env) -> Result<i128, VaultError> {
    total_deposits(env)
        .checked_add(total_pending(env))
        .ok_or(VaultError::ArithmeticOverflow)
}
