//! Contract events.
//!
//! Each state-changing entry point publishes exactly one event under a short
//! symbol topic. Off-chain indexers rebuild balances and the upgrade history
//! from these; failed calls are rolled back and publish nothing.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::revision::Revision;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub ledger: Address,
    pub admin: Address,
    pub deposit_fee_bps: u32,
}

/// Emitted when a user deposits. `amount` is what left the user's wallet,
/// `net` is what was credited after the fee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub amount: i128,
    pub fee: i128,
    pub net: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub amount: i128,
}

/// Emitted for fee and yield-rate changes alike; the topic tells them apart.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateUpdatedEvent {
    pub admin: Address,
    pub old_bps: u32,
    pub new_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    /// True if deposits are now paused, false if unpaused
    pub paused: bool,
    pub caller: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldClaimedEvent {
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelayUpdatedEvent {
    pub admin: Address,
    pub old_seconds: u64,
    pub new_seconds: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequestedEvent {
    pub user: Address,
    pub amount: i128,
    pub requested_at: u64,
}

/// Emitted by both `execute_withdrawal` and `emergency_withdraw`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalPaidEvent {
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub admin: Address,
    pub from: Revision,
    pub to: Revision,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub admin: Address,
    pub account: Address,
}

pub fn publish_initialized(env: &Env, ledger: Address, admin: Address, deposit_fee_bps: u32) {
    env.events().publish(
        (symbol_short!("init"),),
        InitializedEvent { ledger, admin, deposit_fee_bps },
    );
}

pub fn publish_deposit(env: &Env, user: Address, amount: i128, fee: i128, net: i128) {
    env.events().publish(
        (symbol_short!("deposit"),),
        DepositEvent { user, amount, fee, net },
    );
}

pub fn publish_withdraw(env: &Env, user: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdraw"),), WithdrawEvent { user, amount });
}

pub fn publish_fee_set(env: &Env, admin: Address, old_bps: u32, new_bps: u32) {
    env.events().publish(
        (symbol_short!("fee_set"),),
        RateUpdatedEvent { admin, old_bps, new_bps },
    );
}

pub fn publish_yield_rate_set(env: &Env, admin: Address, old_bps: u32, new_bps: u32) {
    env.events().publish(
        (symbol_short!("yld_rate"),),
        RateUpdatedEvent { admin, old_bps, new_bps },
    );
}

pub fn publish_pause(env: &Env, caller: Address, paused: bool) {
    let topic = if paused {
        symbol_short!("paused")
    } else {
        symbol_short!("unpaused")
    };
    env.events().publish((topic,), PauseEvent { paused, caller });
}

pub fn publish_yield_claimed(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("yld_claim"),),
        YieldClaimedEvent { user, amount },
    );
}

pub fn publish_delay_set(env: &Env, admin: Address, old_seconds: u64, new_seconds: u64) {
    env.events().publish(
        (symbol_short!("delay_set"),),
        DelayUpdatedEvent { admin, old_seconds, new_seconds },
    );
}

pub fn publish_withdrawal_requested(env: &Env, user: Address, amount: i128, requested_at: u64) {
    env.events().publish(
        (symbol_short!("wd_req"),),
        WithdrawalRequestedEvent { user, amount, requested_at },
    );
}

pub fn publish_withdrawal_executed(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("wd_exec"),),
        WithdrawalPaidEvent { user, amount },
    );
}

pub fn publish_emergency_withdraw(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("emergency"),),
        WithdrawalPaidEvent { user, amount },
    );
}

pub fn publish_upgraded(env: &Env, admin: Address, from: Revision, to: Revision) {
    env.events()
        .publish((symbol_short!("upgraded"),), UpgradedEvent { admin, from, to });
}

pub fn publish_admin_granted(env: &Env, admin: Address, account: Address) {
    env.events().publish(
        (symbol_short!("adm_grant"),),
        AdminChangedEvent { admin, account },
    );
}

pub fn publish_admin_revoked(env: &Env, admin: Address, account: Address) {
    env.events().publish(
        (symbol_short!("adm_revok"),),
        AdminChangedEvent { admin, account },
    );
}
