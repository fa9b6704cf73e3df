//! One-shot initialization and the ADMIN role.
//!
//! ADMIN gates fee, yield-rate and delay changes, the deposit pause and
//! upgrades. Everything else is open to any caller acting on their own
//! balance, which `require_auth` on the acting address enforces.

use soroban_sdk::{Address, Env};

use crate::error::VaultError;
use crate::events;
use crate::ledger;
use crate::revision::Revision;
use crate::storage;

/// Writes schema 1 and activates V1. Only the first call on an instance
/// succeeds; revisions carry no initializer of their own, so this is the
/// single entry that can ever claim an instance.
pub fn initialize(
    env: &Env,
    token: &Address,
    admin: &Address,
    deposit_fee_bps: u32,
) -> Result<(), VaultError> {
    if storage::is_initialized(env) {
        return Err(VaultError::AlreadyInitialized);
    }
    admin.require_auth();
    ledger::validate_fee(deposit_fee_bps)?;

    storage::set_ledger(env, token);
    storage::set_admin(env, admin, true);
    storage::set_admin_count(env, 1);
    storage::set_deposit_fee_bps(env, deposit_fee_bps);
    storage::set_total_deposits(env, 0);
    storage::set_schema_version(env, Revision::V1.schema());
    storage::set_revision(env, Revision::V1);

    events::publish_initialized(env, token.clone(), admin.clone(), deposit_fee_bps);
    Ok(())
}

pub fn require_initialized(env: &Env) -> Result<(), VaultError> {
    if !storage::is_initialized(env) {
        return Err(VaultError::NotInitialized);
    }
    Ok(())
}

/// Authenticates `caller` and checks it holds ADMIN.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), VaultError> {
    require_initialized(env)?;
    caller.require_auth();
    if !storage::is_admin(env, caller) {
        return Err(VaultError::Unauthorized);
    }
    Ok(())
}

pub fn grant(env: &Env, admin: &Address, account: &Address) -> Result<(), VaultError> {
    require_admin(env, admin)?;
    if storage::is_admin(env, account) {
        return Ok(());
    }

    let count = storage::admin_count(env)
        .checked_add(1)
        .ok_or(VaultError::ArithmeticOverflow)?;
    storage::set_admin(env, account, true);
    storage::set_admin_count(env, count);

    events::publish_admin_granted(env, admin.clone(), account.clone());
    Ok(())
}

/// Removes ADMIN from `account`. The instance always keeps at least one
/// admin, otherwise it could never be upgraded again.
pub fn revoke(env: &Env, admin: &Address, account: &Address) -> Result<(), VaultError> {
    require_admin(env, admin)?;
    if !storage::is_admin(env, account) {
        return Ok(());
    }

    let count = storage::admin_count(env);
    if count <= 1 {
        return Err(VaultError::LastAdmin);
    }
    storage::set_admin(env, account, false);
    storage::set_admin_count(env, count - 1);

    events::publish_admin_revoked(env, admin.clone(), account.clone());
    Ok(())
}
