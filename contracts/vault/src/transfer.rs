//! Calls into the external token ledger.
//!
//! The vault only ever pulls with `transfer_from` and pushes with `transfer`.
//! Both go through the generated `try_` client methods so a refusing or
//! misbehaving token turns into a [`VaultError`] instead of a host trap. The
//! caller returns that error, which reverts every write made earlier in the
//! invocation.

use soroban_sdk::{token::TokenClient, Address, Env};

use crate::error::VaultError;
use crate::storage;

fn client(env: &Env) -> Result<TokenClient<'_>, VaultError> {
    Ok(TokenClient::new(env, &storage::ledger(env)?))
}

/// Pulls `amount` from `from` into the vault using the allowance `from`
/// granted to the vault.
pub fn pull(env: &Env, from: &Address, amount: i128) -> Result<(), VaultError> {
    let token = client(env)?;
    let vault = env.current_contract_address();

    if token.allowance(from, &vault) < amount {
        return Err(VaultError::InsufficientAllowance);
    }

    match token.try_transfer_from(&vault, from, &vault, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(VaultError::InsufficientExternalFunds),
    }
}

/// Sends `amount` of the vault's own holdings to `to`.
pub fn push(env: &Env, to: &Address, amount: i128) -> Result<(), VaultError> {
    let token = client(env)?;
    let vault = env.current_contract_address();

    if token.balance(&vault) < amount {
        return Err(VaultError::InsufficientExternalFunds);
    }

    match token.try_transfer(&vault, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(VaultError::InsufficientExternalFunds),
    }
}

/// Holdings above what the vault owes depositors. Retained fees land here
/// and yield is paid from it.
pub fn float(env: &Env) -> Result<i128, VaultError> {
    let holdings = client(env)?.balance(&env.current_contract_address());
    holdings
        .checked_sub(storage::liabilities(env)?)
        .ok_or(VaultError::ArithmeticOverflow)
}

/// Like [`push`], but only from the float so a payout never touches
/// principal owed to other depositors.
pub fn push_from_float(env: &Env, to: &Address, amount: i128) -> Result<(), VaultError> {
    if float(env)? < amount {
        return Err(VaultError::InsufficientExternalFunds);
    }
    push(env, to, amount)
}
