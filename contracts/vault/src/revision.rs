//! Logic revisions.
//!
//! The instance stores a [`Revision`] tag; every entry point looks it up and
//! dispatches to that revision's [`RevisionLogic`] handler set. Handler sets
//! are stateless unit structs: they read and write the shared layout in
//! `storage` and own nothing themselves. A newer revision reuses the older
//! ones by delegation, and operations an older revision never had fall
//! through to the trait defaults, which reject with `UnsupportedOperation`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::accrual;
use crate::delayed;
use crate::error::VaultError;
use crate::ledger;
use crate::storage;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Revision {
    V1 = 1,
    V2 = 2,
    V3 = 3,
}

impl Revision {
    /// Schema version the revision reads and writes.
    pub fn schema(self) -> u32 {
        self as u32
    }

    pub fn next(self) -> Option<Revision> {
        match self {
            Revision::V1 => Some(Revision::V2),
            Revision::V2 => Some(Revision::V3),
            Revision::V3 => None,
        }
    }

    /// Literal tag operators check after an upgrade.
    pub fn tag(self) -> Symbol {
        match self {
            Revision::V1 => symbol_short!("V1"),
            Revision::V2 => symbol_short!("V2"),
            Revision::V3 => symbol_short!("V3"),
        }
    }

    pub fn logic(self) -> &'static dyn RevisionLogic {
        match self {
            Revision::V1 => &CoreLogic,
            Revision::V2 => &YieldLogic,
            Revision::V3 => &DelayedLogic,
        }
    }
}

/// Handler set for one revision. Access checks happen before dispatch; the
/// handlers only see callers that are already authenticated and, for admin
/// operations, already known to hold ADMIN.
pub trait RevisionLogic {
    fn revision(&self) -> Revision;

    fn deposit(&self, env: &Env, user: &Address, amount: i128) -> Result<i128, VaultError> {
        ledger::deposit(env, user, amount)
    }

    fn withdraw(&self, env: &Env, user: &Address, amount: i128) -> Result<(), VaultError> {
        ledger::withdraw(env, user, amount)
    }

    fn set_yield_rate(&self, _env: &Env, _admin: &Address, _bps: u32) -> Result<(), VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn set_deposits_paused(
        &self,
        _env: &Env,
        _admin: &Address,
        _paused: bool,
    ) -> Result<(), VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn claim_yield(&self, _env: &Env, _user: &Address) -> Result<i128, VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn yield_rate(&self, _env: &Env) -> Result<u32, VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn deposits_paused(&self, _env: &Env) -> Result<bool, VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn pending_yield(&self, _env: &Env, _user: &Address) -> Result<i128, VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn set_withdrawal_delay(
        &self,
        _env: &Env,
        _admin: &Address,
        _seconds: u64,
    ) -> Result<(), VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn request_withdrawal(
        &self,
        _env: &Env,
        _user: &Address,
        _amount: i128,
    ) -> Result<(), VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn execute_withdrawal(&self, _env: &Env, _user: &Address) -> Result<i128, VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn emergency_withdraw(&self, _env: &Env, _user: &Address) -> Result<i128, VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn withdrawal_delay(&self, _env: &Env) -> Result<u64, VaultError> {
        Err(VaultError::UnsupportedOperation)
    }

    fn withdrawal_request(&self, _env: &Env, _user: &Address) -> Result<(i128, u64), VaultError> {
        Err(VaultError::UnsupportedOperation)
    }
}

/// V1: fee-bearing deposit and instant withdraw.
pub struct CoreLogic;

impl RevisionLogic for CoreLogic {
    fn revision(&self) -> Revision {
        Revision::V1
    }
}

/// V2: adds yield accrual and the deposit pause.
pub struct YieldLogic;

impl RevisionLogic for YieldLogic {
    fn revision(&self) -> Revision {
        Revision::V2
    }

    fn deposit(&self, env: &Env, user: &Address, amount: i128) -> Result<i128, VaultError> {
        accrual::require_deposits_open(env)?;
        accrual::settle(env, user)?;
        ledger::deposit(env, user, amount)
    }

    fn withdraw(&self, env: &Env, user: &Address, amount: i128) -> Result<(), VaultError> {
        accrual::settle(env, user)?;
        ledger::withdraw(env, user, amount)
    }

    fn set_yield_rate(&self, env: &Env, admin: &Address, bps: u32) -> Result<(), VaultError> {
        accrual::set_yield_rate(env, admin, bps)
    }

    fn set_deposits_paused(
        &self,
        env: &Env,
        admin: &Address,
        paused: bool,
    ) -> Result<(), VaultError> {
        accrual::set_deposits_paused(env, admin, paused)
    }

    fn claim_yield(&self, env: &Env, user: &Address) -> Result<i128, VaultError> {
        accrual::claim_yield(env, user)
    }

    fn yield_rate(&self, env: &Env) -> Result<u32, VaultError> {
        Ok(storage::yield_rate_bps(env))
    }

    fn deposits_paused(&self, env: &Env) -> Result<bool, VaultError> {
        Ok(storage::deposits_paused(env))
    }

    fn pending_yield(&self, env: &Env, user: &Address) -> Result<i128, VaultError> {
        accrual::pending_yield(env, user)
    }
}

/// V3: everything in V2 plus delayed withdrawals and the emergency exit.
pub struct DelayedLogic;

impl RevisionLogic for DelayedLogic {
    fn revision(&self) -> Revision {
        Revision::V3
    }

    fn deposit(&self, env: &Env, user: &Address, amount: i128) -> Result<i128, VaultError> {
        YieldLogic.deposit(env, user, amount)
    }

    fn withdraw(&self, env: &Env, user: &Address, amount: i128) -> Result<(), VaultError> {
        YieldLogic.withdraw(env, user, amount)
    }

    fn set_yield_rate(&self, env: &Env, admin: &Address, bps: u32) -> Result<(), VaultError> {
        YieldLogic.set_yield_rate(env, admin, bps)
    }

    fn set_deposits_paused(
        &self,
        env: &Env,
        admin: &Address,
        paused: bool,
    ) -> Result<(), VaultError> {
        YieldLogic.set_deposits_paused(env, admin, paused)
    }

    fn claim_yield(&self, env: &Env, user: &Address) -> Result<i128, VaultError> {
        YieldLogic.claim_yield(env, user)
    }

    fn yield_rate(&self, env: &Env) -> Result<u32, VaultError> {
        YieldLogic.yield_rate(env)
    }

    fn deposits_paused(&self, env: &Env) -> Result<bool, VaultError> {
        YieldLogic.deposits_paused(env)
    }

    fn pending_yield(&self, env: &Env, user: &Address) -> Result<i128, VaultError> {
        YieldLogic.pending_yield(env, user)
    }

    fn set_withdrawal_delay(
        &self,
        env: &Env,
        admin: &Address,
        seconds: u64,
    ) -> Result<(), VaultError> {
        delayed::set_withdrawal_delay(env, admin, seconds)
    }

    fn request_withdrawal(
        &self,
        env: &Env,
        user: &Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        delayed::request_withdrawal(env, user, amount)
    }

    fn execute_withdrawal(&self, env: &Env, user: &Address) -> Result<i128, VaultError> {
        delayed::execute_withdrawal(env, user)
    }

    fn emergency_withdraw(&self, env: &Env, user: &Address) -> Result<i128, VaultError> {
        delayed::emergency_withdraw(env, user)
    }

    fn withdrawal_delay(&self, env: &Env) -> Result<u64, VaultError> {
        Ok(storage::withdrawal_delay(env))
    }

    fn withdrawal_request(&self, env: &Env, user: &Address) -> Result<(i128, u64), VaultError> {
        Ok(delayed::withdrawal_request(env, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revisions_are_ordered_and_chained() {
        assert!(Revision::V1 < Revision::V2 && Revision::V2 < Revision::V3);
        assert_eq!(Revision::V1.next(), Some(Revision::V2));
        assert_eq!(Revision::V2.next(), Some(Revision::V3));
        assert_eq!(Revision::V3.next(), None);
    }

    #[test]
    fn each_tag_selects_its_own_handlers() {
        for revision in [Revision::V1, Revision::V2, Revision::V3] {
            assert_eq!(revision.logic().revision(), revision);
            assert_eq!(revision.schema(), revision as u32);
        }
    }
}
