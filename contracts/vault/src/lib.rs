//! # Token Vault Contract
//!
//! A custodial single-token vault whose logic can be replaced in place while
//! every balance it holds stays where it is.
//!
//! ## Architecture Overview
//!
//! The contract instance is the fixed address users talk to. It owns all
//! persisted state and records which logic revision is active. Each public
//! entry point authenticates the caller, loads the active [`Revision`] and
//! dispatches to that revision's handler set:
//!
//! ```text
//! caller → TokenVault entry point → require_auth / ADMIN check
//!                                 ↓
//!                    storage::revision() → Revision::logic()
//!                                 ↓
//!            CoreLogic (V1) | YieldLogic (V2) | DelayedLogic (V3)
//!                                 ↓
//!                  storage (shared layout) → token ledger
//! ```
//!
//! ## Revisions
//!
//! - **V1** fee-bearing deposit and instant withdraw.
//! - **V2** adds annual yield paid from the vault float and a deposit pause.
//! - **V3** adds delayed two-phase withdrawals and an emergency exit.
//!
//! An operation introduced by a later revision fails with
//! [`VaultError::UnsupportedOperation`] while an earlier one is active.
//!
//! ## Storage Layout
//!
//! Every field is a [`storage::DataKey`] variant tagged with the schema that
//! introduced it in [`storage::LAYOUT`]. Upgrades append fields and write
//! their defaults; existing fields are never renamed, retyped or removed, so
//! an upgrade never reinterprets data written by an earlier revision.
//!
//! ### Instance Storage
//! - `Ledger`, `AdminCount`, `DepositFeeBps`, `TotalDeposits`, `Revision`,
//!   `SchemaVersion`
//! - V2: `YieldRateBps`, `DepositsPaused`, `YieldIndex`, `IndexUpdatedAt`
//! - V3: `WithdrawalDelay`, `TotalPending`
//!
//! ### Persistent Storage (Per-User)
//! - `Admin(account)`, `Balance(user)`
//! - V2: `AccrualIndex(user)`, `UnclaimedYield(user)`
//! - V3: `PendingWithdrawal(user)`
//!
//! ## Atomicity
//!
//! A returned error rolls back every write of the invocation. Entry points
//! validate first, write storage second and call the token ledger last, so
//! a token that calls back into the vault sees already-updated balances.
//!
//! # Examples
//!
//! ```ignore
//! token_client.approve(&user, &vault_address, &amount, &expiration_ledger);
//! vault_client.deposit(&user, &amount);
//! vault_client.upgrade_to(&admin, &Revision::V2);
//! vault_client.claim_yield(&user);
//! ```

#![no_std]

mod access;
mod accrual;
mod delayed;
mod error;
pub mod events;
mod ledger;
mod revision;
pub mod storage;
mod transfer;
mod upgrade;

pub use accrual::SECONDS_PER_YEAR;
pub use error::VaultError;
pub use ledger::{BPS_DENOMINATOR, MAX_FEE_BPS};
pub use revision::{Revision, RevisionLogic};
pub use storage::{WithdrawalRequest, SCHEMA_CAPACITY};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

// ============================================================================
// CONTRACT
// ============================================================================

/// Token Vault - upgradeable custodial vault for a single token.
///
/// # Security Model
///
/// - Users act only on their own balance (enforced via `require_auth()`)
/// - Fee, yield rate, delay, pause and upgrades require the ADMIN role
/// - Initialization happens once per instance and cannot be repeated
/// - Upgrades are forward-only; the layout is append-only
#[contract]
pub struct TokenVault;

#[contractimpl]
impl TokenVault {

    // ==========================================================================
    // INITIALIZATION
    // ==========================================================================

    /// Initializes the vault and activates V1.
    ///
    /// # Arguments
    /// * `ledger` - The token contract the vault holds
    /// * `admin` - First holder of the ADMIN role (must authorize)
    /// * `deposit_fee_bps` - Deposit fee in basis points, at most 10000
    ///
    /// # Errors
    /// - `AlreadyInitialized` if the instance was initialized before
    /// - `InvalidFee` if the fee is above 10000
    ///
    /// # Events
    /// Emits `init` with the ledger, admin and fee.
    pub fn initialize(
        env: Env,
        ledger: Address,
        admin: Address,
        deposit_fee_bps: u32,
    ) -> Result<(), VaultError> {
        access::initialize(&env, &ledger, &admin, deposit_fee_bps)
    }


    // ==========================================================================
    // LEDGER CORE - DEPOSIT / WITHDRAW
    // ==========================================================================

    /// Deposits `amount` tokens for `user` and returns the net credit.
    ///
    /// The user must first approve the vault on the token for at least
    /// `amount`. The deposit fee is kept by the vault; `amount - fee` is
    /// credited to the user's balance.
    ///
    /// # Errors
    /// - `InvalidAmount` if amount is not positive
    /// - `DepositsPaused` under V2+ while an admin paused deposits
    /// - `InsufficientAllowance` if the approval does not cover `amount`
    /// - `InsufficientExternalFunds` if the token refuses the transfer
    ///
    /// # Events
    /// Emits `deposit` with gross amount, fee and net credit.
    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<i128, VaultError> {
        user.require_auth();
        Self::active(&env)?.deposit(&env, &user, amount)
    }

    /// Withdraws `amount` from `user`'s available balance immediately.
    ///
    /// # Errors
    /// - `InsufficientBalance` unless `0 < amount <= balance`
    /// - `InsufficientExternalFunds` if the token transfer fails
    ///
    /// # Events
    /// Emits `withdraw`.
    pub fn withdraw(env: Env, user: Address, amount: i128) -> Result<(), VaultError> {
        user.require_auth();
        Self::active(&env)?.withdraw(&env, &user, amount)
    }

    /// Sets the deposit fee. ADMIN only; fails `InvalidFee` above 10000.
    pub fn set_deposit_fee(env: Env, admin: Address, bps: u32) -> Result<(), VaultError> {
        access::require_admin(&env, &admin)?;
        ledger::set_deposit_fee(&env, &admin, bps)
    }


    // ==========================================================================
    // YIELD EXTENSION (V2+)
    // ==========================================================================

    /// Sets the annual yield rate in basis points. ADMIN only.
    ///
    /// Time before the change keeps accruing at the old rate.
    pub fn set_yield_rate(env: Env, admin: Address, bps: u32) -> Result<(), VaultError> {
        access::require_admin(&env, &admin)?;
        Self::active(&env)?.set_yield_rate(&env, &admin, bps)
    }

    /// Pauses deposits. ADMIN only. Withdrawals and claims keep working.
    pub fn pause_deposits(env: Env, admin: Address) -> Result<(), VaultError> {
        access::require_admin(&env, &admin)?;
        Self::active(&env)?.set_deposits_paused(&env, &admin, true)
    }

    /// Re-enables deposits. ADMIN only.
    pub fn unpause(env: Env, admin: Address) -> Result<(), VaultError> {
        access::require_admin(&env, &admin)?;
        Self::active(&env)?.set_deposits_paused(&env, &admin, false)
    }

    /// Pays `user` all yield accrued on their balance and returns the amount.
    ///
    /// Yield comes out of the vault float (holdings above what depositors
    /// are owed). If the float cannot cover it the call fails with
    /// `InsufficientExternalFunds` and nothing changes.
    ///
    /// # Events
    /// Emits `yld_claim` when something was paid.
    pub fn claim_yield(env: Env, user: Address) -> Result<i128, VaultError> {
        user.require_auth();
        Self::active(&env)?.claim_yield(&env, &user)
    }


    // ==========================================================================
    // DELAYED WITHDRAWAL EXTENSION (V3)
    // ==========================================================================

    /// Sets the delay between a withdrawal request and its execution. ADMIN
    /// only. Applies to requests already pending as well.
    pub fn set_withdrawal_delay(env: Env, admin: Address, seconds: u64) -> Result<(), VaultError> {
        access::require_admin(&env, &admin)?;
        Self::active(&env)?.set_withdrawal_delay(&env, &admin, seconds)
    }

    /// Moves `amount` out of `user`'s available balance into a pending
    /// request stamped with the current ledger time.
    ///
    /// # Errors
    /// - `InvalidAmount` if amount is not positive
    /// - `PendingRequestExists` if the user already has a request
    /// - `InsufficientBalance` if amount exceeds the available balance
    pub fn request_withdrawal(env: Env, user: Address, amount: i128) -> Result<(), VaultError> {
        user.require_auth();
        Self::active(&env)?.request_withdrawal(&env, &user, amount)
    }

    /// Pays out `user`'s pending request once the delay has passed.
    ///
    /// # Errors
    /// - `NoPendingRequest` if there is nothing to execute
    /// - `DelayNotElapsed` if called too early
    pub fn execute_withdrawal(env: Env, user: Address) -> Result<i128, VaultError> {
        user.require_auth();
        Self::active(&env)?.execute_withdrawal(&env, &user)
    }

    /// Pays out `user`'s whole available balance now, ignoring the delay.
    /// A pending request is not affected.
    pub fn emergency_withdraw(env: Env, user: Address) -> Result<i128, VaultError> {
        user.require_auth();
        Self::active(&env)?.emergency_withdraw(&env, &user)
    }


    // ==========================================================================
    // ADMINISTRATIVE - ROLES & UPGRADES
    // ==========================================================================

    /// Switches every subsequent call to `revision`. ADMIN only, forward only.
    ///
    /// # Errors
    /// - `Unauthorized` for a caller without ADMIN
    /// - `InvalidRevision` if `revision` is not newer than the active one
    ///
    /// # Events
    /// Emits `upgraded` with the previous and new revision.
    pub fn upgrade_to(env: Env, admin: Address, revision: Revision) -> Result<(), VaultError> {
        access::require_admin(&env, &admin)?;
        upgrade::upgrade_to(&env, &admin, revision)
    }

    /// Gives ADMIN to `account`. ADMIN only; granting an existing admin is a
    /// no-op.
    pub fn grant_admin(env: Env, admin: Address, account: Address) -> Result<(), VaultError> {
        access::grant(&env, &admin, &account)
    }

    /// Fails `LastAdmin` when it would leave the vault without an admin.
    pub fn revoke_admin(env: Env, admin: Address, account: Address) -> Result<(), VaultError> {
        access::revoke(&env, &admin, &account)
    }


    // ==========================================================================
    // READ FUNCTIONS
    // ==========================================================================

    pub fn get_deposit_fee(env: Env) -> u32 {
        storage::deposit_fee_bps(&env)
    }

    /// Returns `V1`, `V2` or `V3` for the active revision.
    pub fn get_implementation_version(env: Env) -> Result<Symbol, VaultError> {
        Ok(storage::revision(&env)?.tag())
    }

    pub fn get_revision(env: Env) -> Result<Revision, VaultError> {
        storage::revision(&env)
    }

    /// Available balance of `user`, excluding any pending withdrawal.
    pub fn balance_of(env: Env, user: Address) -> i128 {
        storage::balance(&env, &user)
    }

    pub fn total_deposits(env: Env) -> i128 {
        storage::total_deposits(&env)
    }

    pub fn get_ledger(env: Env) -> Result<Address, VaultError> {
        storage::ledger(&env)
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        storage::is_admin(&env, &account)
    }

    pub fn get_yield_rate(env: Env) -> Result<u32, VaultError> {
        Self::active(&env)?.yield_rate(&env)
    }

    pub fn is_deposits_paused(env: Env) -> Result<bool, VaultError> {
        Self::active(&env)?.deposits_paused(&env)
    }

    /// Yield `user` could claim right now.
    pub fn get_pending_yield(env: Env, user: Address) -> Result<i128, VaultError> {
        Self::active(&env)?.pending_yield(&env, &user)
    }

    pub fn get_withdrawal_delay(env: Env) -> Result<u64, VaultError> {
        Self::active(&env)?.withdrawal_delay(&env)
    }

    /// `(amount, requested_at)` of `user`'s pending request, `(0, 0)` if none.
    pub fn get_withdrawal_request(env: Env, user: Address) -> Result<(i128, u64), VaultError> {
        Self::active(&env)?.withdrawal_request(&env, &user)
    }

    pub fn get_schema_version(env: Env) -> u32 {
        storage::schema_version(&env)
    }

    /// Unused field capacity left for future schemas.
    pub fn get_reserved_gap(env: Env) -> u32 {
        storage::reserved_gap(storage::schema_version(&env))
    }


    // ==========================================================================
    // INTERNAL
    // ==========================================================================

    #[inline]
    fn active(env: &Env) -> Result<&'static dyn RevisionLogic, VaultError> {
        Ok(storage::revision(env)?.logic())
    }
}
