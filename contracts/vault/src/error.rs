use soroban_sdk::contracterror;

/// Every way a vault call can be rejected.
///
/// A returned error aborts the invocation and the host rolls back all
/// storage writes and nested token calls made before it.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    /// The instance has not been initialized yet.
    NotInitialized = 1,
    /// `initialize` already ran on this instance.
    AlreadyInitialized = 2,
    /// The caller does not hold the ADMIN role.
    Unauthorized = 3,
    /// Amount must be strictly positive.
    InvalidAmount = 4,
    /// Amount exceeds the caller's available balance.
    InsufficientBalance = 5,
    /// Deposits are paused by an admin.
    DepositsPaused = 6,
    /// The caller already has a withdrawal request waiting.
    PendingRequestExists = 7,
    /// The withdrawal delay has not passed since the request.
    DelayNotElapsed = 8,
    /// The token ledger refused a transfer, or the vault cannot cover it.
    InsufficientExternalFunds = 9,
    /// The depositor has not approved the vault for the full amount.
    InsufficientAllowance = 10,
    /// Fee is above 10000 basis points.
    InvalidFee = 11,
    /// No withdrawal request to execute.
    NoPendingRequest = 12,
    /// The active revision does not offer this operation.
    UnsupportedOperation = 13,
    /// Upgrades only move forward to a newer revision.
    InvalidRevision = 14,
    /// The last admin cannot be revoked.
    LastAdmin = 15,
    ArithmeticOverflow = 16,
}
