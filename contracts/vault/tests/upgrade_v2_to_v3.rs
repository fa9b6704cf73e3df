mod common;

use common::{Setup, UNIT};
use soroban_sdk::symbol_short;
use token_vault::{Revision, VaultError, SECONDS_PER_YEAR};

#[test]
fn preserves_all_v2_state() {
    let s = Setup::with_deposit_at(Revision::V2);
    s.vault.set_yield_rate(&s.admin, &500);
    s.vault.pause_deposits(&s.admin);

    s.vault.upgrade_to(&s.admin, &Revision::V3);

    assert_eq!(s.vault.get_implementation_version(), symbol_short!("V3"));
    assert_eq!(s.vault.balance_of(&s.user), 950 * UNIT);
    assert_eq!(s.vault.total_deposits(), 950 * UNIT);
    assert_eq!(s.vault.get_yield_rate(), 500);
    assert!(s.vault.is_deposits_paused());
    assert!(s.vault.is_admin(&s.admin));
    assert_eq!(s.vault.get_withdrawal_delay(), 0);
}

#[test]
fn accrual_continues_across_the_upgrade() {
    let s = Setup::with_deposit_at(Revision::V2);
    s.vault.set_yield_rate(&s.admin, &500);
    s.advance(SECONDS_PER_YEAR / 2);

    s.vault.upgrade_to(&s.admin, &Revision::V3);
    s.advance(SECONDS_PER_YEAR / 2);

    assert_eq!(s.vault.claim_yield(&s.user), 47 * UNIT + UNIT / 2);
}

#[test]
fn admin_sets_withdrawal_delay() {
    let s = Setup::with_deposit_at(Revision::V3);

    s.vault.set_withdrawal_delay(&s.admin, &3600);
    assert_eq!(s.vault.get_withdrawal_delay(), 3600);

    assert_eq!(
        s.vault.try_set_withdrawal_delay(&s.user, &0),
        Err(Ok(VaultError::Unauthorized))
    );
    assert_eq!(s.vault.get_withdrawal_delay(), 3600);
}

#[test]
fn request_moves_amount_out_of_balance() {
    let s = Setup::with_deposit_at(Revision::V3);
    s.vault.set_withdrawal_delay(&s.admin, &0);
    let t0 = s.now();

    s.vault.request_withdrawal(&s.user, &(100 * UNIT));

    assert_eq!(s.vault.get_withdrawal_request(&s.user), (100 * UNIT, t0));
    assert_eq!(s.vault.balance_of(&s.user), 850 * UNIT);
    assert_eq!(s.vault.total_deposits(), 850 * UNIT);
}

#[test]
fn enforces_withdrawal_delay() {
    let s = Setup::with_deposit_at(Revision::V3);
    s.vault.set_withdrawal_delay(&s.admin, &3600);
    let t0 = s.now();
    s.vault.request_withdrawal(&s.user, &(100 * UNIT));
    assert_eq!(s.vault.get_withdrawal_request(&s.user), (100 * UNIT, t0));

    assert_eq!(
        s.vault.try_execute_withdrawal(&s.user),
        Err(Ok(VaultError::DelayNotElapsed))
    );
    s.advance(3599);
    assert_eq!(
        s.vault.try_execute_withdrawal(&s.user),
        Err(Ok(VaultError::DelayNotElapsed))
    );

    s.advance(1);
    let before = s.token.balance(&s.user);
    assert_eq!(s.vault.execute_withdrawal(&s.user), 100 * UNIT);
    assert_eq!(s.token.balance(&s.user) - before, 100 * UNIT);
    assert_eq!(s.vault.get_withdrawal_request(&s.user), (0, 0));
    assert_eq!(s.vault.balance_of(&s.user), 850 * UNIT);
}

#[test]
fn one_request_at_a_time() {
    let s = Setup::with_deposit_at(Revision::V3);
    s.vault.set_withdrawal_delay(&s.admin, &3600);
    s.vault.request_withdrawal(&s.user, &(100 * UNIT));

    assert_eq!(
        s.vault.try_request_withdrawal(&s.user, &(100 * UNIT)),
        Err(Ok(VaultError::PendingRequestExists))
    );
    assert_eq!(s.vault.balance_of(&s.user), 850 * UNIT);

    s.advance(3600);
    s.vault.execute_withdrawal(&s.user);
    s.vault.request_withdrawal(&s.user, &(100 * UNIT));
    assert_eq!(s.vault.balance_of(&s.user), 750 * UNIT);
}

#[test]
fn request_validation() {
    let s = Setup::with_deposit_at(Revision::V3);

    assert_eq!(
        s.vault.try_request_withdrawal(&s.user, &0),
        Err(Ok(VaultError::InvalidAmount))
    );
    assert_eq!(
        s.vault.try_request_withdrawal(&s.user, &(951 * UNIT)),
        Err(Ok(VaultError::InsufficientBalance))
    );
    assert_eq!(
        s.vault.try_execute_withdrawal(&s.user),
        Err(Ok(VaultError::NoPendingRequest))
    );
    assert_eq!(s.vault.get_withdrawal_request(&s.user), (0, 0));
}

#[test]
fn emergency_withdraw_ignores_delay() {
    let s = Setup::with_deposit_at(Revision::V3);
    s.vault.set_withdrawal_delay(&s.admin, &(30 * 24 * 3600));

    let before = s.token.balance(&s.user);
    assert_eq!(s.vault.emergency_withdraw(&s.user), 950 * UNIT);

    assert!(s.token.balance(&s.user) > before);
    assert_eq!(s.token.balance(&s.user) - before, 950 * UNIT);
    assert_eq!(s.vault.balance_of(&s.user), 0);
    assert_eq!(s.vault.total_deposits(), 0);
}

#[test]
fn emergency_withdraw_leaves_pending_request() {
    let s = Setup::with_deposit_at(Revision::V3);
    s.vault.set_withdrawal_delay(&s.admin, &3600);
    let t0 = s.now();
    s.vault.request_withdrawal(&s.user, &(100 * UNIT));

    assert_eq!(s.vault.emergency_withdraw(&s.user), 850 * UNIT);
    assert_eq!(s.vault.get_withdrawal_request(&s.user), (100 * UNIT, t0));

    s.advance(3600);
    assert_eq!(s.vault.execute_withdrawal(&s.user), 100 * UNIT);
    assert_eq!(s.token.balance(&s.user), 950 * UNIT);
}

#[test]
fn emergency_withdraw_works_while_paused() {
    let s = Setup::with_deposit_at(Revision::V3);
    s.vault.pause_deposits(&s.admin);

    assert_eq!(s.vault.emergency_withdraw(&s.user), 950 * UNIT);
    assert_eq!(
        s.vault.try_emergency_withdraw(&s.user),
        Err(Ok(VaultError::InsufficientBalance))
    );
}

#[test]
fn pending_amount_does_not_earn_yield() {
    let s = Setup::with_deposit_at(Revision::V3);
    s.vault.set_yield_rate(&s.admin, &500);
    s.vault.request_withdrawal(&s.user, &(950 * UNIT));

    s.advance(SECONDS_PER_YEAR);

    assert_eq!(s.vault.get_pending_yield(&s.user), 0);
}

#[test]
fn pending_withdrawals_are_not_float() {
    let s = Setup::with_deposit_at(Revision::V3);
    let other = s.new_user();
    s.deposit(&other, 1_000 * UNIT);
    s.vault.set_withdrawal_delay(&s.admin, &3600);
    s.vault.request_withdrawal(&other, &(950 * UNIT));

    // float is the two 50-token fees; 100% for a year owes the user 950
    s.vault.set_yield_rate(&s.admin, &10_000);
    s.advance(SECONDS_PER_YEAR);

    assert_eq!(
        s.vault.try_claim_yield(&s.user),
        Err(Ok(VaultError::InsufficientExternalFunds))
    );
    s.vault.execute_withdrawal(&other);
    assert_eq!(s.token.balance(&other), 950 * UNIT);
}
