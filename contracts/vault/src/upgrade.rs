//! Swapping the active revision on live state.
//!
//! Upgrades only move forward. Each schema a jump passes through gets its
//! migration, which writes defaults for the fields that schema appends and
//! never touches an earlier field. Going back is rejected: an older revision
//! has no notion of the pause flag or pending withdrawals and would silently
//! ignore them while they stay persisted.

use soroban_sdk::{Address, Env};

use crate::error::VaultError;
use crate::events;
use crate::revision::Revision;
use crate::storage;

pub fn upgrade_to(env: &Env, admin: &Address, target: Revision) -> Result<(), VaultError> {
    let current = storage::revision(env)?;
    if target <= current {
        return Err(VaultError::InvalidRevision);
    }

    let mut step = current;
    while let Some(next) = step.next() {
        if next > target {
            break;
        }
        migrate(env, next);
        step = next;
    }
    storage::set_revision(env, target);

    events::publish_upgraded(env, admin.clone(), current, target);
    Ok(())
}

/// Applies `to`'s schema on top of the previous one. A schema that was
/// already applied is left as it is.
fn migrate(env: &Env, to: Revision) {
    if storage::schema_version(env) >= to.schema() {
        return;
    }

    match to {
        Revision::V1 => {}
        Revision::V2 => {
            storage::set_yield_rate_bps(env, 0);
            storage::set_deposits_paused(env, false);
            storage::set_yield_index(env, 0);
            storage::set_index_updated_at(env, env.ledger().timestamp());
        }
        Revision::V3 => {
            storage::set_withdrawal_delay(env, 0);
            storage::set_total_pending(env, 0);
        }
    }
    storage::set_schema_version(env, to.schema());
}
