//! Two independent consent relations.
//!
//! - Broad approval: `(subject, practitioner) -> bool`, covering every record
//!   of the subject, past and future.
//! - Per-record grant: `(record_id, practitioner) -> bool`, covering one
//!   record only.
//!
//! Neither relation implies or clears the other. Revocation writes `false`
//! rather than removing the entry. Visibility is never stored: [`can_view`]
//! recomputes it from both relations and the live role registry.

use crate::{
    events,
    rbac::{self, Role},
    records::{self, HealthRecord},
    ContractError,
};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

pub fn broad_approval_key(
    subject: &Address,
    practitioner: &Address,
) -> (Symbol, Address, Address) {
    (
        symbol_short!("BROAD"),
        subject.clone(),
        practitioner.clone(),
    )
}

pub fn record_grant_key(record_id: u64, practitioner: &Address) -> (Symbol, u64, Address) {
    (symbol_short!("REC_GRT"), record_id, practitioner.clone())
}

pub fn has_broad_approval(env: &Env, subject: &Address, practitioner: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&broad_approval_key(subject, practitioner))
        .unwrap_or(false)
}

pub fn has_record_grant(env: &Env, record_id: u64, practitioner: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&record_grant_key(record_id, practitioner))
        .unwrap_or(false)
}

fn set_broad_approval(env: &Env, subject: &Address, practitioner: &Address, approved: bool) {
    let key = broad_approval_key(subject, practitioner);
    env.storage().persistent().set(&key, &approved);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn set_record_grant(env: &Env, record_id: u64, practitioner: &Address, granted: bool) {
    let key = record_grant_key(record_id, practitioner);
    env.storage().persistent().set(&key, &granted);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Self-service: the subject approves `practitioner` for all their records.
/// No role is required of either side.
pub fn grant_broad_approval(env: &Env, subject: &Address, practitioner: &Address) {
    set_broad_approval(env, subject, practitioner, true);
    events::publish_broad_approval_granted(env, subject.clone(), practitioner.clone());
}

pub fn revoke_broad_approval(env: &Env, subject: &Address, practitioner: &Address) {
    set_broad_approval(env, subject, practitioner, false);
    events::publish_broad_approval_revoked(env, subject.clone(), practitioner.clone());
}

/// Loads the record and checks that `caller` is its subject.
fn require_subject(
    env: &Env,
    caller: &Address,
    record_id: u64,
) -> Result<HealthRecord, ContractError> {
    let record = records::get_record(env, record_id).ok_or(ContractError::RecordNotFound)?;
    if record.subject != *caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(record)
}

/// Grants `practitioner` visibility into a single record.
///
/// The role is only checked here. A later role revocation leaves the flag
/// set; [`can_view`] hides the record through its own live role check.
pub fn share_record(
    env: &Env,
    caller: &Address,
    record_id: u64,
    practitioner: &Address,
) -> Result<(), ContractError> {
    let record = require_subject(env, caller, record_id)?;

    if !rbac::has_role(env, practitioner, &Role::Practitioner) {
        return Err(ContractError::InvalidTarget);
    }

    set_record_grant(env, record_id, practitioner, true);
    events::publish_record_shared(env, record_id, record.subject, practitioner.clone());
    Ok(())
}

/// Clears a per-record grant. The target need not still hold any role.
pub fn revoke_record_access(
    env: &Env,
    caller: &Address,
    record_id: u64,
    practitioner: &Address,
) -> Result<(), ContractError> {
    let record = require_subject(env, caller, record_id)?;

    set_record_grant(env, record_id, practitioner, false);
    events::publish_record_access_revoked(env, record_id, record.subject, practitioner.clone());
    Ok(())
}

/// `true` iff the record exists, `practitioner` currently holds the
/// Practitioner role, and either consent relation is set.
pub fn can_view(env: &Env, record_id: u64, practitioner: &Address) -> bool {
    let record = match records::get_record(env, record_id) {
        Some(r) => r,
        None => return false,
    };

    if !rbac::has_role(env, practitioner, &Role::Practitioner) {
        return false;
    }

    has_broad_approval(env, &record.subject, practitioner)
        || has_record_grant(env, record_id, practitioner)
}
