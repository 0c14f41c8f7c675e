use crate::{
    consent, events,
    rbac::{self, Role},
    validation, ContractError,
};
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol, Vec};

const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Immutable metadata entry. The payload itself lives off-chain at
/// `locator`; the ledger only commits to its digest.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthRecord {
    pub id: u64,
    pub subject: Address,
    pub creator: Address,
    pub fingerprint: BytesN<32>,
    pub locator: String,
    pub version: String,
    pub created_at: u64,
}

pub fn record_key(record_id: u64) -> (Symbol, u64) {
    (symbol_short!("RECORD"), record_id)
}

pub fn subject_records_key(subject: &Address) -> (Symbol, Address) {
    (symbol_short!("SUBJ_REC"), subject.clone())
}

/// Highest id issued so far; ids run from 1 to this value with no gaps.
pub fn record_count(env: &Env) -> u64 {
    env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0)
}

pub fn get_record(env: &Env, record_id: u64) -> Option<HealthRecord> {
    env.storage().persistent().get(&record_key(record_id))
}

pub fn list_record_ids(env: &Env, subject: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&subject_records_key(subject))
        .unwrap_or(Vec::new(env))
}

/// Appends a record authored by `creator` on behalf of `subject`.
///
/// All checks run before the counter is touched, so a rejected call never
/// consumes an id. The creator also receives a per-record grant on the new
/// entry, which keeps it visible to them after broad approval is withdrawn.
pub fn create_record(
    env: &Env,
    creator: &Address,
    subject: &Address,
    fingerprint: BytesN<32>,
    locator: String,
    version: String,
) -> Result<u64, ContractError> {
    rbac::require_role(env, creator, &Role::Practitioner)?;

    validation::validate_subject(env, subject)?;
    validation::validate_fingerprint(&fingerprint)?;
    validation::validate_locator(&locator)?;

    if !consent::has_broad_approval(env, subject, creator) {
        return Err(ContractError::Unauthorized);
    }

    let record_id = record_count(env).saturating_add(1);
    env.storage().instance().set(&RECORD_COUNTER, &record_id);

    let record = HealthRecord {
        id: record_id,
        subject: subject.clone(),
        creator: creator.clone(),
        fingerprint,
        locator,
        version,
        created_at: env.ledger().timestamp(),
    };

    let key = record_key(record_id);
    env.storage().persistent().set(&key, &record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let subject_key = subject_records_key(subject);
    let mut ids = list_record_ids(env, subject);
    ids.push_back(record_id);
    env.storage().persistent().set(&subject_key, &ids);
    env.storage()
        .persistent()
        .extend_ttl(&subject_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    consent::set_record_grant(env, record_id, creator, true);

    events::publish_record_created(env, &record);
    events::publish_record_shared(env, record_id, subject.clone(), creator.clone());

    Ok(record_id)
}
