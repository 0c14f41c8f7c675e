use crate::{rbac::Role, records::HealthRecord};
use soroban_sdk::{symbol_short, Address, BytesN, Env, String, Symbol};

const EVENT_SEQ: Symbol = symbol_short!("EVT_SEQ");

/// Number of notifications published so far.
pub fn notification_count(env: &Env) -> u64 {
    env.storage().instance().get(&EVENT_SEQ).unwrap_or(0)
}

/// Allocates the sequence number carried by the next notification.
fn next_seq(env: &Env) -> u64 {
    let seq = notification_count(env).saturating_add(1);
    env.storage().instance().set(&EVENT_SEQ, &seq);
    seq
}

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub seq: u64,
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a role is granted to or revoked from a principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub seq: u64,
    pub principal: Address,
    pub role: Role,
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a record is appended to the ledger.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordCreatedEvent {
    pub seq: u64,
    pub record_id: u64,
    pub subject: Address,
    pub creator: Address,
    pub fingerprint: BytesN<32>,
    pub locator: String,
    pub version: String,
    pub created_at: u64,
}

/// Event published when a subject sets or clears broad approval.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BroadApprovalEvent {
    pub seq: u64,
    pub subject: Address,
    pub practitioner: Address,
    pub timestamp: u64,
}

/// Event published when a per-record grant is set or cleared.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAccessEvent {
    pub seq: u64,
    pub record_id: u64,
    pub subject: Address,
    pub practitioner: Address,
    pub timestamp: u64,
}

/// Event published when the circuit breaker is engaged or released.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub seq: u64,
    pub admin: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        seq: next_seq(env),
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

fn publish_role_changed(
    env: &Env,
    tag: Symbol,
    principal: Address,
    role: Role,
    admin: Address,
) {
    let topics = (tag, principal.clone(), role);
    let data = RoleChangedEvent {
        seq: next_seq(env),
        principal,
        role,
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when `admin` grants `role` to `principal`.
pub fn publish_role_granted(env: &Env, principal: Address, role: Role, admin: Address) {
    publish_role_changed(env, symbol_short!("ROLE_GRT"), principal, role, admin);
}

/// Publishes an event when `admin` revokes `role` from `principal`.
pub fn publish_role_revoked(env: &Env, principal: Address, role: Role, admin: Address) {
    publish_role_changed(env, symbol_short!("ROLE_REV"), principal, role, admin);
}

/// Publishes an event when a record is created.
/// The payload carries every record attribute so an off-chain indexer can
/// rebuild the ledger, including a fingerprint index, from events alone.
pub fn publish_record_created(env: &Env, record: &HealthRecord) {
    let topics = (
        symbol_short!("REC_ADD"),
        record.subject.clone(),
        record.creator.clone(),
    );
    let data = RecordCreatedEvent {
        seq: next_seq(env),
        record_id: record.id,
        subject: record.subject.clone(),
        creator: record.creator.clone(),
        fingerprint: record.fingerprint.clone(),
        locator: record.locator.clone(),
        version: record.version.clone(),
        created_at: record.created_at,
    };
    env.events().publish(topics, data);
}

fn publish_broad_approval(env: &Env, tag: Symbol, subject: Address, practitioner: Address) {
    let topics = (tag, subject.clone(), practitioner.clone());
    let data = BroadApprovalEvent {
        seq: next_seq(env),
        subject,
        practitioner,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_broad_approval_granted(env: &Env, subject: Address, practitioner: Address) {
    publish_broad_approval(env, symbol_short!("APRV_SET"), subject, practitioner);
}

pub fn publish_broad_approval_revoked(env: &Env, subject: Address, practitioner: Address) {
    publish_broad_approval(env, symbol_short!("APRV_CLR"), subject, practitioner);
}

fn publish_record_access(
    env: &Env,
    tag: Symbol,
    record_id: u64,
    subject: Address,
    practitioner: Address,
) {
    let topics = (tag, record_id, practitioner.clone());
    let data = RecordAccessEvent {
        seq: next_seq(env),
        record_id,
        subject,
        practitioner,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a per-record grant is set, either explicitly by
/// the subject or implicitly for the creator of a new record.
pub fn publish_record_shared(
    env: &Env,
    record_id: u64,
    subject: Address,
    practitioner: Address,
) {
    publish_record_access(env, symbol_short!("ACC_GRT"), record_id, subject, practitioner);
}

pub fn publish_record_access_revoked(
    env: &Env,
    record_id: u64,
    subject: Address,
    practitioner: Address,
) {
    publish_record_access(env, symbol_short!("ACC_REV"), record_id, subject, practitioner);
}

fn publish_pause(env: &Env, tag: Symbol, admin: Address) {
    let topics = (tag, admin.clone());
    let data = PauseEvent {
        seq: next_seq(env),
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_paused(env: &Env, admin: Address) {
    publish_pause(env, symbol_short!("PAUSED"), admin);
}

pub fn publish_unpaused(env: &Env, admin: Address) {
    publish_pause(env, symbol_short!("UNPAUSED"), admin);
}
