#![no_std]
//! Access-control and integrity ledger for health records.
//!
//! Records never hold payload. Each entry commits to an off-chain file by
//! digest and locator; the contract decides who may create entries, who may
//! see them, and lets anyone check a file against its on-ledger digest.

pub mod circuit_breaker;
pub mod consent;
pub mod errors;
pub mod events;
pub mod integrity;
pub mod rbac;
pub mod records;
pub mod validation;

use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, BytesN, Env, String, Symbol, Vec,
};

pub use errors::{report, ContractError, ErrorCategory, ErrorSeverity};
pub use integrity::FingerprintMatch;
pub use rbac::Role;
pub use records::HealthRecord;

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

#[contract]
pub struct HealthRecordsContract;

#[contractimpl]
impl HealthRecordsContract {
    /// Initialize the contract with the bootstrap admin, who receives the
    /// Admin role.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(report(
                &env,
                ContractError::AlreadyInitialized,
                symbol_short!("INIT"),
            ));
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        rbac::assign_role(&env, &admin, Role::Admin);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the bootstrap admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    /// Number of notifications emitted so far. Every event payload carries
    /// its position in this sequence as `seq`.
    pub fn notification_count(env: Env) -> u64 {
        events::notification_count(&env)
    }

    // ======================== Role Registry ========================

    /// Grants `role` to `principal`. Caller must hold Admin. Granting a held
    /// role succeeds without changing membership.
    pub fn grant_role(
        env: Env,
        caller: Address,
        principal: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        rbac::require_role(&env, &caller, &Role::Admin)
            .map_err(|e| report(&env, e, symbol_short!("ROLE_GRT")))?;

        rbac::assign_role(&env, &principal, role);
        events::publish_role_granted(&env, principal, role, caller);

        Ok(())
    }

    /// Revokes `role` from `principal`. Caller must hold Admin. Revoking a
    /// role that is not held succeeds without changing membership.
    ///
    /// Nothing stops an admin from revoking the last Admin role, which leaves
    /// role management and the circuit breaker permanently locked.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        principal: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        rbac::require_role(&env, &caller, &Role::Admin)
            .map_err(|e| report(&env, e, symbol_short!("ROLE_REV")))?;

        rbac::remove_role(&env, &principal, role);
        events::publish_role_revoked(&env, principal, role, caller);

        Ok(())
    }

    pub fn has_role(env: Env, principal: Address, role: Role) -> bool {
        rbac::has_role(&env, &principal, &role)
    }

    /// All roles held by `principal`, in the order they were granted.
    pub fn get_roles(env: Env, principal: Address) -> Vec<Role> {
        rbac::get_roles(&env, &principal)
    }

    // ======================== Record Ledger ========================

    /// Appends a record for `subject`. The caller must be a practitioner
    /// holding broad approval from `subject`; on success the caller also
    /// receives a per-record grant on the new entry.
    pub fn create_record(
        env: Env,
        caller: Address,
        subject: Address,
        fingerprint: BytesN<32>,
        locator: String,
        version: String,
    ) -> Result<u64, ContractError> {
        circuit_breaker::require_not_paused(&env)
            .map_err(|e| report(&env, e, symbol_short!("REC_ADD")))?;
        caller.require_auth();

        records::create_record(&env, &caller, &subject, fingerprint, locator, version)
            .map_err(|e| report(&env, e, symbol_short!("REC_ADD")))
    }

    /// Returns the record, or `None` if no record has this id. Never fails.
    pub fn get_record(env: Env, record_id: u64) -> Option<HealthRecord> {
        records::get_record(&env, record_id)
    }

    /// Ids of the subject's records in creation order.
    pub fn list_record_ids(env: Env, subject: Address) -> Vec<u64> {
        records::list_record_ids(&env, &subject)
    }

    /// Get the total number of records
    pub fn record_count(env: Env) -> u64 {
        records::record_count(&env)
    }

    // ======================== Consent Matrix ========================

    /// `subject` approves `practitioner` for every record they own.
    pub fn grant_broad_approval(
        env: Env,
        subject: Address,
        practitioner: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env)
            .map_err(|e| report(&env, e, symbol_short!("APRV_SET")))?;
        subject.require_auth();

        consent::grant_broad_approval(&env, &subject, &practitioner);
        Ok(())
    }

    /// `subject` withdraws broad approval. Per-record grants are untouched.
    pub fn revoke_broad_approval(
        env: Env,
        subject: Address,
        practitioner: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env)
            .map_err(|e| report(&env, e, symbol_short!("APRV_CLR")))?;
        subject.require_auth();

        consent::revoke_broad_approval(&env, &subject, &practitioner);
        Ok(())
    }

    /// The record's subject shares one record with a current practitioner.
    pub fn share_record(
        env: Env,
        caller: Address,
        record_id: u64,
        practitioner: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env)
            .map_err(|e| report(&env, e, symbol_short!("ACC_GRT")))?;
        caller.require_auth();

        consent::share_record(&env, &caller, record_id, &practitioner)
            .map_err(|e| report(&env, e, symbol_short!("ACC_GRT")))
    }

    /// The record's subject withdraws a per-record grant.
    pub fn revoke_record_access(
        env: Env,
        caller: Address,
        record_id: u64,
        practitioner: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env)
            .map_err(|e| report(&env, e, symbol_short!("ACC_REV")))?;
        caller.require_auth();

        consent::revoke_record_access(&env, &caller, record_id, &practitioner)
            .map_err(|e| report(&env, e, symbol_short!("ACC_REV")))
    }

    /// Live visibility check; see [`consent::can_view`].
    pub fn can_view(env: Env, record_id: u64, practitioner: Address) -> bool {
        consent::can_view(&env, record_id, &practitioner)
    }

    /// Raw broad-approval flag, without the live role check.
    pub fn has_broad_approval(env: Env, subject: Address, practitioner: Address) -> bool {
        consent::has_broad_approval(&env, &subject, &practitioner)
    }

    /// Raw per-record grant flag, without the live role check.
    pub fn has_record_grant(env: Env, record_id: u64, practitioner: Address) -> bool {
        consent::has_record_grant(&env, record_id, &practitioner)
    }

    // ======================== Integrity Index ========================

    /// Finds the lowest-id record committed to `fingerprint`.
    pub fn verify_by_fingerprint(env: Env, fingerprint: BytesN<32>) -> FingerprintMatch {
        integrity::verify_by_fingerprint(&env, &fingerprint)
    }

    // ======================== Circuit Breaker ========================

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::pause_contract(&env, &caller)
            .map_err(|e| report(&env, e, symbol_short!("PAUSE")))
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::resume_contract(&env, &caller)
            .map_err(|e| report(&env, e, symbol_short!("UNPAUSE")))
    }

    pub fn is_paused(env: Env) -> bool {
        circuit_breaker::is_paused(&env)
    }
}


#[cfg(test)]
mod test_consent;
