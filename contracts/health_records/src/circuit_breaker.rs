use crate::{
    events,
    rbac::{self, Role},
    ContractError,
};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────

pub fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

// ── Core Logistics ───────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&global_pause_key())
        .unwrap_or(false)
}

/// Guard for every ledger and consent mutation. Role management and read
/// queries are never halted.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Engages the circuit breaker. Requires the Admin role.
pub fn pause_contract(env: &Env, caller: &Address) -> Result<(), ContractError> {
    rbac::require_role(env, caller, &Role::Admin)?;

    env.storage().instance().set(&global_pause_key(), &true);
    events::publish_paused(env, caller.clone());

    Ok(())
}

/// Releases the circuit breaker. Requires the Admin role.
pub fn resume_contract(env: &Env, caller: &Address) -> Result<(), ContractError> {
    rbac::require_role(env, caller, &Role::Admin)?;

    env.storage().instance().set(&global_pause_key(), &false);
    events::publish_unpaused(env, caller.clone());

    Ok(())
}
