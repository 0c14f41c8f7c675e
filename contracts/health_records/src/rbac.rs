use crate::ContractError;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Roles a principal can hold. A principal may hold any combination of them.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    /// Manages role membership and the circuit breaker
    Admin = 1,
    /// Organisation-level role; tracked but not consulted by record rules
    Institution = 2,
    /// May create records and be granted visibility into them
    Practitioner = 3,
}

/// Internal store schema helpers
pub fn role_set_key(principal: &Address) -> (Symbol, Address) {
    (symbol_short!("ROLES"), principal.clone())
}

fn extend_ttl_address_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ======================== Core RBAC Engine ========================

/// The full tagged set of roles held by `principal`, in grant order.
pub fn get_roles(env: &Env, principal: &Address) -> Vec<Role> {
    env.storage()
        .persistent()
        .get(&role_set_key(principal))
        .unwrap_or(Vec::new(env))
}

pub fn has_role(env: &Env, principal: &Address, role: &Role) -> bool {
    get_roles(env, principal).contains(role)
}

/// Adds `role` to the principal's set. Granting a held role is a no-op.
pub fn assign_role(env: &Env, principal: &Address, role: Role) {
    let mut roles = get_roles(env, principal);
    if roles.contains(role) {
        return;
    }
    roles.push_back(role);

    let key = role_set_key(principal);
    env.storage().persistent().set(&key, &roles);
    extend_ttl_address_key(env, &key);
}

/// Removes `role` from the principal's set. Revoking a role that is not held
/// is a no-op. The storage entry is kept, even when empty.
pub fn remove_role(env: &Env, principal: &Address, role: Role) {
    let roles = get_roles(env, principal);
    if !roles.contains(role) {
        return;
    }

    let mut remaining = Vec::new(env);
    for r in roles.iter() {
        if r != role {
            remaining.push_back(r);
        }
    }

    let key = role_set_key(principal);
    env.storage().persistent().set(&key, &remaining);
    extend_ttl_address_key(env, &key);
}

/// Gate for role-sensitive operations: `Unauthorized` unless `principal`
/// currently holds `role`.
pub fn require_role(env: &Env, principal: &Address, role: &Role) -> Result<(), ContractError> {
    if has_role(env, principal, role) {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}
