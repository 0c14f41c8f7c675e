//! Input checks applied before any ledger write.
//!
//! Only sentinel values are rejected. Locator and version contents are
//! opaque to the ledger and are never parsed.

use crate::ContractError;
use soroban_sdk::{Address, BytesN, Env, String};

/// Rejects the null subject. The contract's own address stands in for the
/// null principal: it cannot act as a consenting party for its own records.
pub fn validate_subject(env: &Env, subject: &Address) -> Result<(), ContractError> {
    if *subject == env.current_contract_address() {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Rejects the all-zero digest.
pub fn validate_fingerprint(fingerprint: &BytesN<32>) -> Result<(), ContractError> {
    if fingerprint.to_array() == [0u8; 32] {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_locator(locator: &String) -> Result<(), ContractError> {
    if locator.len() == 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
