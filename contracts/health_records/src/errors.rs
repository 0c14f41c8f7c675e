use soroban_sdk::{contracttype, log, Env, Symbol};

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: null, empty or sentinel inputs
    Validation = 1,
    /// Authorization errors: missing role, not the subject, no consent
    Authorization = 2,
    /// Not found errors: record lookup failures
    NotFound = 3,
    /// System errors: lifecycle and circuit breaker
    System = 4,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: caller supplied bad input
    Low = 1,
    /// Medium severity: rejected access attempt
    Medium = 2,
    /// Critical severity: operations halted
    Critical = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    RecordNotFound = 5,
    InvalidInput = 6,
    InvalidTarget = 7,
    Paused = 8,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidInput | ContractError::InvalidTarget => {
                ErrorCategory::Validation
            }
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::RecordNotFound => ErrorCategory::NotFound,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidInput
            | ContractError::InvalidTarget
            | ContractError::RecordNotFound => ErrorSeverity::Low,
            ContractError::Unauthorized => ErrorSeverity::Medium,
            ContractError::Paused => ErrorSeverity::Critical,
        }
    }

    /// Every error is terminal for the attempted operation; the core never
    /// retries on behalf of the caller.
    pub fn retryable(&self) -> bool {
        false
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::RecordNotFound => "Record not found",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::InvalidTarget => "Grant target does not hold the practitioner role",
            ContractError::Paused => "Contract operations are currently paused",
        }
    }
}

/// Emits a diagnostic log line for a rejected operation and hands the error
/// back so call sites can write `return Err(report(&env, err, symbol_short!("OP")))`.
///
/// Storage and events written by a failing invocation are rolled back, so the
/// diagnostic log is the only trace a rejection leaves behind.
pub fn report(env: &Env, error: ContractError, operation: Symbol) -> ContractError {
    log!(
        env,
        "rejected {}: code={} category={} severity={}",
        operation,
        error as u32,
        error.category() as u32,
        error.severity() as u32
    );
    error
}
