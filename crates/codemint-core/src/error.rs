use thiserror::Error;

/// Validation errors for [`Code`](crate::Code) values and requested lengths.
#[derive(Debug, Clone, Error)]
pub enum CodeError {
    #[error("code length must be between {min} and {max}, got {got}")]
    InvalidLength { min: usize, max: usize, got: usize },
    #[error("code must contain only digits and uppercase letters: '{0}'")]
    InvalidCharacter(String),
}

/// Errors surfaced by store backends.
///
/// `Conflict` is the distinguished "key already exists" outcome of a
/// conditional insert. Every other variant is a transport or data error and
/// must never be reported as a conflict: callers retry conflicts, but an
/// ambiguous write outcome is not safe to retry.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("code already exists: {0}")]
    Conflict(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Errors returned by [`CodeIssuer::create`](crate::CodeIssuer::create).
///
/// There is deliberately no `From<StoreError>` conversion: the issuer absorbs
/// `StoreError::Conflict` in its retry loop, so only non-conflict store
/// failures may be wrapped into `Store`.
#[derive(Debug, Clone, Error)]
pub enum IssueError {
    #[error(transparent)]
    InvalidCode(#[from] CodeError),
    #[error("no unique code found after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("store error: {0}")]
    Store(StoreError),
}
