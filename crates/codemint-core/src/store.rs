use crate::code::Code;
use crate::error::StoreError;
use crate::record::CodeRecord;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The single storage capability the issuer consumes: an atomic conditional
/// insert keyed by the code.
///
/// Implementations must provide at-most-one-winner semantics for concurrent
/// writers proposing the same code. Uniqueness is enforced here, not by the
/// issuer, which holds no lock and trusts the store's atomicity.
#[async_trait]
pub trait CodeStore: Send + Sync + 'static {
    /// Inserts `record` under `code` only if no record with that code
    /// currently exists.
    ///
    /// Returns `Err(StoreError::Conflict)` when the code is already taken.
    /// A rejected insert is all-or-nothing and leaves no trace in the store.
    async fn put_if_absent(&self, code: &Code, record: CodeRecord) -> Result<()>;
}
