pub mod random;

use codemint_core::{Code, CodeError};

/// Trait for generating candidate codes.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness is negotiated with the store by the issuer, not here. Each call
/// is independent and no history is shared between calls.
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate code of exactly `length` characters.
    ///
    /// Fails with [`CodeError::InvalidLength`] when `length` is outside the
    /// accepted range, without producing any output.
    fn generate(&self, length: usize) -> Result<Code, CodeError>;
}
