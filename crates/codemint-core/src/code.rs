use crate::error::CodeError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The 36-symbol alphabet codes are drawn from: digits and uppercase letters.
pub const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Minimum accepted code length.
pub const MIN_LENGTH: usize = 1;

/// Maximum accepted code length.
pub const MAX_LENGTH: usize = 256;

/// Code length used when a request does not specify one.
pub const DEFAULT_LENGTH: usize = 8;

/// A validated unique-code identifier.
///
/// Codes are 1-256 characters long and contain only digits and uppercase
/// ASCII letters. A `Code` is immutable once created and acts as the natural
/// key in the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    /// Creates a new `Code` after validating the input.
    ///
    /// Valid codes are 1-256 characters and contain only `[0-9A-Z]`.
    pub fn new(code: impl Into<String>) -> Result<Self, CodeError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `Code` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that only draw from [`CODE_ALPHABET`]).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CodeError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(CodeError::InvalidLength {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                got: code.len(),
            });
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        {
            return Err(CodeError::InvalidCharacter(code.to_string()));
        }

        Ok(())
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
