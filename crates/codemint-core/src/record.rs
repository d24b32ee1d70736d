use crate::code::DEFAULT_LENGTH;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Caller-supplied parameters for creating a unique code.
///
/// Read-only input to the issuer; never persisted directly. A [`CodeRecord`]
/// is derived from it together with a generated code and a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationRequest {
    /// Requested code length.
    pub length: usize,
    /// Who the code is issued for.
    pub used_by: Option<String>,
    /// An external reference attached to the code.
    pub reference: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl CreationRequest {
    /// Creates a blank request with the given code length.
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }
}

impl Default for CreationRequest {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            used_by: None,
            reference: None,
            description: None,
        }
    }
}

/// The persisted entity behind an issued code.
///
/// The code itself is the store key and travels alongside the record.
/// Optional attributes are `None` when the request omitted them or supplied
/// only whitespace; they are never persisted as empty strings. Records are
/// created once per successful insert and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeRecord {
    /// When the issuing request was made. All insert attempts of one logical
    /// request share this timestamp.
    pub created_on: Timestamp,
    pub used_by: Option<String>,
    pub reference: Option<String>,
    pub description: Option<String>,
}

impl CodeRecord {
    /// Builds the record persisted for `request`, dropping blank attributes.
    pub fn from_request(request: &CreationRequest, created_on: Timestamp) -> Self {
        Self {
            created_on,
            used_by: non_blank(request.used_by.as_deref()),
            reference: non_blank(request.reference.as_deref()),
            description: non_blank(request.description.as_deref()),
        }
    }
}

/// Keeps values verbatim, but treats whitespace-only input as absent.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
}
