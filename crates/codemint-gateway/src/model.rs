use serde::{Deserialize, Serialize};

/// Wire shape of a code-creation request.
///
/// Field names follow the public API contract (`usedBy`, camelCase); a
/// missing `length` falls back to the default.
#[derive(Debug, Deserialize)]
pub struct CreateCodeRequest {
    pub length: Option<usize>,
    #[serde(rename = "usedBy")]
    pub used_by: Option<String>,
    pub reference: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCodeResponse {
    pub code: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
