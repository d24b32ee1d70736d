use crate::error::Result;
use crate::model::{CreateCodeRequest, CreateCodeResponse};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use codemint_core::{CreationRequest, DEFAULT_LENGTH};

pub async fn create_code_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateCodeRequest>,
) -> Result<Json<CreateCodeResponse>> {
    let request = CreationRequest {
        length: request.length.unwrap_or(DEFAULT_LENGTH),
        used_by: request.used_by,
        reference: request.reference,
        description: request.description,
    };

    let code = state.issuer().create(request).await?;

    Ok(Json(CreateCodeResponse {
        code: code.as_str().to_owned(),
    }))
}
