//! Axum route handlers for the tailoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::sanitize::sanitize_input;
use crate::state::AppState;
use crate::tailor::tailor_resume;

#[derive(Debug, Deserialize)]
pub struct TailorResumeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct TailorResumeResponse {
    pub tailored_resume: String,
}

/// POST /api/v1/resumes/tailor
///
/// Returns the rewritten resume as plain text for client-side preview.
/// Rendering the rewrite to PDF/DOCX is out of scope for this service.
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    Json(request): Json<TailorResumeRequest>,
) -> Result<Json<TailorResumeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let resume_text = sanitize_input(&request.resume_text, state.config.max_input_chars);
    let job_description = sanitize_input(&request.job_description, state.config.max_input_chars);

    let tailored_resume =
        tailor_resume(&resume_text, &job_description, state.oracle.as_ref()).await?;

    Ok(Json(TailorResumeResponse { tailored_resume }))
}
