//! Axum route handlers for the analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::report::{analyze_resume, AnalysisReport};
use crate::analysis::skills::{extract_skills, SkillTaxonomy};
use crate::errors::AppError;
use crate::extract::read_document;
use crate::sanitize::sanitize_input;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    /// Flattened skill list, for callers that don't care about categories.
    pub skills: Vec<String>,
    pub skills_by_category: SkillTaxonomy,
}

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub resume_text: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub skills_by_category: Option<SkillTaxonomy>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
///
/// Extracts a categorized skill taxonomy from a job description.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let job_description = sanitize_input(&request.job_description, state.config.max_input_chars);
    let taxonomy = extract_skills(&job_description, state.oracle.as_ref())
        .await
        .map_err(|e| AppError::Llm(format!("skill extraction failed: {e}")))?;

    Ok(Json(ExtractSkillsResponse {
        skills: taxonomy.all_skills(),
        skills_by_category: taxonomy,
    }))
}

/// POST /api/v1/resumes/upload
///
/// Accepts a multipart `file` field, extracts its text and returns the
/// normalized result for the client to pass into analysis.
pub async fn handle_upload_resume(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read uploaded file: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        let resume_text = read_document(&filename, &bytes)?;
        return Ok(Json(UploadResumeResponse { resume_text }));
    }

    Err(AppError::Validation("no file uploaded".to_string()))
}

/// POST /api/v1/resumes/analyze
///
/// Full analysis pipeline: skill matching → category aggregation →
/// qualitative report → gap tier. Degrades internally rather than failing;
/// the only user-visible errors are input-validation rejections.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let resume_text = sanitize_input(&request.resume_text, state.config.max_input_chars);
    let report = analyze_resume(
        &resume_text,
        &request.skills,
        request.skills_by_category,
        state.oracle.as_ref(),
    )
    .await;

    Ok(Json(report))
}
