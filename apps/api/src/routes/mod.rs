pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::state::AppState;
use crate::tailor::handlers as tailor;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skill API
        .route("/api/v1/skills/extract", post(analysis::handle_extract_skills))
        // Resume API
        .route("/api/v1/resumes/upload", post(analysis::handle_upload_resume))
        .route(
            "/api/v1/resumes/analyze",
            post(analysis::handle_analyze_resume),
        )
        .route("/api/v1/resumes/tailor", post(tailor::handle_tailor_resume))
        .with_state(state)
}
