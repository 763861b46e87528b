//! Resume tailoring — rewrites a resume to target a specific job description.
//!
//! Unlike the analysis stages there is no deterministic substitute for a
//! rewrite, so an oracle failure here surfaces to the caller as an LLM
//! error instead of degrading.

pub mod handlers;
pub mod prompts;

use crate::errors::AppError;
use crate::llm_client::Oracle;

/// Rewrites the (sanitized) resume against the (sanitized) job description,
/// returning the rewritten plain text.
pub async fn tailor_resume(
    resume_text: &str,
    job_description: &str,
    oracle: &dyn Oracle,
) -> Result<String, AppError> {
    let prompt = prompts::TAILOR_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);

    let rewritten = oracle
        .generate(&prompt, prompts::TAILOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("resume tailoring failed: {e}")))?;

    Ok(rewritten.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::StubOracle;

    #[tokio::test]
    async fn test_returns_trimmed_rewrite() {
        let oracle = StubOracle(Some("\n\nJANE DOE\nSUMMARY\n- shipped things\n"));
        let result = tailor_resume("resume", "jd", &oracle).await.unwrap();
        assert_eq!(result, "JANE DOE\nSUMMARY\n- shipped things");
    }

    #[tokio::test]
    async fn test_oracle_failure_surfaces_as_llm_error() {
        let oracle = StubOracle(None);
        let err = tailor_resume("resume", "jd", &oracle).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
