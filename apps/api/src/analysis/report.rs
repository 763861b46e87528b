//! Qualitative analysis stage and report assembly.
//!
//! `synthesize_report` issues the single large oracle call behind the
//! 27-field report contract and substitutes a fixed failsafe record on any
//! failure. `analyze_resume` chains matching, category aggregation, report
//! synthesis and gap classification into the pipeline's terminal artifact.

use serde_json::{json, Value};
use tracing::warn;

use crate::analysis::markdown::strip_markdown_tree;
use crate::analysis::matching::{
    aggregate_categories, gap_tier, match_skills, CategoryAnalysis, MatchResult,
};
use crate::analysis::prompts::{DETAILED_ANALYSIS_PROMPT_TEMPLATE, DETAILED_ANALYSIS_SYSTEM};
use crate::analysis::skills::SkillTaxonomy;
use crate::llm_client::{extract_json, Oracle};

/// Sentinel placed in the failsafe record's `ats_score` field so degraded
/// output is recognizable downstream.
pub const FAILSAFE_SENTINEL: &str = "NO ANALYSIS AVAILABLE - Failsafe Exception";

/// The pipeline's terminal artifact.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisReport {
    pub matched_skills: Vec<String>,
    pub unmatched_skills: Vec<String>,
    pub match_percentage: u32,
    pub emotion: String,
    pub category_analysis: CategoryAnalysis,
    pub detailed_analysis: Value,
}

/// Runs the full analysis pipeline over a (sanitized) resume.
///
/// Stages run strictly in sequence; each consumes the previous stage's
/// output. Never fails: every oracle-dependent stage degrades to its
/// deterministic substitute.
pub async fn analyze_resume(
    resume_text: &str,
    required_skills: &[String],
    taxonomy: Option<SkillTaxonomy>,
    oracle: &dyn Oracle,
) -> AnalysisReport {
    // Callers without a category breakdown get everything filed as technical.
    let taxonomy =
        taxonomy.unwrap_or_else(|| SkillTaxonomy::flat(required_skills.to_vec()));

    let match_result = match_skills(resume_text, required_skills, oracle).await;
    let category_analysis = aggregate_categories(&taxonomy, &match_result);
    let detailed_analysis =
        synthesize_report(resume_text, &taxonomy, &match_result, oracle).await;
    let emotion = gap_tier(match_result.match_percentage).to_string();

    AnalysisReport {
        matched_skills: match_result.matched_skills,
        unmatched_skills: match_result.unmatched_skills,
        match_percentage: match_result.match_percentage,
        emotion,
        category_analysis,
        detailed_analysis,
    }
}

/// Produces the detailed qualitative report, or the failsafe record when the
/// oracle's output cannot be consumed. Markdown stripping runs on both
/// paths.
pub async fn synthesize_report(
    resume_text: &str,
    taxonomy: &SkillTaxonomy,
    match_result: &MatchResult,
    oracle: &dyn Oracle,
) -> Value {
    let skills_summary = coverage_summary(taxonomy, &match_result.matched_skills);
    let prompt = DETAILED_ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{skills_summary}", &skills_summary);

    let detailed = match oracle.generate(&prompt, DETAILED_ANALYSIS_SYSTEM).await {
        Ok(raw) => match extract_json(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("qualitative analysis fell back to failsafe record: {e}");
                failsafe_record(&match_result.unmatched_skills)
            }
        },
        Err(e) => {
            warn!("qualitative analysis fell back to failsafe record: {e}");
            failsafe_record(&match_result.unmatched_skills)
        }
    };

    strip_markdown_tree(detailed)
}

/// Check/cross coverage summary embedded in the report prompt, one line per
/// skill under its category heading.
fn coverage_summary(taxonomy: &SkillTaxonomy, matched: &[String]) -> String {
    let mut out = String::new();
    for (category, skills) in taxonomy.categories() {
        out.push_str(category);
        out.push_str(":\n");
        for skill in skills {
            let mark = if matched.contains(skill) { '✓' } else { '✗' };
            out.push_str(&format!("- {mark} {skill}\n"));
        }
    }
    out
}

/// Fixed 5-field record substituted when synthesis fails, carrying up to 3
/// unmatched skills as priorities.
fn failsafe_record(unmatched_skills: &[String]) -> Value {
    json!({
        "overall_assessment": "No AI analysis available - failsafe record substituted.",
        "recommendations": ["Ensure your resume highlights relevant skills explicitly"],
        "priority_skills": unmatched_skills.iter().take(3).collect::<Vec<_>>(),
        "sections_to_improve": ["Skills section", "Work experience"],
        "ats_score": FAILSAFE_SENTINEL,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::StubOracle;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_successful_report_is_markdown_stripped() {
        let oracle = StubOracle(Some(
            r#"```json
{"overall_assessment": "**Strong** fit with `Python`", "ats_score": 78}
```"#,
        ));
        let match_result = MatchResult {
            matched_skills: skills(&["Python"]),
            unmatched_skills: vec![],
            match_percentage: 100,
        };
        let report = synthesize_report(
            "resume",
            &SkillTaxonomy::flat(skills(&["Python"])),
            &match_result,
            &oracle,
        )
        .await;

        assert_eq!(report["overall_assessment"], "Strong fit with Python");
        assert_eq!(report["ats_score"], 78);
    }

    #[tokio::test]
    async fn test_unparseable_output_yields_failsafe() {
        let oracle = StubOracle(Some("I'm sorry, I can't produce JSON today."));
        let match_result = MatchResult {
            matched_skills: vec![],
            unmatched_skills: skills(&["AWS", "Python", "Leadership", "Kafka"]),
            match_percentage: 0,
        };
        let report = synthesize_report(
            "resume",
            &SkillTaxonomy::flat(match_result.unmatched_skills.clone()),
            &match_result,
            &oracle,
        )
        .await;

        assert_eq!(report["ats_score"], FAILSAFE_SENTINEL);
        // At most 3 priority skills, taken from the front of unmatched.
        assert_eq!(
            report["priority_skills"],
            serde_json::json!(["AWS", "Python", "Leadership"])
        );
    }

    #[test]
    fn test_coverage_summary_marks_matches() {
        let taxonomy = SkillTaxonomy {
            technical_skills: skills(&["Rust", "AWS"]),
            soft_skills: skills(&["Teamwork"]),
            domain_knowledge: vec![],
        };
        let summary = coverage_summary(&taxonomy, &skills(&["Rust"]));
        assert!(summary.contains("- ✓ Rust"));
        assert!(summary.contains("- ✗ AWS"));
        assert!(summary.contains("- ✗ Teamwork"));
        assert!(summary.starts_with("Technical Skills:\n"));
    }

    #[tokio::test]
    async fn test_end_to_end_oracle_unavailable() {
        // Oracle down: matching degrades to substring search, the report to
        // the failsafe record. The resume mentions python verbatim and
        // nothing else from the list.
        let oracle = StubOracle(None);
        let required = skills(&["AWS", "Python", "Leadership"]);
        let report = analyze_resume(
            "seasoned python developer with strong communication",
            &required,
            None,
            &oracle,
        )
        .await;

        assert_eq!(report.matched_skills, vec!["Python"]);
        assert_eq!(report.unmatched_skills, vec!["AWS", "Leadership"]);
        assert_eq!(report.match_percentage, 33);
        assert_eq!(report.emotion, "Moderate Gaps");
        assert_eq!(
            report.category_analysis.technical_skills.match_percentage,
            33
        );
        assert_eq!(report.detailed_analysis["ats_score"], FAILSAFE_SENTINEL);
    }

    #[tokio::test]
    async fn test_empty_required_skills_scores_zero() {
        let oracle = StubOracle(None);
        let report = analyze_resume("any resume", &[], None, &oracle).await;
        assert_eq!(report.match_percentage, 0);
        assert_eq!(report.emotion, "Critical Gaps");
        assert!(report.matched_skills.is_empty());
        assert!(report.unmatched_skills.is_empty());
    }
}
