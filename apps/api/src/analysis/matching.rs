//! Skill matching — partitions the required-skill list into matched and
//! unmatched against the resume, plus the per-category aggregation and the
//! gap-tier classifier.
//!
//! Primary path is a synonym-aware oracle call; any failure along it (call
//! failure, unparseable output, malformed shape) drops to a deterministic
//! case-insensitive substring search. The fallback is strictly less capable,
//! so its activation is logged at `warn` to keep the two paths
//! distinguishable in telemetry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::prompts::{SKILL_MATCH_PROMPT_TEMPLATE, SKILL_MATCH_SYSTEM};
use crate::analysis::skills::SkillTaxonomy;
use crate::llm_client::{extract_json, Oracle};

/// Result of matching the required skills against a resume.
///
/// Invariant: `matched_skills` and `unmatched_skills` are disjoint and
/// together cover the required-skill list exactly, in its original order.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub matched_skills: Vec<String>,
    pub unmatched_skills: Vec<String>,
    pub match_percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryMatch {
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
    pub match_percentage: u32,
}

/// Per-category breakdown, derived purely from the global [`MatchResult`].
#[derive(Debug, Clone, Serialize)]
pub struct CategoryAnalysis {
    #[serde(rename = "Technical Skills")]
    pub technical_skills: CategoryMatch,
    #[serde(rename = "Soft Skills")]
    pub soft_skills: CategoryMatch,
    #[serde(rename = "Domain Knowledge")]
    pub domain_knowledge: CategoryMatch,
}

/// Expected shape of the oracle's match response. Missing keys or wrong
/// value types are a parse failure and trigger the fallback.
#[derive(Debug, Deserialize)]
struct OracleMatch {
    matched_skills: Vec<String>,
    #[allow(dead_code)]
    unmatched_skills: Vec<String>,
}

/// Matches required skills against the resume text. Never fails: the
/// substring fallback covers every primary-path failure mode.
pub async fn match_skills(
    resume_text: &str,
    required_skills: &[String],
    oracle: &dyn Oracle,
) -> MatchResult {
    let (matched, unmatched) = match oracle_match(resume_text, required_skills, oracle).await {
        Ok(partition) => partition,
        Err(e) => {
            warn!("skill matching fell back to substring search: {e:#}");
            substring_match(resume_text, required_skills)
        }
    };

    let match_percentage = percentage(matched.len(), required_skills.len());
    MatchResult {
        matched_skills: matched,
        unmatched_skills: unmatched,
        match_percentage,
    }
}

/// Primary path: ask the oracle to partition the skills, synonym-aware.
/// The oracle's answer is normalized against the required list (intersection
/// in required order) so invented, duplicated, or dropped skills cannot
/// break the MatchResult invariant.
async fn oracle_match(
    resume_text: &str,
    required_skills: &[String],
    oracle: &dyn Oracle,
) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    let skills_json = serde_json::to_string(required_skills)?;
    let prompt = SKILL_MATCH_PROMPT_TEMPLATE
        .replace("{required_skills}", &skills_json)
        .replace("{resume_text}", resume_text);

    let raw = oracle.generate(&prompt, SKILL_MATCH_SYSTEM).await?;
    let value = extract_json(&raw)?;
    let response: OracleMatch = serde_json::from_value(value)?;

    let matched_set: HashSet<&str> = response.matched_skills.iter().map(String::as_str).collect();
    Ok(required_skills
        .iter()
        .cloned()
        .partition(|skill| matched_set.contains(skill.as_str())))
}

/// Fallback path: a skill matches iff its lowercased form is a literal
/// substring of the lowercased resume text. Deterministic, no synonym
/// resolution.
fn substring_match(resume_text: &str, required_skills: &[String]) -> (Vec<String>, Vec<String>) {
    let resume_lower = resume_text.to_lowercase();
    required_skills
        .iter()
        .cloned()
        .partition(|skill| resume_lower.contains(&skill.to_lowercase()))
}

/// Integer percentage, rounded half-away-from-zero (half-up for the
/// non-negative values used here). 0 when `total` is 0. The same rule is
/// used for the global percentage and every category percentage.
pub(crate) fn percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((matched as f64 / total as f64) * 100.0).round() as u32
}

/// Recomputes per-category matched/unmatched sets by intersecting each
/// category's skill list against the global result. Pure function, no
/// oracle call, so category results always agree with the global partition.
pub fn aggregate_categories(taxonomy: &SkillTaxonomy, result: &MatchResult) -> CategoryAnalysis {
    CategoryAnalysis {
        technical_skills: category_match(&taxonomy.technical_skills, result),
        soft_skills: category_match(&taxonomy.soft_skills, result),
        domain_knowledge: category_match(&taxonomy.domain_knowledge, result),
    }
}

fn category_match(skills: &[String], result: &MatchResult) -> CategoryMatch {
    let matched: Vec<String> = skills
        .iter()
        .filter(|s| result.matched_skills.contains(s))
        .cloned()
        .collect();
    let unmatched: Vec<String> = skills
        .iter()
        .filter(|s| result.unmatched_skills.contains(s))
        .cloned()
        .collect();
    let match_percentage = percentage(matched.len(), skills.len());
    CategoryMatch {
        matched,
        unmatched,
        match_percentage,
    }
}

/// Deterministic bucketing of the overall match percentage into ten
/// contiguous 10-point bands, from <10 to the open-ended >=90 band.
pub fn gap_tier(match_percentage: u32) -> &'static str {
    match match_percentage {
        0..=9 => "Critical Gaps",
        10..=19 => "Major Gaps",
        20..=29 => "Substantial Gaps",
        30..=39 => "Moderate Gaps",
        40..=49 => "Minor Gaps",
        50..=59 => "Fair Match",
        60..=69 => "Good Match",
        70..=79 => "Strong Match",
        80..=89 => "Excellent Match",
        _ => "Outstanding Fit",
    }
}
