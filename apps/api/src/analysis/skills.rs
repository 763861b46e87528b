//! Skill extraction — categorizes a job description's skills into the fixed
//! three-category taxonomy, with a flat comma-split fallback when the model
//! response carries no usable JSON.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::prompts::{SKILL_EXTRACT_PROMPT_TEMPLATE, SKILL_EXTRACT_SYSTEM};
use crate::llm_client::{extract_json, Oracle, OracleError};

/// The fixed skill taxonomy. Field order is the canonical category order;
/// categories missing from the oracle's response default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    #[serde(rename = "Technical Skills", default)]
    pub technical_skills: Vec<String>,
    #[serde(rename = "Soft Skills", default)]
    pub soft_skills: Vec<String>,
    #[serde(rename = "Domain Knowledge", default)]
    pub domain_knowledge: Vec<String>,
}

impl SkillTaxonomy {
    /// Taxonomy with every skill filed under Technical Skills. Used by the
    /// comma-split fallback and by callers that only have a flat list.
    pub fn flat(skills: Vec<String>) -> Self {
        Self {
            technical_skills: skills,
            ..Default::default()
        }
    }

    pub fn categories(&self) -> [(&'static str, &[String]); 3] {
        [
            ("Technical Skills", self.technical_skills.as_slice()),
            ("Soft Skills", self.soft_skills.as_slice()),
            ("Domain Knowledge", self.domain_knowledge.as_slice()),
        ]
    }

    /// All skills flattened in category order.
    pub fn all_skills(&self) -> Vec<String> {
        self.categories()
            .iter()
            .flat_map(|(_, skills)| skills.iter().cloned())
            .collect()
    }
}

/// Extracts a categorized skill taxonomy from a (sanitized) job description.
///
/// Primary path: one oracle call returning the three-category JSON object.
/// If the structured output cannot be parsed, the raw response is split on
/// commas and filed under Technical Skills — so the stage succeeds whenever
/// the oracle returns any text at all. Only an oracle transport failure
/// propagates.
pub async fn extract_skills(
    job_description: &str,
    oracle: &dyn Oracle,
) -> Result<SkillTaxonomy, OracleError> {
    let prompt = SKILL_EXTRACT_PROMPT_TEMPLATE.replace("{job_description}", job_description);
    let raw = oracle.generate(&prompt, SKILL_EXTRACT_SYSTEM).await?;

    let parsed = extract_json(&raw)
        .map_err(anyhow::Error::from)
        .and_then(|value| serde_json::from_value::<SkillTaxonomy>(value).map_err(Into::into));

    match parsed {
        Ok(taxonomy) => Ok(taxonomy),
        Err(e) => {
            warn!("skill extraction fell back to comma-split: {e:#}");
            Ok(comma_split_fallback(&raw))
        }
    }
}

fn comma_split_fallback(raw: &str) -> SkillTaxonomy {
    let skills = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    SkillTaxonomy::flat(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::StubOracle;

    #[tokio::test]
    async fn test_extracts_categorized_taxonomy() {
        let oracle = StubOracle(Some(
            r#"{"Technical Skills": ["Rust", "AWS"], "Soft Skills": ["Communication"], "Domain Knowledge": ["Fintech"]}"#,
        ));
        let taxonomy = extract_skills("some JD", &oracle).await.unwrap();
        assert_eq!(taxonomy.technical_skills, vec!["Rust", "AWS"]);
        assert_eq!(taxonomy.soft_skills, vec!["Communication"]);
        assert_eq!(taxonomy.domain_knowledge, vec!["Fintech"]);
    }

    #[tokio::test]
    async fn test_missing_categories_default_to_empty() {
        let oracle = StubOracle(Some(r#"{"Technical Skills": ["Python"]}"#));
        let taxonomy = extract_skills("some JD", &oracle).await.unwrap();
        assert_eq!(taxonomy.technical_skills, vec!["Python"]);
        assert!(taxonomy.soft_skills.is_empty());
        assert!(taxonomy.domain_knowledge.is_empty());
    }

    #[tokio::test]
    async fn test_fenced_response_is_parsed() {
        let oracle = StubOracle(Some(
            "```json\n{\"Technical Skills\": [\"Go\"], \"Soft Skills\": [], \"Domain Knowledge\": []}\n```",
        ));
        let taxonomy = extract_skills("some JD", &oracle).await.unwrap();
        assert_eq!(taxonomy.technical_skills, vec!["Go"]);
    }

    #[tokio::test]
    async fn test_non_json_response_falls_back_to_comma_split() {
        let oracle = StubOracle(Some("Python, SQL , Leadership,, Kubernetes"));
        let taxonomy = extract_skills("some JD", &oracle).await.unwrap();
        assert_eq!(
            taxonomy.technical_skills,
            vec!["Python", "SQL", "Leadership", "Kubernetes"]
        );
        assert!(taxonomy.soft_skills.is_empty());
        assert!(taxonomy.domain_knowledge.is_empty());
    }

    #[tokio::test]
    async fn test_oracle_transport_failure_propagates() {
        let oracle = StubOracle(None);
        assert!(extract_skills("some JD", &oracle).await.is_err());
    }

    #[test]
    fn test_all_skills_preserves_category_order() {
        let taxonomy = SkillTaxonomy {
            technical_skills: vec!["Rust".into()],
            soft_skills: vec!["Teamwork".into()],
            domain_knowledge: vec!["Banking".into()],
        };
        assert_eq!(taxonomy.all_skills(), vec!["Rust", "Teamwork", "Banking"]);
    }
}
