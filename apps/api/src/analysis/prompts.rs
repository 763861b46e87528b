// All LLM prompt constants for the analysis pipeline.
// Each template uses `{placeholder}` substitution via `str::replace`.

/// System prompt for skill extraction — enforces JSON-only output.
pub const SKILL_EXTRACT_SYSTEM: &str =
    "You are an expert job description analyst. \
    Extract and categorize the skills a job description requires. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Skill extraction prompt template. Replace `{job_description}` before sending.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract skills in these categories:
1. Technical Skills: programming languages, tools, platforms, etc.
2. Soft Skills: communication, teamwork, leadership, etc.
3. Domain Knowledge: industry-specific knowledge, regulations, etc.

Return a JSON object with exactly these three keys, each holding an array of skill strings:
{
  "Technical Skills": ["..."],
  "Soft Skills": ["..."],
  "Domain Knowledge": ["..."]
}

JOB DESCRIPTION:
{job_description}"#;

/// System prompt for skill matching — enforces JSON-only output.
pub const SKILL_MATCH_SYSTEM: &str =
    "You are an expert resume-parser AI. \
    Decide which required skills a resume demonstrates. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Skill matching prompt template.
/// Replace `{required_skills}` (JSON array) and `{resume_text}` before sending.
pub const SKILL_MATCH_PROMPT_TEMPLATE: &str = r#"Given a list of REQUIRED_SKILLS and a RESUME_TEXT, identify exactly which skills are present or clearly implied in the resume. Handle synonyms, related terms, and context. Do not just do substring checks.

REQUIRED_SKILLS: {required_skills}

RESUME_TEXT:
{resume_text}

Return JSON ONLY, in this exact shape:
{
  "matched_skills": ["skills from REQUIRED_SKILLS that are present or implied"],
  "unmatched_skills": ["the rest"]
}"#;

/// System prompt for the detailed qualitative report.
pub const DETAILED_ANALYSIS_SYSTEM: &str =
    "You are an expert JD-based resume tuner AI. \
    Analyze a candidate's resume against a job's required skills. \
    You MUST respond with one flat valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Detailed report prompt template.
/// Replace `{resume_text}` and `{skills_summary}` before sending.
/// The 27-key contract is fixed; key order matters for downstream rendering.
pub const DETAILED_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the candidate's resume against the target job's required skills and output one flat JSON object with these keys in exactly this order:

  1. overall_assessment (string): 1-2 sentences on fit and gaps.
  2. ats_score (integer): 0-100 based on keyword coverage, synonyms, placement, and section weight.
  3. keyword_density (object): {"matched": int, "missing": int, "total_required": int}.
  4. quick_fixes (array[string]): Top 3 bullet edits deliverable in under 5 minutes.
  5. priority_skills (array[string]): Top 5 REQUIRED_SKILLS to highlight immediately.
  6. missing_skills (array[string]): REQUIRED_SKILLS not mentioned at all.
  7. recommendations (array[string]): Up to 5 medium-term resume rewrites, each flagged High/Med/Low impact.
  8. sections_to_improve (array[string]): Exact sections to re-order or rewrite (e.g., "Summary", "Projects") including details of what is missing.
  9. formatting_tips (array[string]): Filetype, layout, font-size, and ATS-friendly design suggestions.
  10. action_verbs (array[string]): Identify and guide users on which lines to change to start with strong, dynamic verbs.
  11. confidence_score (integer): 0-100 indicating reliability of this analysis.
  12. tone (string): detected tone of the resume (e.g., professional, enthusiastic).
  13. behavioral_analysis (object): ratings for key traits, e.g. {"leadership": string, "teamwork": string, "adaptability": string}.
  14. assertiveness_level (integer): 0-100 based on level of assertiveness in language.
  15. clarity (integer): 0-100 based on level of clarity in descriptions.
  16. emotional_intelligence (integer): 0-100 based on presence of emotional intelligence cues.
  17. customization_level (integer): 0-100 based on degree of tailoring to the job.
  18. quantification_strength (integer): 0-100 based on strength of numeric data usage.
  19. readability_score (integer): 0-100 based on readability of the resume.
  20. grammar_accuracy (integer): 0-100 based on grammar accuracy status.
  21. structure_coherence (integer): 0-100 based on structural coherence status.
  22. conciseness (integer): 0-100 based on conciseness evaluation.
  23. achievement_focus (integer): 0-100 based on focus on achievements.
  24. leadership_emphasis (integer): 0-100 based on emphasis on leadership.
  25. teamwork_emphasis (integer): 0-100 based on emphasis on teamwork.
  26. metric_usage (integer): 0-100 based on frequency of metric usage.
  27. behavioral_score (integer): 0-100 based on ratings for key matching traits and behaviour analysis from the resume.

Inputs (do not hallucinate, use only what is provided):
  RESUME_TEXT:
  {resume_text}

  REQUIRED_SKILLS (check mark = present in resume, cross mark = absent):
  {skills_summary}

Rules:
  - Synonyms: Treat common variants (e.g., "AWS" and "Amazon Web Services") as matches for scoring.
  - Scoring: Base ats_score on matched vs required keywords, their placement (heading vs body), and section weight (Skills > Experience > Education).
  - Impact ranking: Label each recommendation as High/Med/Low based on lift in match rate.
  - Output: Return only the JSON object. No extra text, no markdown, no nesting beyond the specified objects."#;
