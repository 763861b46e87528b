// LLM prompt constants for resume tailoring.

/// System prompt for the rewrite. Output is plain resume text, not JSON.
pub const TAILOR_SYSTEM: &str =
    "You are an expert resume writer. \
    Rewrite resumes to target a specific job description while staying \
    truthful to the original content. \
    Return only the rewritten resume text, with no commentary before or \
    after it and no markdown formatting.";

/// Rewrite prompt template.
/// Replace `{resume_text}` and `{job_description}` before sending.
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Given this resume:
{resume_text}

and this job description:
{job_description}

Rewrite the resume to highlight relevant skills and experience, focusing on:
1. Matching job requirements
2. Emphasizing transferable skills
3. Using industry-specific keywords
4. Maintaining professional tone
5. Structure the resume with clear sections for: Contact Information, Professional Summary, Work Experience, Skills, Education.
6. Format each job entry with company, title, dates, and bullet points for achievements.
7. IMPORTANT: Keep the resume concise to fit on ONE page. Do not use asterisk (*) symbols for bullet points - use hyphens (-) instead.
8. Avoid leaving large gaps between sections and keep descriptions brief but impactful.
9. Use periods at the end of achievement statements only if they form complete sentences."#;
