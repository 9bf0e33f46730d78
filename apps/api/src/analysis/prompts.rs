// All LLM prompt constants for the Analysis module.

/// System prompt for skill extraction — enforces JSON-only output.
pub const EXTRACTION_SYSTEM: &str =
    "You are an expert technical recruiter and data extraction specialist. \
    Extract skill labels from the provided text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Stricter system prompt used for the single retry after a parse failure.
pub const EXTRACTION_SYSTEM_STRICT: &str =
    "You are a JSON generator. Return ONLY the requested JSON object, \
    starting with '{' and ending with '}'. \
    No prose, no markdown, no code fences, no commentary of any kind.";

/// Profile extraction prompt template. Replace `{resume_text}` before sending.
pub const PROFILE_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract every technical skill from the following resume.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["Python", "FastAPI", "Docker"]
}

Rules for extraction:
- Include skills named in dedicated skill sections AND skills implied by
  experience or project descriptions (e.g. "fine-tuned Llama-3 70B" yields
  "Llama-3" and "Fine-tuning").
- Use short canonical labels ("PostgreSQL", not "worked with PostgreSQL databases").
- Avoid duplicates.

RESUME:
{resume_text}"#;

/// JD extraction prompt template. Replace `{jd_text}` before sending.
pub const JD_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the required and preferred skills from the following job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "required_skills": ["Python", "Kubernetes"],
  "preferred_skills": ["AWS"]
}

Rules for extraction:
- REQUIRED: must-have skills — phrases like "required", "must have", "you will need", minimum years with a technology.
- PREFERRED: nice-to-haves — phrases like "preferred", "bonus", "nice to have", "a plus".
- Extract actual skill names (e.g. "Python", "React", "Docker"), not full sentences.
- Be thorough but avoid duplicates.

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for insights generation.
pub const INSIGHTS_SYSTEM: &str =
    "You are an experienced career coach reviewing a skill gap analysis. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Insights prompt template.
/// Replace: {match_score}, {matching_skills}, {missing_required}, {missing_preferred}
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Based on this skill gap analysis, provide personalized insights.

Match score: {match_score}/100
Matched skills: {matching_skills}
Missing required skills: {missing_required}
Missing preferred skills: {missing_preferred}

Return a JSON object:
{
  "strengths": ["3-5 specific strengths based on the matched skills"],
  "recommendations": ["3-5 actionable recommendations, missing required skills first"]
}

Guidelines:
- Be specific and actionable.
- Prioritize missing required skills over preferred ones.
- Suggest realistic learning paths."#;
