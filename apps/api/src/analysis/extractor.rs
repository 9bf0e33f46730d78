//! Skill Extraction — turns free-form resume / job description text into
//! normalized skill label lists via a single deterministic LLM call.
//!
//! Parse failures get exactly one retry with a stricter JSON-only system
//! prompt; a second failure surfaces `ExtractionFailed` with the raw model
//! output attached. An unparseable response is never turned into an empty
//! skill list.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::analysis::prompts::{
    EXTRACTION_SYSTEM, EXTRACTION_SYSTEM_STRICT, JD_EXTRACTION_PROMPT_TEMPLATE,
    PROFILE_EXTRACTION_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::{decode, LlmClient, LlmError};

/// Skills extracted from a job description, split by how hard the
/// requirement is.
#[derive(Debug, Clone, Default)]
pub struct JdSkills {
    pub required: Vec<String>,
    pub preferred: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileSkillsRaw {
    skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JdSkillsRaw {
    #[serde(default)]
    required_skills: Vec<String>,
    #[serde(default)]
    preferred_skills: Vec<String>,
}

/// Extracts skill labels from raw text. Implemented by the LLM extractor in
/// production and by fakes in pipeline tests.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract_profile_skills(&self, resume_text: &str) -> Result<Vec<String>, AppError>;

    async fn extract_jd_skills(&self, jd_text: &str) -> Result<JdSkills, AppError>;
}

/// Production extractor: one Messages API call per input, temperature 0.
pub struct LlmSkillExtractor {
    llm: LlmClient,
}

impl LlmSkillExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Calls the LLM and decodes the response as `T`. On a parse failure the
    /// call is repeated once with the strict system prompt before giving up.
    async fn call_with_parse_retry<T: serde::de::DeserializeOwned>(
        &self,
        prompt: &str,
        phase: &str,
    ) -> Result<T, AppError> {
        let mut last_raw = String::new();

        for (attempt, system) in [EXTRACTION_SYSTEM, EXTRACTION_SYSTEM_STRICT]
            .into_iter()
            .enumerate()
        {
            let response = self
                .llm
                .call(prompt, system)
                .await
                .map_err(|e| map_transport_error(e, phase))?;

            let raw = response.text().unwrap_or_default().to_string();

            match decode::decode_json::<T>(&raw) {
                Ok(parsed) => return Ok(parsed),
                Err(e) => {
                    warn!("{phase} extraction parse failed (attempt {}): {e}", attempt + 1);
                    last_raw = raw;
                }
            }
        }

        Err(AppError::ExtractionFailed {
            phase: phase.to_string(),
            raw_output: last_raw,
        })
    }
}

fn map_transport_error(error: LlmError, phase: &str) -> AppError {
    AppError::Llm(format!("{phase} extraction call failed: {error}"))
}

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn extract_profile_skills(&self, resume_text: &str) -> Result<Vec<String>, AppError> {
        let prompt = PROFILE_EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let raw: ProfileSkillsRaw = self.call_with_parse_retry(&prompt, "profile").await?;
        Ok(normalize_labels(raw.skills))
    }

    async fn extract_jd_skills(&self, jd_text: &str) -> Result<JdSkills, AppError> {
        let prompt = JD_EXTRACTION_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
        let raw: JdSkillsRaw = self.call_with_parse_retry(&prompt, "job description").await?;
        Ok(JdSkills {
            required: normalize_labels(raw.required_skills),
            preferred: normalize_labels(raw.preferred_skills),
        })
    }
}

/// Trims labels, drops empties, and collapses case-insensitive duplicates.
/// First-seen casing and insertion order are preserved.
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .filter_map(|label| {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                return None;
            }
            seen.insert(trimmed.to_lowercase())
                .then(|| trimmed.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_empty_labels() {
        let labels = vec![
            "  Python  ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "Rust".to_string(),
        ];
        assert_eq!(normalize_labels(labels), vec!["Python", "Rust"]);
    }

    #[test]
    fn test_normalize_dedups_case_insensitively_keeping_first_casing() {
        let labels = vec![
            "PostgreSQL".to_string(),
            "postgresql".to_string(),
            "POSTGRESQL".to_string(),
            "Redis".to_string(),
        ];
        assert_eq!(normalize_labels(labels), vec!["PostgreSQL", "Redis"]);
    }

    #[test]
    fn test_normalize_preserves_insertion_order() {
        let labels = vec!["C".to_string(), "B".to_string(), "A".to_string()];
        assert_eq!(normalize_labels(labels), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_jd_skills_raw_deserializes_full_object() {
        let json = r#"{
            "required_skills": ["Python", "Kubernetes"],
            "preferred_skills": ["AWS"]
        }"#;
        let raw: JdSkillsRaw = serde_json::from_str(json).unwrap();
        assert_eq!(raw.required_skills, vec!["Python", "Kubernetes"]);
        assert_eq!(raw.preferred_skills, vec!["AWS"]);
    }

    #[test]
    fn test_jd_skills_raw_missing_keys_default_to_empty() {
        let raw: JdSkillsRaw = serde_json::from_str("{}").unwrap();
        assert!(raw.required_skills.is_empty());
        assert!(raw.preferred_skills.is_empty());
    }

    #[test]
    fn test_profile_skills_raw_requires_skills_key() {
        assert!(serde_json::from_str::<ProfileSkillsRaw>("{}").is_err());
    }
}
