//! Gap Report assembly.
//!
//! Pure data composition: the matcher's verdicts and the score breakdown
//! are packaged into the response structure. The only logic here is the
//! cross-category dedup rule: a skill listed as both required and preferred
//! is classified required only, so it can never be counted twice.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::matcher::SkillVerdict;
use crate::analysis::scoring::ScoreBreakdown;

/// Full gap analysis result returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub match_score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub score_breakdown: ScoreBreakdown,

    pub matching_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matching_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,

    /// Profile skills the matching ran against, post-normalization.
    pub profile_skills: Vec<String>,
    /// Per-target-skill evidence: best profile match and its similarity.
    pub match_details: Vec<SkillVerdict>,

    /// Filled by the insights step after assembly; empty until then.
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,

    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
}

/// Removes from `preferred` every label already present (case-insensitively)
/// in `required`. Required classification takes precedence.
pub fn dedupe_across_categories(required: &[String], preferred: Vec<String>) -> Vec<String> {
    let required_keys: std::collections::HashSet<String> =
        required.iter().map(|s| s.to_lowercase()).collect();

    preferred
        .into_iter()
        .filter(|label| !required_keys.contains(&label.to_lowercase()))
        .collect()
}

/// Packages matcher output and the score breakdown into a `GapReport`.
/// Combined lists concatenate required results before preferred ones.
pub fn assemble(
    profile_skills: Vec<String>,
    required_verdicts: Vec<SkillVerdict>,
    preferred_verdicts: Vec<SkillVerdict>,
    breakdown: ScoreBreakdown,
) -> GapReport {
    let (matching_required, missing_required) =
        crate::analysis::matcher::partition(&required_verdicts);
    let (matching_preferred, missing_preferred) =
        crate::analysis::matcher::partition(&preferred_verdicts);

    let matching_skills = [matching_required.clone(), matching_preferred.clone()].concat();
    let missing_skills = [missing_required.clone(), missing_preferred.clone()].concat();

    let mut match_details = required_verdicts;
    match_details.extend(preferred_verdicts);

    GapReport {
        match_score: breakdown.total(),
        matching_skills,
        missing_skills,
        score_breakdown: breakdown,
        matching_required,
        missing_required,
        matching_preferred,
        missing_preferred,
        profile_skills,
        match_details,
        strengths: vec![],
        recommendations: vec![],
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(skill: &str, matched: bool, similarity: f32) -> SkillVerdict {
        SkillVerdict {
            skill: skill.to_string(),
            matched,
            similarity,
            best_profile_skill: matched.then(|| "Python".to_string()),
        }
    }

    #[test]
    fn test_dedupe_drops_preferred_labels_already_required() {
        let required = vec!["Python".to_string(), "Kubernetes".to_string()];
        let preferred = vec!["python".to_string(), "AWS".to_string()];
        assert_eq!(
            dedupe_across_categories(&required, preferred),
            vec!["AWS"]
        );
    }

    #[test]
    fn test_dedupe_keeps_disjoint_preferred_list_intact() {
        let required = vec!["Rust".to_string()];
        let preferred = vec!["AWS".to_string(), "Terraform".to_string()];
        assert_eq!(
            dedupe_across_categories(&required, preferred),
            vec!["AWS", "Terraform"]
        );
    }

    #[test]
    fn test_assemble_concatenates_required_before_preferred() {
        let report = assemble(
            vec!["Python".to_string()],
            vec![verdict("Python", true, 1.0), verdict("Kubernetes", false, 0.3)],
            vec![verdict("AWS", false, 0.4)],
            crate::analysis::scoring::score(1, 2, 0, 1),
        );

        assert_eq!(report.match_score, 35);
        assert_eq!(report.matching_skills, vec!["Python"]);
        assert_eq!(report.missing_skills, vec!["Kubernetes", "AWS"]);
        assert_eq!(report.matching_required, vec!["Python"]);
        assert_eq!(report.missing_preferred, vec!["AWS"]);
        assert_eq!(report.match_details.len(), 3);
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_report_serializes_core_response_fields() {
        let report = assemble(
            vec![],
            vec![],
            vec![],
            crate::analysis::scoring::score(0, 0, 0, 0),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["match_score"], 70);
        assert!(json["matching_skills"].as_array().unwrap().is_empty());
        assert!(json["missing_skills"].as_array().unwrap().is_empty());
        assert_eq!(json["score_breakdown"]["required_skills"], 70);
        assert_eq!(json["score_breakdown"]["preferred_skills"], 0);
    }
}
