//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::extractor::JdSkills;
use crate::analysis::insights::generate_insights;
use crate::analysis::pipeline::{analyze_gap, GapAnalysisRequest, Thresholds};
use crate::analysis::report::GapReport;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractJdResponse {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
}

impl From<JdSkills> for ExtractJdResponse {
    fn from(skills: JdSkills) -> Self {
        Self {
            required_skills: skills.required,
            preferred_skills: skills.preferred,
        }
    }
}

/// POST /api/v1/analysis/jd-skills
///
/// Extraction preview: returns the required/preferred skill lists for a JD
/// without running the matcher. Useful for inspecting extraction before a
/// full analysis.
pub async fn handle_extract_jd(
    State(state): State<AppState>,
    Json(request): Json<ExtractJdRequest>,
) -> Result<Json<ExtractJdResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let skills = state.extractor.extract_jd_skills(&request.jd_text).await?;

    Ok(Json(skills.into()))
}

/// POST /api/v1/analysis/gap
///
/// Full pipeline: extract (where raw text was given) -> match -> score ->
/// insights. The deterministic report is computed first; insights are
/// best-effort on top.
pub async fn handle_gap_analysis(
    State(state): State<AppState>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<GapReport>, AppError> {
    let thresholds = Thresholds {
        required: state.config.required_threshold,
        preferred: state.config.preferred_threshold,
    };

    let mut report = analyze_gap(
        state.extractor.as_ref(),
        state.embedder.as_ref(),
        thresholds,
        request,
    )
    .await?;

    let insights = generate_insights(&state.llm, &report).await;
    report.strengths = insights.strengths;
    report.recommendations = insights.recommendations;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_request_deserializes_minimal_body() {
        let json = serde_json::json!({
            "profile_skills": ["Python", "React"],
            "jd_text": "We need a Python engineer. Kubernetes required, AWS a plus."
        });
        let request: GapAnalysisRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.profile_skills.unwrap().len(), 2);
        assert!(request.required_skills.is_none());
        assert!(request.required_threshold.is_none());
    }

    #[test]
    fn test_gap_request_deserializes_threshold_overrides() {
        let json = serde_json::json!({
            "resume_text": "Five years of Python.",
            "jd_text": "Python required.",
            "required_threshold": 0.85,
            "preferred_threshold": 0.6
        });
        let request: GapAnalysisRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.required_threshold, Some(0.85));
        assert_eq!(request.preferred_threshold, Some(0.6));
    }

    #[test]
    fn test_extract_jd_response_from_jd_skills() {
        let response: ExtractJdResponse = JdSkills {
            required: vec!["Python".to_string()],
            preferred: vec!["AWS".to_string()],
        }
        .into();
        assert_eq!(response.required_skills, vec!["Python"]);
        assert_eq!(response.preferred_skills, vec!["AWS"]);
    }
}
