//! Insights — strengths and recommendations generated from a finished
//! gap report.
//!
//! Best-effort: an LLM failure here falls back to stub insights derived
//! from the matched/missing lists. The deterministic score must never be
//! lost because the narrative layer was unavailable.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::prompts::{INSIGHTS_PROMPT_TEMPLATE, INSIGHTS_SYSTEM};
use crate::analysis::report::GapReport;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Generates strengths/recommendations for the report. Falls back to
/// `fallback_insights` on any LLM error.
pub async fn generate_insights(llm: &LlmClient, report: &GapReport) -> Insights {
    let prompt = INSIGHTS_PROMPT_TEMPLATE
        .replace("{match_score}", &report.match_score.to_string())
        .replace("{matching_skills}", &report.matching_skills.join(", "))
        .replace("{missing_required}", &report.missing_required.join(", "))
        .replace("{missing_preferred}", &report.missing_preferred.join(", "));

    match llm.call_json::<Insights>(&prompt, INSIGHTS_SYSTEM).await {
        Ok(insights) => insights,
        Err(e) => {
            warn!("Insights generation failed, using fallback: {e}");
            fallback_insights(report)
        }
    }
}

/// Stub insights built directly from the match lists, missing required
/// skills first.
fn fallback_insights(report: &GapReport) -> Insights {
    let strengths = report
        .matching_skills
        .iter()
        .take(3)
        .map(|skill| format!("Solid footing in {skill}"))
        .collect();

    let recommendations = report
        .missing_required
        .iter()
        .chain(report.missing_preferred.iter())
        .take(3)
        .map(|skill| format!("Build hands-on experience with {skill}"))
        .collect();

    Insights {
        strengths,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scoring;

    fn report_with(matching: &[&str], missing_required: &[&str]) -> GapReport {
        let mut report = crate::analysis::report::assemble(
            vec![],
            vec![],
            vec![],
            scoring::score(0, 0, 0, 0),
        );
        report.matching_skills = matching.iter().map(|s| s.to_string()).collect();
        report.missing_required = missing_required.iter().map(|s| s.to_string()).collect();
        report
    }

    #[test]
    fn test_fallback_names_matched_and_missing_skills() {
        let report = report_with(&["Python"], &["Kubernetes"]);
        let insights = fallback_insights(&report);

        assert_eq!(insights.strengths.len(), 1);
        assert!(insights.strengths[0].contains("Python"));
        assert_eq!(insights.recommendations.len(), 1);
        assert!(insights.recommendations[0].contains("Kubernetes"));
    }

    #[test]
    fn test_fallback_caps_each_list_at_three() {
        let report = report_with(
            &["A", "B", "C", "D", "E"],
            &["F", "G", "H", "I"],
        );
        let insights = fallback_insights(&report);
        assert_eq!(insights.strengths.len(), 3);
        assert_eq!(insights.recommendations.len(), 3);
    }

    #[test]
    fn test_fallback_handles_empty_report() {
        let report = report_with(&[], &[]);
        let insights = fallback_insights(&report);
        assert!(insights.strengths.is_empty());
        assert!(insights.recommendations.is_empty());
    }

    #[test]
    fn test_insights_deserialize_with_missing_keys() {
        let insights: Insights = serde_json::from_str("{}").unwrap();
        assert!(insights.strengths.is_empty());
        assert!(insights.recommendations.is_empty());
    }
}
