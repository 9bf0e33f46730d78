//! Gap Analysis pipeline.
//!
//! Flow: resolve skill sets (extract from raw text where needed, in
//! parallel) -> dedupe preferred against required -> embed profile and
//! target batches in parallel -> classify per category -> score ->
//! assemble report.
//!
//! Everything after embedding is pure computation; reruns with identical
//! extraction output and embeddings produce identical reports.

use serde::Deserialize;
use tracing::info;

use crate::analysis::extractor::{normalize_labels, JdSkills, SkillExtractor};
use crate::analysis::matcher::{classify, SkillVerdict};
use crate::analysis::report::{assemble, dedupe_across_categories, GapReport};
use crate::analysis::scoring::score;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::errors::AppError;

/// Request body for gap analysis. Each side accepts either raw text or a
/// pre-extracted skill list; a pre-extracted list wins when both are given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GapAnalysisRequest {
    pub profile_skills: Option<Vec<String>>,
    pub resume_text: Option<String>,

    pub required_skills: Option<Vec<String>>,
    pub preferred_skills: Option<Vec<String>>,
    pub jd_text: Option<String>,

    pub required_threshold: Option<f32>,
    pub preferred_threshold: Option<f32>,
}

/// Category thresholds after request overrides are applied to the
/// configured defaults.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub required: f32,
    pub preferred: f32,
}

impl GapAnalysisRequest {
    /// Rejects requests that would force an external call with nothing to
    /// send. Runs before any provider is contacted.
    pub fn validate(&self) -> Result<(), AppError> {
        let has_profile = self.profile_skills.is_some() || has_text(&self.resume_text);
        if !has_profile {
            return Err(AppError::Validation(
                "Provide profile_skills or resume_text".to_string(),
            ));
        }

        let has_jd = self.required_skills.is_some()
            || self.preferred_skills.is_some()
            || has_text(&self.jd_text);
        if !has_jd {
            return Err(AppError::Validation(
                "Provide jd_text or required_skills/preferred_skills".to_string(),
            ));
        }

        Ok(())
    }
}

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// Runs the full gap analysis. Insights are filled in by the caller
/// afterwards; the report leaves here with empty strength/recommendation
/// lists.
pub async fn analyze_gap(
    extractor: &dyn SkillExtractor,
    embedder: &dyn EmbeddingProvider,
    thresholds: Thresholds,
    request: GapAnalysisRequest,
) -> Result<GapReport, AppError> {
    request.validate()?;

    let thresholds = Thresholds {
        required: request.required_threshold.unwrap_or(thresholds.required),
        preferred: request.preferred_threshold.unwrap_or(thresholds.preferred),
    };

    let (profile_skills, jd_skills) = resolve_skill_sets(extractor, &request).await?;

    // Required classification wins: drop duplicates from the preferred list
    // before they can be embedded or counted.
    let required = jd_skills.required;
    let preferred = dedupe_across_categories(&required, jd_skills.preferred);

    info!(
        "Matching {} profile skills against {} required / {} preferred",
        profile_skills.len(),
        required.len(),
        preferred.len()
    );

    let (required_verdicts, preferred_verdicts) = match_categories(
        embedder,
        &profile_skills,
        &required,
        &preferred,
        thresholds,
    )
    .await?;

    let required_matched = required_verdicts.iter().filter(|v| v.matched).count();
    let preferred_matched = preferred_verdicts.iter().filter(|v| v.matched).count();
    let breakdown = score(
        required_matched,
        required.len(),
        preferred_matched,
        preferred.len(),
    );

    Ok(assemble(
        profile_skills,
        required_verdicts,
        preferred_verdicts,
        breakdown,
    ))
}

/// Resolves both skill sets, extracting from raw text where no
/// pre-extracted list was supplied. The two extraction calls have no data
/// dependency and are dispatched concurrently.
async fn resolve_skill_sets(
    extractor: &dyn SkillExtractor,
    request: &GapAnalysisRequest,
) -> Result<(Vec<String>, JdSkills), AppError> {
    let profile_future = async {
        match &request.profile_skills {
            Some(skills) => Ok(normalize_labels(skills.clone())),
            None => {
                let text = request.resume_text.as_deref().unwrap_or_default();
                extractor.extract_profile_skills(text).await
            }
        }
    };

    let jd_future = async {
        if request.required_skills.is_some() || request.preferred_skills.is_some() {
            Ok(JdSkills {
                required: normalize_labels(request.required_skills.clone().unwrap_or_default()),
                preferred: normalize_labels(request.preferred_skills.clone().unwrap_or_default()),
            })
        } else {
            let text = request.jd_text.as_deref().unwrap_or_default();
            extractor.extract_jd_skills(text).await
        }
    };

    let (profile, jd) = tokio::join!(profile_future, jd_future);
    Ok((profile?, jd?))
}

/// Embeds the profile and target batches concurrently, then classifies each
/// category with its own threshold. Skips embedding entirely when one side
/// has nothing to embed.
async fn match_categories(
    embedder: &dyn EmbeddingProvider,
    profile_skills: &[String],
    required: &[String],
    preferred: &[String],
    thresholds: Thresholds,
) -> Result<(Vec<SkillVerdict>, Vec<SkillVerdict>), AppError> {
    // An empty profile or empty target set never reaches the provider.
    if profile_skills.is_empty() || (required.is_empty() && preferred.is_empty()) {
        let required_verdicts = classify(profile_skills, &[], required, &[], thresholds.required);
        let preferred_verdicts =
            classify(profile_skills, &[], preferred, &[], thresholds.preferred);
        return Ok((required_verdicts, preferred_verdicts));
    }

    let (profile_vecs, required_vecs, preferred_vecs) = tokio::try_join!(
        embedder.embed(profile_skills),
        embedder.embed(required),
        embedder.embed(preferred),
    )
    .map_err(embedding_unavailable)?;

    let required_verdicts = classify(
        profile_skills,
        &profile_vecs,
        required,
        &required_vecs,
        thresholds.required,
    );
    let preferred_verdicts = classify(
        profile_skills,
        &profile_vecs,
        preferred,
        &preferred_vecs,
        thresholds.preferred,
    );

    Ok((required_verdicts, preferred_verdicts))
}

fn embedding_unavailable(error: EmbeddingError) -> AppError {
    AppError::EmbeddingUnavailable(error.to_string())
}
