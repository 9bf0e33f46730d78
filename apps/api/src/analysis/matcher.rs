//! Skill Matching — classifies each target skill as matched or missing by
//! its best cosine similarity against the whole profile set.
//!
//! Pure functions over pre-computed unit vectors: given identical
//! embeddings, identical inputs always produce the identical partition.
//! The threshold is caller-supplied, so the same code runs for required and
//! preferred skills with different strictness.

use serde::Serialize;

/// Verdict for a single target skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillVerdict {
    pub skill: String,
    pub matched: bool,
    /// Highest cosine similarity found across the profile set.
    pub similarity: f32,
    /// The profile skill that produced that similarity, if any.
    pub best_profile_skill: Option<String>,
}

/// Dot product. Inputs are unit vectors, so this IS the cosine similarity.
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Similarity matrix: rows = profile skills, columns = target skills.
pub fn similarity_matrix(profile_vecs: &[Vec<f32>], target_vecs: &[Vec<f32>]) -> Vec<Vec<f32>> {
    profile_vecs
        .iter()
        .map(|p| target_vecs.iter().map(|t| dot(p, t)).collect())
        .collect()
}

/// Classifies every target skill against the profile.
///
/// A target skill is matched when its best similarity meets the threshold
/// (inclusive). An empty target set yields an empty verdict list; an empty
/// profile yields every target missing with similarity 0.
pub fn classify(
    profile_skills: &[String],
    profile_vecs: &[Vec<f32>],
    target_skills: &[String],
    target_vecs: &[Vec<f32>],
    threshold: f32,
) -> Vec<SkillVerdict> {
    if target_skills.is_empty() {
        return vec![];
    }

    if profile_skills.is_empty() {
        return target_skills
            .iter()
            .map(|skill| SkillVerdict {
                skill: skill.clone(),
                matched: false,
                similarity: 0.0,
                best_profile_skill: None,
            })
            .collect();
    }

    let matrix = similarity_matrix(profile_vecs, target_vecs);

    target_skills
        .iter()
        .enumerate()
        .map(|(j, skill)| {
            let (best_i, best_sim) = matrix
                .iter()
                .enumerate()
                .map(|(i, row)| (i, row[j]))
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .expect("profile set is non-empty");

            SkillVerdict {
                skill: skill.clone(),
                matched: best_sim >= threshold,
                similarity: best_sim,
                best_profile_skill: Some(profile_skills[best_i].clone()),
            }
        })
        .collect()
}

/// Splits verdicts into (matched, missing) label lists, preserving order.
pub fn partition(verdicts: &[SkillVerdict]) -> (Vec<String>, Vec<String>) {
    let matched = verdicts
        .iter()
        .filter(|v| v.matched)
        .map(|v| v.skill.clone())
        .collect();
    let missing = verdicts
        .iter()
        .filter(|v| !v.matched)
        .map(|v| v.skill.clone())
        .collect();
    (matched, missing)
}
