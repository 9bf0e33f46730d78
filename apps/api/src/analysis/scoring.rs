//! Score Aggregation — folds matched/missing counts into the weighted
//! 0-100 match score.
//!
//! Required skills carry 70 points, preferred skills 30. The empty-category
//! policy is asymmetric on purpose: a JD that lists no required skills
//! awards the full 70 (nothing was demanded), while a JD that lists no
//! preferred skills awards 0 bonus (nothing extra to earn).

use serde::{Deserialize, Serialize};

pub const REQUIRED_WEIGHT: f64 = 70.0;
pub const PREFERRED_WEIGHT: f64 = 30.0;

/// Per-category point totals. `required_skills` is in [0, 70],
/// `preferred_skills` in [0, 30].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub required_skills: u32,
    pub preferred_skills: u32,
}

impl ScoreBreakdown {
    /// Total match score in [0, 100].
    pub fn total(&self) -> u32 {
        self.required_skills + self.preferred_skills
    }
}

/// Computes the weighted score from per-category counts.
pub fn score(
    required_matched: usize,
    required_total: usize,
    preferred_matched: usize,
    preferred_total: usize,
) -> ScoreBreakdown {
    let required_skills = if required_total > 0 {
        weighted_points(required_matched, required_total, REQUIRED_WEIGHT)
    } else {
        REQUIRED_WEIGHT as u32
    };

    let preferred_skills = if preferred_total > 0 {
        weighted_points(preferred_matched, preferred_total, PREFERRED_WEIGHT)
    } else {
        0
    };

    ScoreBreakdown {
        required_skills,
        preferred_skills,
    }
}

fn weighted_points(matched: usize, total: usize, weight: f64) -> u32 {
    (matched as f64 / total as f64 * weight).round() as u32
}
