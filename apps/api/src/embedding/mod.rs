//! Embedding provider abstraction.
//!
//! The matcher only needs "labels in, unit vectors out". The trait keeps the
//! pipeline testable with an in-memory fake and keeps the HTTP provider
//! swappable without touching the matcher.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Provider returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

impl EmbeddingError {
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            EmbeddingError::Http(_) => true,
            EmbeddingError::Api { status, .. } => *status == 429 || *status >= 500,
            EmbeddingError::CountMismatch { .. } => false,
        }
    }
}

/// Maps a batch of skill labels to L2-normalized vectors, one per label,
/// in input order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, labels: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Scales a vector to unit length in place. Zero vectors are left as-is so
/// their dot product with anything stays 0.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize_produces_unit_length() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_leaves_zero_vector_untouched() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rate_limit_is_transient() {
        let err = EmbeddingError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_count_mismatch_is_terminal() {
        let err = EmbeddingError::CountMismatch {
            expected: 3,
            got: 2,
        };
        assert!(!err.is_transient());
    }
}
