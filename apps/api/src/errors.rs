use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The language model produced output that could not be parsed into a
    /// skill structure, even after the strict retry. Carries the raw model
    /// output so the caller can fall back to manual entry.
    #[error("Skill extraction failed during {phase}")]
    ExtractionFailed { phase: String, raw_output: String },

    /// The embedding provider failed after the retry budget was exhausted.
    /// The whole analysis fails rather than producing a score without
    /// embeddings.
    #[error("Embedding provider unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, detail) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::ExtractionFailed { phase, raw_output } => {
                tracing::error!("Extraction failed during {phase}: {raw_output}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    format!("Could not extract skills from the {phase} text"),
                    Some(raw_output.clone()),
                )
            }
            AppError::EmbeddingUnavailable(msg) => {
                tracing::error!("Embedding provider unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "EMBEDDING_UNAVAILABLE",
                    "The embedding provider is currently unavailable".to_string(),
                    None,
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "detail": detail
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("jd_text cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_extraction_failed_maps_to_422() {
        let response = AppError::ExtractionFailed {
            phase: "job description".to_string(),
            raw_output: "not json".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_embedding_unavailable_maps_to_503() {
        let response =
            AppError::EmbeddingUnavailable("connect timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
