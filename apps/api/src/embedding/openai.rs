//! OpenAI-compatible embedding client.
//!
//! Works against api.openai.com or any endpoint speaking the same
//! `/embeddings` shape (Gemini's OpenAI compatibility layer included).
//! Vectors are normalized on receipt and cached process-wide keyed by the
//! normalized label text; label to vector is a pure function for a fixed
//! model, so the cache never needs invalidation within a process lifetime.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::{l2_normalize, EmbeddingError, EmbeddingProvider};
use crate::retry::RetryPolicy;

const RETRY_POLICY: RetryPolicy = RetryPolicy::new(3, Duration::from_millis(500));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

pub struct OpenAiEmbeddings {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    cache: RwLock<HashMap<String, Vec<f32>>>,
}

impl OpenAiEmbeddings {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            cache: RwLock::new(HashMap::new()),
        }
    }

    async fn fetch_batch(&self, labels: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: labels,
        };

        let response = RETRY_POLICY
            .run(
                "embedding call",
                || self.fetch_once(&request_body),
                EmbeddingError::is_transient,
            )
            .await?;

        if response.data.len() != labels.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: labels.len(),
                got: response.data.len(),
            });
        }

        // Providers may return rows out of order; the index field is authoritative.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        Ok(data
            .into_iter()
            .map(|d| {
                let mut vector = d.embedding;
                l2_normalize(&mut vector);
                vector
            })
            .collect())
    }

    async fn fetch_once(
        &self,
        request_body: &EmbeddingRequest<'_>,
    ) -> Result<EmbeddingResponse, EmbeddingError> {
        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, labels: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if labels.is_empty() {
            return Ok(vec![]);
        }

        let mut results: Vec<Option<Vec<f32>>> = vec![None; labels.len()];
        let mut uncached_labels = Vec::new();
        let mut uncached_indices = Vec::new();

        {
            let cache = self.cache.read().expect("embedding cache poisoned");
            for (i, label) in labels.iter().enumerate() {
                match cache.get(&cache_key(label)) {
                    Some(vector) => results[i] = Some(vector.clone()),
                    None => {
                        uncached_labels.push(label.clone());
                        uncached_indices.push(i);
                    }
                }
            }
        }

        if !uncached_labels.is_empty() {
            debug!(
                "Embedding {} labels ({} cache hits)",
                uncached_labels.len(),
                labels.len() - uncached_labels.len()
            );

            let fetched = self.fetch_batch(&uncached_labels).await?;

            let mut cache = self.cache.write().expect("embedding cache poisoned");
            for ((index, label), vector) in uncached_indices
                .into_iter()
                .zip(&uncached_labels)
                .zip(fetched)
            {
                cache.insert(cache_key(label), vector.clone());
                results[index] = Some(vector);
            }
        }

        Ok(results
            .into_iter()
            .map(|v| v.expect("all labels resolved from cache or fetch"))
            .collect())
    }
}

/// Cache key: lowercased, trimmed label text.
fn cache_key(label: &str) -> String {
    label.trim().to_lowercase()
}
