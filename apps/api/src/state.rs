use std::sync::Arc;

use crate::analysis::extractor::SkillExtractor;
use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The extractor and embedder are trait objects so tests can substitute
/// fakes without process-global mutation.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub extractor: Arc<dyn SkillExtractor>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub config: Config,
}
