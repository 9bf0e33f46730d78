pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analysis/gap",
            post(handlers::handle_gap_analysis),
        )
        .route(
            "/api/v1/analysis/jd-skills",
            post(handlers::handle_extract_jd),
        )
        .with_state(state)
}
