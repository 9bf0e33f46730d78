use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub embedding_api_key: String,
    pub embedding_base_url: String,
    pub embedding_model: String,
    /// Minimum cosine similarity for a required JD skill to count as matched.
    pub required_threshold: f32,
    /// Minimum cosine similarity for a preferred JD skill to count as matched.
    pub preferred_threshold: f32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            embedding_api_key: require_env("EMBEDDING_API_KEY")?,
            embedding_base_url: std::env::var("EMBEDDING_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
            required_threshold: parse_f32_env("REQUIRED_THRESHOLD", 0.8)?,
            preferred_threshold: parse_f32_env("PREFERRED_THRESHOLD", 0.7)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_f32_env(key: &str, default: f32) -> Result<f32> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<f32>()
            .with_context(|| format!("{key} must be a number")),
        Err(_) => Ok(default),
    }
}
