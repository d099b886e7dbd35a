//! Error types for haven.

use std::path::PathBuf;

/// Top-level error type for the agent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Configuration and startup errors. All of these are fatal: the agent
/// refuses to initialize rather than run with a partial setup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Persona rule table at {path} must be a non-empty JSON array: {reason}")]
    InvalidRuleTable { path: PathBuf, reason: String },

    #[error("Persona rule table not found at {path}")]
    RuleTableMissing { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Knowledge-store errors.
///
/// A similarity search that returns no documents is NOT an error — callers
/// handle empty result sets through their own fallback chains. These
/// variants cover the store itself being broken or absent.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Knowledge store directory not found: {path} (run the ingest step first)")]
    StoreMissing { path: PathBuf },

    #[error("Failed to read collection {collection}: {reason}")]
    CollectionUnreadable { collection: String, reason: String },

    #[error("Embedding request failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Embedding provider errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed")]
    AuthFailed,
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(e: reqwest::Error) -> Self {
        EmbeddingError::Http(e.to_string())
    }
}

/// LLM provider errors. Generation failures propagate to the caller of the
/// turn orchestrator; the core never retries and never substitutes
/// placeholder advice text.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited")]
    RateLimited { provider: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Provider {provider} returned an empty completion")]
    EmptyResponse { provider: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
