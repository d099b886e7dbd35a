//! Configuration for haven.
//!
//! Everything is env-first: a `.env` file is loaded if present, then each
//! section reads its variables with sensible defaults. Startup fails fast on
//! anything missing or malformed; a broken setup needs an operator, not a
//! degraded run.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Collection name for the profile store (loaded, not used by turn logic).
pub const COLLECTION_USER_PROFILE: &str = "user_profile";
/// Collection name for the counseling-playbook store.
pub const COLLECTION_COUNSEL: &str = "counsel_db";
/// Collection name for the risk-protocol store.
pub const COLLECTION_RISK: &str = "risk_protocol";

/// Main configuration for the agent.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub embeddings: EmbeddingsConfig,
    pub knowledge: KnowledgeConfig,
    pub persona: PersonaConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            llm: LlmConfig::from_env()?,
            embeddings: EmbeddingsConfig::from_env()?,
            knowledge: KnowledgeConfig::from_env()?,
            persona: PersonaConfig::from_env()?,
        })
    }
}

/// Generation collaborator configuration (OpenAI-compatible endpoint).
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the chat completions endpoint.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Bearer token; optional for local endpoints.
    pub api_key: Option<SecretString>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl LlmConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = optional_env("HAVEN_LLM_BASE_URL")?
            .unwrap_or_else(|| "https://api.openai.com".to_string());
        let model =
            optional_env("HAVEN_CHAT_MODEL")?.unwrap_or_else(|| "gpt-5-mini".to_string());
        let api_key = optional_env("OPENAI_API_KEY")?.map(SecretString::from);
        let temperature = parse_env("HAVEN_LLM_TEMPERATURE", 0.6)?;

        Ok(Self {
            base_url,
            model,
            api_key,
            temperature,
        })
    }
}

/// Embedding provider configuration.
#[derive(Debug, Clone)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimension: usize,
    /// Falls back to the LLM key when unset.
    pub api_key: Option<SecretString>,
}

impl EmbeddingsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let model = optional_env("HAVEN_EMBED_MODEL")?
            .unwrap_or_else(|| "text-embedding-3-large".to_string());
        let dimension = parse_env("HAVEN_EMBED_DIMENSION", 3072usize)?;
        let api_key = optional_env("OPENAI_API_KEY")?.map(SecretString::from);

        Ok(Self {
            model,
            dimension,
            api_key,
        })
    }
}

/// Knowledge-store layout: one root directory holding one subdirectory per
/// persisted collection.
#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    pub root: PathBuf,
}

impl KnowledgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let root = match optional_env("HAVEN_STORE_ROOT")? {
            Some(p) => PathBuf::from(p),
            None => default_data_dir().join("knowledge"),
        };
        Ok(Self { root })
    }

    /// Directory backing a named collection.
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }
}

/// Persona rule table location.
#[derive(Debug, Clone)]
pub struct PersonaConfig {
    pub rules_path: PathBuf,
}

impl PersonaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let rules_path = match optional_env("HAVEN_PERSONA_RULES")? {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from("data/persona_rules.json"),
        };
        Ok(Self { rules_path })
    }
}

/// Default data root: `~/.haven`.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".haven")
}

/// Read an optional environment variable, treating empty strings as unset.
fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if v.trim().is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "not valid unicode".to_string(),
        }),
    }
}

/// Read an environment variable and parse it, falling back to a default.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match optional_env(key)? {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("failed to parse {raw:?}"),
        }),
        None => Ok(default),
    }
}
