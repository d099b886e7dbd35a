//! Embedding providers for similarity search.
//!
//! Embeddings convert text into dense vectors that capture semantic
//! meaning; the local store ranks documents by cosine similarity between
//! query and document vectors.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingsConfig;
use crate::error::EmbeddingError;

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Get the model name.
    fn model_name(&self) -> &str;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// OpenAI embeddings endpoint provider.
pub struct OpenAiEmbeddings {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    model: String,
    dimension: usize,
}

impl OpenAiEmbeddings {
    pub fn new(config: &EmbeddingsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            dimension: config.dimension,
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let mut request = self
            .client
            .post("https://api.openai.com/v1/embeddings")
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header(
                "Authorization",
                format!("Bearer {}", key.expose_secret()),
            );
        }

        let response = request.send().await?;
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(EmbeddingError::AuthFailed);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Http(format!(
                "HTTP {}: {}",
                status,
                crate::util::truncate_lossy(&text, 200)
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse("empty data array".to_string()))?;

        if embedding.len() != self.dimension {
            tracing::warn!(
                expected = self.dimension,
                got = embedding.len(),
                "embedding dimension mismatch"
            );
        }
        Ok(embedding)
    }
}
