//! Knowledge-store contract and backends.
//!
//! The core consumes three logically separate stores (profile, counseling
//! playbooks, risk protocol) through one narrow contract:
//! `similarity_search(query, k, filter)` returning documents with `content`
//! and `metadata`. An empty result set is a normal outcome, never an error;
//! a missing store directory is fatal at startup.

pub mod embeddings;
pub mod local_store;

pub use embeddings::{EmbeddingProvider, OpenAiEmbeddings};
pub use local_store::LocalVectorStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// A retrieved document: free text plus loosely-typed metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Equality filter over document metadata fields. All entries must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFilter {
    entries: Vec<(String, String)>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a document's metadata satisfies every filter entry. String
    /// values compare directly; other JSON scalars compare through their
    /// canonical rendering, so a numeric `step_id` still matches.
    pub fn matches(&self, metadata: &serde_json::Map<String, serde_json::Value>) -> bool {
        self.entries.iter().all(|(key, wanted)| {
            metadata.get(key).is_some_and(|value| match value {
                serde_json::Value::String(s) => s == wanted,
                other => other.to_string() == *wanted,
            })
        })
    }
}

/// The knowledge-store query contract consumed by the turn pipeline.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Name of the backing collection (for logs).
    fn collection(&self) -> &str;

    /// Top-k most similar documents for a query, restricted to documents
    /// whose metadata matches `filter`. Returns fewer than `k` documents
    /// (possibly none) when the filtered collection is small; that is not
    /// an error.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<Document>, RetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_string_and_numeric_values() {
        let doc = Document::new("x")
            .with_meta("doc_type", "risk_step")
            .with_meta("row_id", 7);

        assert!(MetadataFilter::new()
            .with("doc_type", "risk_step")
            .matches(&doc.metadata));
        assert!(MetadataFilter::new().with("row_id", "7").matches(&doc.metadata));
        assert!(!MetadataFilter::new()
            .with("doc_type", "playbook")
            .matches(&doc.metadata));
        assert!(!MetadataFilter::new().with("absent", "x").matches(&doc.metadata));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let doc = Document::new("x");
        assert!(MetadataFilter::new().matches(&doc.metadata));
    }
}
