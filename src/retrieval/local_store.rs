//! Embedded vector store backed by a persisted JSONL collection.
//!
//! Each collection lives in its own directory under the knowledge root and
//! holds a `records.jsonl` file of `{content, metadata, embedding}` records
//! written by the ingest step. Records are loaded once at startup and held
//! read-only; queries embed the query text and rank by cosine similarity.
//! Ranking is stable: ties keep ingest order, so a deterministic embedding
//! backend yields identical results for identical queries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;
use crate::retrieval::{Document, EmbeddingProvider, KnowledgeStore, MetadataFilter};

const RECORDS_FILE: &str = "records.jsonl";

/// One ingested record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    content: String,
    #[serde(default)]
    metadata: serde_json::Map<String, serde_json::Value>,
    embedding: Vec<f32>,
}

/// Read-only vector store over one persisted collection.
pub struct LocalVectorStore {
    collection: String,
    records: Vec<StoredRecord>,
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl LocalVectorStore {
    /// Open a persisted collection directory.
    ///
    /// A missing directory is fatal (the ingest step has not been run);
    /// a present directory with no records file opens as an empty store.
    pub fn open(
        dir: &Path,
        collection: impl Into<String>,
        embeddings: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, RetrievalError> {
        let collection = collection.into();
        if !dir.is_dir() {
            return Err(RetrievalError::StoreMissing {
                path: dir.to_path_buf(),
            });
        }

        let records_path = dir.join(RECORDS_FILE);
        let records = if records_path.exists() {
            Self::load_records(&records_path, &collection)?
        } else {
            Vec::new()
        };

        tracing::info!(
            collection = %collection,
            records = records.len(),
            "opened knowledge collection"
        );

        Ok(Self {
            collection,
            records,
            embeddings,
        })
    }

    fn load_records(path: &PathBuf, collection: &str) -> Result<Vec<StoredRecord>, RetrievalError> {
        let data = std::fs::read_to_string(path)?;
        let mut records = Vec::new();
        for (lineno, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: StoredRecord =
                serde_json::from_str(line).map_err(|e| RetrievalError::CollectionUnreadable {
                    collection: collection.to_string(),
                    reason: format!("line {}: {}", lineno + 1, e),
                })?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl KnowledgeStore for LocalVectorStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<Document>, RetrievalError> {
        if k == 0 || self.records.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.embeddings.embed(query).await?;

        let mut scored: Vec<(usize, f32)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(&r.metadata))
            .map(|(i, r)| (i, cosine_similarity(&query_vec, &r.embedding)))
            .collect();

        // Stable sort keeps ingest order on ties.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| {
                let record = &self.records[i];
                tracing::debug!(
                    collection = %self.collection,
                    score,
                    "similarity hit"
                );
                Document {
                    content: record.content.clone(),
                    metadata: record.metadata.clone(),
                }
            })
            .collect())
    }
}

/// Cosine similarity; zero vectors and length mismatches score 0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::EmbeddingError;

    /// Deterministic stand-in embedder: maps known words onto fixed axes.
    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        fn dimension(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "stub"
        }

        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let mut v = vec![0.0f32; 3];
            if text.contains("alpha") {
                v[0] = 1.0;
            }
            if text.contains("beta") {
                v[1] = 1.0;
            }
            if text.contains("gamma") {
                v[2] = 1.0;
            }
            Ok(v)
        }
    }

    fn write_store(dir: &Path) {
        let records = [
            serde_json::json!({
                "content": "alpha doc",
                "metadata": {"doc_type": "playbook"},
                "embedding": [1.0, 0.0, 0.0]
            }),
            serde_json::json!({
                "content": "beta doc",
                "metadata": {"doc_type": "playbook"},
                "embedding": [0.0, 1.0, 0.0]
            }),
            serde_json::json!({
                "content": "gamma doc",
                "metadata": {"doc_type": "risk_step", "step_id": "STEP_1"},
                "embedding": [0.0, 0.0, 1.0]
            }),
        ];
        let mut f = std::fs::File::create(dir.join(RECORDS_FILE)).unwrap();
        for r in &records {
            writeln!(f, "{r}").unwrap();
        }
    }

    #[test]
    fn missing_directory_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = LocalVectorStore::open(&missing, "counsel_db", Arc::new(StubEmbedder));
        assert!(matches!(err, Err(RetrievalError::StoreMissing { .. })));
    }

    #[tokio::test]
    async fn search_ranks_by_similarity_and_honors_filter() {
        let tmp = tempfile::tempdir().unwrap();
        write_store(tmp.path());
        let store =
            LocalVectorStore::open(tmp.path(), "counsel_db", Arc::new(StubEmbedder)).unwrap();

        let filter = MetadataFilter::new().with("doc_type", "playbook");
        let docs = store.similarity_search("alpha", 2, &filter).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "alpha doc");

        // The risk_step doc is invisible through the playbook filter.
        let docs = store.similarity_search("gamma", 5, &filter).await.unwrap();
        assert!(docs.iter().all(|d| d.content != "gamma doc"));
    }

    #[tokio::test]
    async fn unfiltered_miss_returns_empty_not_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_store(tmp.path());
        let store =
            LocalVectorStore::open(tmp.path(), "counsel_db", Arc::new(StubEmbedder)).unwrap();

        let filter = MetadataFilter::new().with("doc_type", "no_such_type");
        let docs = store.similarity_search("alpha", 3, &filter).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn identical_queries_return_identical_results() {
        let tmp = tempfile::tempdir().unwrap();
        write_store(tmp.path());
        let store =
            LocalVectorStore::open(tmp.path(), "counsel_db", Arc::new(StubEmbedder)).unwrap();

        let filter = MetadataFilter::new();
        let a = store.similarity_search("alpha beta", 3, &filter).await.unwrap();
        let b = store.similarity_search("alpha beta", 3, &filter).await.unwrap();
        let contents = |docs: &[Document]| {
            docs.iter().map(|d| d.content.clone()).collect::<Vec<_>>()
        };
        assert_eq!(contents(&a), contents(&b));
    }
}
