//! Eager startup wiring.
//!
//! Everything the turn pipeline depends on is constructed up front, in
//! dependency order, and any failure aborts startup. There is no degraded
//! mode: a missing store directory or rule table is an operator problem,
//! not something to paper over at turn time.

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, COLLECTION_COUNSEL, COLLECTION_RISK, COLLECTION_USER_PROFILE};
use crate::error::Error;
use crate::llm::{LlmProvider, OpenAiCompatibleProvider};
use crate::persona::PersonaTable;
use crate::retrieval::{EmbeddingProvider, KnowledgeStore, LocalVectorStore, OpenAiEmbeddings};

/// Fully initialized collaborators, shared across sessions.
pub struct Services {
    pub llm: Arc<dyn LlmProvider>,
    pub profile_store: Arc<dyn KnowledgeStore>,
    pub counsel_store: Arc<dyn KnowledgeStore>,
    pub risk_store: Arc<dyn KnowledgeStore>,
    pub persona_table: PersonaTable,
}

/// Initialize every collaborator, failing fast on the first problem.
pub fn init(config: &Config) -> Result<Services, Error> {
    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddings::new(&config.embeddings));

    let profile_store = open_store(config, COLLECTION_USER_PROFILE, embeddings.clone())?;
    let counsel_store = open_store(config, COLLECTION_COUNSEL, embeddings.clone())?;
    let risk_store = open_store(config, COLLECTION_RISK, embeddings)?;

    let persona_table = PersonaTable::load(&config.persona.rules_path)?;
    info!(
        rules = persona_table.len(),
        path = %config.persona.rules_path.display(),
        "persona rule table loaded"
    );

    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiCompatibleProvider::new(config.llm.clone())?);
    info!(model = %config.llm.model, "generation provider ready");

    Ok(Services {
        llm,
        profile_store,
        counsel_store,
        risk_store,
        persona_table,
    })
}

fn open_store(
    config: &Config,
    collection: &str,
    embeddings: Arc<dyn EmbeddingProvider>,
) -> Result<Arc<dyn KnowledgeStore>, Error> {
    let dir = config.knowledge.collection_dir(collection);
    let store = LocalVectorStore::open(&dir, collection, embeddings)?;
    Ok(Arc::new(store))
}
