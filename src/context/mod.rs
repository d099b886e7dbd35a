//! Per-turn retrieval context assembly.
//!
//! Every turn gets baseline counseling context: the top playbook documents
//! for the rolling summary plus the new message, joined with a visible
//! delimiter. Risk-flagged turns additionally carry the Risk pack resolved
//! from the risk store. Given a deterministic retrieval backend, assembly
//! is idempotent over (summary, message, store state).

use std::sync::Arc;

use crate::error::RetrievalError;
use crate::retrieval::{KnowledgeStore, MetadataFilter};
use crate::safety::{EscalationResolver, RiskPack};

/// Visible delimiter between concatenated context documents.
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// Playbook documents fetched per turn.
const COUNSEL_TOP_K: usize = 4;

/// Retrieval query for a turn: rolling summary plus the current message.
pub fn build_query(history_summary: &str, user_message: &str) -> String {
    format!("{}\n{}", history_summary.trim(), user_message.trim())
        .trim()
        .to_string()
}

/// Assembled context for one turn.
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// Concatenated playbook guidance; empty when retrieval found nothing.
    pub counsel: String,
    /// Present only on risk-flagged turns that resolved a level document.
    pub risk: Option<RiskPack>,
}

/// Builds the retrieval context feeding each dialogue turn.
pub struct ContextAssembler {
    counsel_store: Arc<dyn KnowledgeStore>,
    escalation: EscalationResolver,
}

impl ContextAssembler {
    pub fn new(counsel_store: Arc<dyn KnowledgeStore>, risk_store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            counsel_store,
            escalation: EscalationResolver::new(risk_store),
        }
    }

    /// Assemble the context for one turn. The escalation resolver runs
    /// only when the message was risk-flagged.
    pub async fn assemble(
        &self,
        history_summary: &str,
        user_message: &str,
        risk_flagged: bool,
    ) -> Result<TurnContext, RetrievalError> {
        let counsel = self.counsel_context(history_summary, user_message).await?;

        let risk = if risk_flagged {
            self.escalation.resolve(history_summary, user_message).await?
        } else {
            None
        };

        Ok(TurnContext { counsel, risk })
    }

    /// Baseline counseling context, supplied on every turn. An empty
    /// result set degrades to empty context, never to an error.
    async fn counsel_context(
        &self,
        history_summary: &str,
        user_message: &str,
    ) -> Result<String, RetrievalError> {
        let query = build_query(history_summary, user_message);
        let filter = MetadataFilter::new().with("doc_type", "playbook");
        let docs = self
            .counsel_store
            .similarity_search(&query, COUNSEL_TOP_K, &filter)
            .await?;

        Ok(docs
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_DELIMITER)
            .trim()
            .to_string())
    }
}
