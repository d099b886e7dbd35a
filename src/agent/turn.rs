//! Per-turn orchestration: detect, retrieve, generate, summarize, commit.
//!
//! Session state is only mutated after both generation calls succeed, so a
//! failed turn is observationally a no-op on the session.

use std::sync::Arc;

use tracing::{debug, info};

use crate::agent::prompts;
use crate::agent::session::SessionState;
use crate::context::ContextAssembler;
use crate::error::Error;
use crate::llm::LlmProvider;
use crate::persona::PersonaRule;
use crate::safety::detect_risk;

/// Result of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant reply, badge included on risk turns.
    pub reply: String,
    /// Whether this turn's message tripped the risk scan.
    pub risk_flagged: bool,
}

/// Drives the fixed per-turn pipeline for one session's resolved persona.
pub struct TurnOrchestrator {
    llm: Arc<dyn LlmProvider>,
    assembler: ContextAssembler,
    persona: PersonaRule,
}

impl TurnOrchestrator {
    pub fn new(llm: Arc<dyn LlmProvider>, assembler: ContextAssembler, persona: PersonaRule) -> Self {
        Self {
            llm,
            assembler,
            persona,
        }
    }

    pub fn persona(&self) -> &PersonaRule {
        &self.persona
    }

    /// Run one turn. On any error the session is left exactly as it was.
    pub async fn process(
        &self,
        session: &mut SessionState,
        user_message: &str,
    ) -> Result<TurnOutcome, Error> {
        let risk_flagged = detect_risk(user_message);
        if risk_flagged {
            info!(session = %session.id, "risk signal detected in user message");
        }

        let context = self
            .assembler
            .assemble(session.summary(), user_message, risk_flagged)
            .await?;
        debug!(
            counsel_len = context.counsel.len(),
            risk_pack = context.risk.is_some(),
            "turn context assembled"
        );

        let prompt = prompts::turn_prompt(
            &self.persona,
            &context.counsel,
            context.risk.as_ref(),
            session.summary(),
            user_message,
        );
        let generated = self.llm.complete_checked(&prompt).await?;

        let reply = if risk_flagged {
            format!("{}\n{}", prompts::RISK_BADGE, generated)
        } else {
            generated
        };

        let summary_prompt =
            prompts::summary_update_prompt(session.summary(), user_message, &reply);
        let new_summary = self.llm.complete_checked(&summary_prompt).await?;

        session.record_turn(user_message, &reply, new_summary, risk_flagged);

        Ok(TurnOutcome { reply, risk_flagged })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::agent::session::SEED_SUMMARY;
    use crate::error::{LlmError, RetrievalError};
    use crate::retrieval::{Document, KnowledgeStore, MetadataFilter};

    /// Scripted provider: answers the turn prompt first, then the summary
    /// prompt, for each turn in order.
    struct ScriptedLlm {
        responses: Mutex<Vec<Result<String, LlmError>>>,
    }

    impl ScriptedLlm {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                panic!("scripted llm exhausted");
            }
            responses.remove(0)
        }
    }

    struct FixedStore {
        docs: Vec<Document>,
    }

    #[async_trait]
    impl KnowledgeStore for FixedStore {
        fn collection(&self) -> &str {
            "fixed"
        }

        async fn similarity_search(
            &self,
            _query: &str,
            k: usize,
            filter: &MetadataFilter,
        ) -> Result<Vec<Document>, RetrievalError> {
            let mut hits: Vec<Document> = self
                .docs
                .iter()
                .filter(|d| filter.matches(&d.metadata))
                .cloned()
                .collect();
            hits.truncate(k);
            Ok(hits)
        }
    }

    fn persona() -> PersonaRule {
        PersonaRule {
            nickname: "차분한 등대".to_string(),
            axis: Default::default(),
            tone: "담백".to_string(),
            goal: "정리".to_string(),
            core_traits: "명명".to_string(),
            forbidden_phrases: vec![],
        }
    }

    fn orchestrator(
        llm: ScriptedLlm,
        counsel_docs: Vec<Document>,
        risk_docs: Vec<Document>,
    ) -> TurnOrchestrator {
        let counsel = Arc::new(FixedStore { docs: counsel_docs });
        let risk = Arc::new(FixedStore { docs: risk_docs });
        TurnOrchestrator::new(
            Arc::new(llm),
            ContextAssembler::new(counsel, risk),
            persona(),
        )
    }

    #[tokio::test]
    async fn plain_turn_commits_reply_and_summary() {
        let llm = ScriptedLlm::new(vec![
            Ok("괜찮으셨나요?".to_string()),
            Ok("갱신된 요약".to_string()),
        ]);
        let orch = orchestrator(llm, vec![], vec![]);
        let mut session = SessionState::new();

        let outcome = orch.process(&mut session, "요즘 연락이 뜸해요").await.unwrap();

        assert!(!outcome.risk_flagged);
        assert_eq!(outcome.reply, "괜찮으셨나요?");
        assert_eq!(session.summary(), "갱신된 요약");
        assert_eq!(session.turns().len(), 2);
        assert!(!session.ever_risk());
    }

    #[tokio::test]
    async fn risk_turn_prefixes_badge_and_latches_flag() {
        let llm = ScriptedLlm::new(vec![
            Ok("지금 안전이 먼저예요.".to_string()),
            Ok("위험 요약".to_string()),
        ]);
        let risk_docs = vec![Document::new("[필수Step] Step1 → Step2")
            .with_meta("doc_type", "risk_level_example")
            .with_meta("level", "L2")];
        let orch = orchestrator(llm, vec![], risk_docs);
        let mut session = SessionState::new();

        let outcome = orch
            .process(&mut session, "그 사람이 날 때리려고 했어")
            .await
            .unwrap();

        assert!(outcome.risk_flagged);
        assert!(outcome.reply.starts_with(prompts::RISK_BADGE));
        assert!(session.ever_risk());

        // A later calm turn keeps the latch set.
        let llm = ScriptedLlm::new(vec![
            Ok("좋아요.".to_string()),
            Ok("후속 요약".to_string()),
        ]);
        let orch2 = orchestrator(llm, vec![], vec![]);
        let outcome2 = orch2.process(&mut session, "오늘은 괜찮아요").await.unwrap();
        assert!(!outcome2.risk_flagged);
        assert!(session.ever_risk());
    }

    #[tokio::test]
    async fn generation_failure_leaves_session_untouched() {
        let llm = ScriptedLlm::new(vec![Err(LlmError::EmptyResponse {
            provider: "scripted".to_string(),
        })]);
        let orch = orchestrator(llm, vec![], vec![]);
        let mut session = SessionState::new();

        let result = orch.process(&mut session, "메시지").await;

        assert!(result.is_err());
        assert_eq!(session.summary(), SEED_SUMMARY);
        assert!(session.turns().is_empty());
    }

    #[tokio::test]
    async fn summary_failure_also_leaves_session_untouched() {
        let llm = ScriptedLlm::new(vec![
            Ok("답변".to_string()),
            Err(LlmError::EmptyResponse {
                provider: "scripted".to_string(),
            }),
        ]);
        let orch = orchestrator(llm, vec![], vec![]);
        let mut session = SessionState::new();

        let result = orch.process(&mut session, "메시지").await;

        assert!(result.is_err());
        assert_eq!(session.summary(), SEED_SUMMARY);
        assert!(session.turns().is_empty());
    }
}
