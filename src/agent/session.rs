//! Per-session conversation state.
//!
//! One explicit struct owns everything a session mutates: the turn
//! transcript, the single rolling summary (replaced, never appended, each
//! turn), and the monotone `ever_risk` flag. Only the turn orchestrator
//! mutates it; reset tears it back to the seed state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Seed summary present before the first turn.
pub const SEED_SUMMARY: &str = "상담 시작. 초기 맥락 파악 단계.";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One utterance in the transcript.
#[derive(Debug, Clone)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
}

/// Rolling conversation state for one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    turns: Vec<Turn>,
    summary: String,
    ever_risk: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            turns: Vec::new(),
            summary: SEED_SUMMARY.to_string(),
            ever_risk: false,
        }
    }

    /// The rolling summary. Never empty: seeded at start, replaced on
    /// every completed turn.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Whether any turn in this session was risk-flagged. Monotone: once
    /// true, stays true until reset.
    pub fn ever_risk(&self) -> bool {
        self.ever_risk
    }

    /// Commit one completed turn. Called only after both generation calls
    /// succeeded, so a failed turn leaves prior state untouched.
    pub fn record_turn(
        &mut self,
        user_message: &str,
        assistant_reply: &str,
        new_summary: String,
        risk_flagged: bool,
    ) {
        self.turns.push(Turn {
            speaker: Speaker::User,
            content: user_message.to_string(),
        });
        self.turns.push(Turn {
            speaker: Speaker::Assistant,
            content: assistant_reply.to_string(),
        });
        if !new_summary.trim().is_empty() {
            self.summary = new_summary;
        }
        self.ever_risk = self.ever_risk || risk_flagged;
    }

    /// Discard the conversation, keeping the session identity.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.summary = SEED_SUMMARY.to_string();
        self.ever_risk = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starts_with_seed_summary() {
        let session = SessionState::new();
        assert_eq!(session.summary(), SEED_SUMMARY);
        assert!(!session.ever_risk());
        assert!(session.turns().is_empty());
    }

    #[test]
    fn ever_risk_latches() {
        let mut session = SessionState::new();
        session.record_turn("m1", "r1", "s1".into(), true);
        assert!(session.ever_risk());
        session.record_turn("m2", "r2", "s2".into(), false);
        assert!(session.ever_risk());
    }

    #[test]
    fn summary_is_replaced_not_appended() {
        let mut session = SessionState::new();
        session.record_turn("m1", "r1", "첫 요약".into(), false);
        session.record_turn("m2", "r2", "둘째 요약".into(), false);
        assert_eq!(session.summary(), "둘째 요약");
    }

    #[test]
    fn blank_summary_keeps_previous() {
        let mut session = SessionState::new();
        session.record_turn("m1", "r1", "첫 요약".into(), false);
        session.record_turn("m2", "r2", "  ".into(), false);
        assert_eq!(session.summary(), "첫 요약");
    }

    #[test]
    fn reset_restores_seed_state() {
        let mut session = SessionState::new();
        let id = session.id;
        session.record_turn("m1", "r1", "요약".into(), true);
        session.reset();
        assert_eq!(session.summary(), SEED_SUMMARY);
        assert!(!session.ever_risk());
        assert!(session.turns().is_empty());
        assert_eq!(session.id, id);
    }
}
