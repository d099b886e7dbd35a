//! Questionnaire, scoring engine, and profile classification.
//!
//! The survey is a fixed 19-item instrument on a 1..=7 Likert scale:
//! self-model (3 positive + 2 negative), other-model (3 positive + 2
//! negative), emotion regulation (3 expression items reverse-coded from
//! suppression + 3 reappraisal), and self-efficacy (6). Scoring is a pure
//! function of the answers; presentation order never matters.

pub mod archetypes;
pub mod questions;
pub mod scoring;

pub use archetypes::{Archetype, archetype_for};
pub use questions::{QUESTIONS, Question, Scale};
pub use scoring::{AnswerSet, CompositeScores, SurveyResult, evaluate, score_to_percent};

use serde::{Deserialize, Serialize};

/// Coarse relational attachment style, the 2×2 of self/other positivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Secure,
    Anxious,
    Avoidant,
    Dismissive,
}

impl AttachmentType {
    /// Korean display label, also the value persona rules match against.
    pub fn label(&self) -> &'static str {
        match self {
            AttachmentType::Secure => "안정형",
            AttachmentType::Anxious => "불안형",
            AttachmentType::Avoidant => "회피형",
            AttachmentType::Dismissive => "거부형",
        }
    }
}

/// Emotional-expression style. Forced binary: there is no "mixed" bucket,
/// even right at the cut point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegulationStyle {
    Expressive,
    Suppressive,
}

impl RegulationStyle {
    pub fn label(&self) -> &'static str {
        match self {
            RegulationStyle::Expressive => "표현형",
            RegulationStyle::Suppressive => "억제형",
        }
    }
}

/// Self-efficacy classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficacyLevel {
    High,
    Low,
}

impl EfficacyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EfficacyLevel::High => "높음",
            EfficacyLevel::Low => "낮음",
        }
    }
}

/// A classified profile: one of the 16 taxonomy cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    pub attachment: AttachmentType,
    pub regulation: RegulationStyle,
    pub efficacy: EfficacyLevel,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} · {} · 효능감 {}",
            self.attachment.label(),
            self.regulation.label(),
            self.efficacy.label()
        )
    }
}
