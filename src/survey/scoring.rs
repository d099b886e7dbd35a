//! Deterministic scoring and classification.
//!
//! Self/other model ratios divide the positive-scale mean by the sum of the
//! positive mean and the RAW (un-reversed) negative mean. Using raw negative
//! values is intentional: the ratio measures positive-affect dominance over
//! raw negative-affect intensity, not over its reverse-coded form.

use std::collections::HashMap;

use super::{AttachmentType, EfficacyLevel, Profile, RegulationStyle};
use crate::survey::questions::{QUESTIONS, Scale};

/// Cut point for the 1..=7 means: >= 4.5 classifies high/expressive.
pub const CUT: f64 = 4.5;

/// Midpoint default for unanswered items.
pub const MIDPOINT: u8 = 4;

/// Denominator stabilizer keeping ratios strictly inside (0, 1).
const EPSILON: f64 = 1e-9;

/// Completed survey answers: question key -> value in 1..=7.
///
/// Missing entries read as the scale midpoint (4). Values are clamped into
/// range on insert so a malformed caller can't skew a composite.
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    values: HashMap<String, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, clamped into 1..=7.
    pub fn insert(&mut self, key: impl Into<String>, value: u8) {
        self.values.insert(key.into(), value.clamp(1, 7));
    }

    /// Answer for a question key, midpoint when absent.
    pub fn value(&self, key: &str) -> u8 {
        self.values.get(key).copied().unwrap_or(MIDPOINT)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u8)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, u8)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// The four composite scores, exposed for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScores {
    /// Self-model ratio in (0, 1).
    pub self_model: f64,
    /// Other-model ratio in (0, 1).
    pub other_model: f64,
    /// Mean expression score in [1, 7].
    pub expression: f64,
    /// Mean efficacy score in [1, 7].
    pub efficacy: f64,
}

/// Output of the scoring engine.
#[derive(Debug, Clone, Copy)]
pub struct SurveyResult {
    pub profile: Profile,
    pub scores: CompositeScores,
}

/// Score an answer set into composite scores and a profile classification.
///
/// Pure and total: identical answers always yield an identical profile,
/// independent of the order questions were presented.
pub fn evaluate(answers: &AnswerSet) -> SurveyResult {
    let self_pos = scale_values(Scale::SelfPositive, answers, true);
    let self_neg_raw = scale_values(Scale::SelfNegative, answers, false);
    let other_pos = scale_values(Scale::OtherPositive, answers, true);
    let other_neg_raw = scale_values(Scale::OtherNegative, answers, false);

    let self_model = internal_ratio(&self_pos, &self_neg_raw);
    let other_model = internal_ratio(&other_pos, &other_neg_raw);

    let expression = mean_or_midpoint(&scale_values(Scale::Expression, answers, true));
    let efficacy = mean_or_midpoint(&scale_values(Scale::Efficacy, answers, true));

    let scores = CompositeScores {
        self_model,
        other_model,
        expression,
        efficacy,
    };

    let profile = Profile {
        attachment: attachment_type(self_model * 100.0, other_model * 100.0),
        regulation: if expression >= CUT {
            RegulationStyle::Expressive
        } else {
            RegulationStyle::Suppressive
        },
        efficacy: if efficacy >= CUT {
            EfficacyLevel::High
        } else {
            EfficacyLevel::Low
        },
    };

    SurveyResult { profile, scores }
}

/// 2×2 attachment classification on ratio percentages, cut at 50.
fn attachment_type(self_pct: f64, other_pct: f64) -> AttachmentType {
    let high_self = self_pct >= 50.0;
    let high_other = other_pct >= 50.0;
    match (high_self, high_other) {
        (true, true) => AttachmentType::Secure,
        (false, true) => AttachmentType::Anxious,
        (true, false) => AttachmentType::Avoidant,
        (false, false) => AttachmentType::Dismissive,
    }
}

/// Collect values for one scale, applying reverse coding (`8 - v`) when
/// requested. With the fixed question set and the midpoint default every
/// scale is non-empty, but callers must not rely on that.
fn scale_values(scale: Scale, answers: &AnswerSet, apply_reverse: bool) -> Vec<f64> {
    QUESTIONS
        .iter()
        .filter(|q| q.scale == scale)
        .map(|q| {
            let v = answers.value(q.key);
            let v = if apply_reverse && q.reverse { 8 - v } else { v };
            f64::from(v)
        })
        .collect()
}

/// `pos_mean / (pos_mean + neg_mean + ε)`, strictly inside (0, 1).
///
/// Two empty collections return the neutral midpoint 0.5. The raw
/// arithmetic would give 0/(0+0+ε) = 0, which would classify an unanswered
/// scale as maximally negative; that is required NOT to happen.
fn internal_ratio(pos: &[f64], neg_raw: &[f64]) -> f64 {
    if pos.is_empty() && neg_raw.is_empty() {
        return 0.5;
    }
    let p = mean_or_zero(pos);
    let n = mean_or_zero(neg_raw);
    p / (p + n + EPSILON)
}

fn mean_or_zero(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

fn mean_or_midpoint(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        f64::from(MIDPOINT)
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

/// Map a 1..=7 mean onto 0..=100 for display bars.
pub fn score_to_percent(score: f64) -> u8 {
    (((score - 1.0) / 6.0) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Answer every item on a scale with one value, leaving the rest at the
    /// midpoint default.
    fn answers_for(scale: Scale, value: u8) -> AnswerSet {
        QUESTIONS
            .iter()
            .filter(|q| q.scale == scale)
            .map(|q| (q.key, value))
            .collect()
    }

    fn uniform(value: u8) -> AnswerSet {
        QUESTIONS.iter().map(|q| (q.key, value)).collect()
    }

    #[test]
    fn deterministic_regardless_of_insertion_order() {
        let forward: AnswerSet = QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, q)| (q.key, (i % 7 + 1) as u8))
            .collect();
        let backward: AnswerSet = QUESTIONS
            .iter()
            .enumerate()
            .rev()
            .map(|(i, q)| (q.key, (i % 7 + 1) as u8))
            .collect();

        let a = evaluate(&forward);
        let b = evaluate(&backward);
        assert_eq!(a.profile, b.profile);
        assert_eq!(a.scores.self_model, b.scores.self_model);
        assert_eq!(a.scores.other_model, b.scores.other_model);
    }

    #[test]
    fn ratios_strictly_inside_unit_interval() {
        for value in [1u8, 4, 7] {
            let result = evaluate(&uniform(value));
            for ratio in [result.scores.self_model, result.scores.other_model] {
                assert!(ratio > 0.0 && ratio < 1.0, "ratio {ratio} out of (0,1)");
                assert!(!ratio.is_nan());
            }
        }
    }

    #[test]
    fn empty_answer_set_is_neutral_not_negative() {
        let result = evaluate(&AnswerSet::new());
        // Midpoint defaults: pos mean 4, raw neg mean 4 -> ratio a hair
        // under 0.5 from the ε term, never 0.
        assert!((result.scores.self_model - 0.5).abs() < 1e-6);
        assert!((result.scores.other_model - 0.5).abs() < 1e-6);
        assert!(result.scores.self_model > 0.49);
    }

    #[test]
    fn empty_collections_return_exact_midpoint() {
        assert_eq!(internal_ratio(&[], &[]), 0.5);
    }

    #[test]
    fn expression_cut_inclusive_on_high_side() {
        // All expression items are reverse-coded; raw 3.5 is unreachable on
        // integers, so exercise the cut directly on the classifier arithmetic.
        let at_cut = if 4.5f64 >= CUT {
            RegulationStyle::Expressive
        } else {
            RegulationStyle::Suppressive
        };
        assert_eq!(at_cut, RegulationStyle::Expressive);

        let below = if 4.49999f64 >= CUT {
            RegulationStyle::Expressive
        } else {
            RegulationStyle::Suppressive
        };
        assert_eq!(below, RegulationStyle::Suppressive);
    }

    #[test]
    fn suppression_heavy_answers_classify_suppressive() {
        // Raw 6 on suppression items reverse-codes to expression 2.
        let answers = answers_for(Scale::Expression, 6);
        assert_eq!(
            evaluate(&answers).profile.regulation,
            RegulationStyle::Suppressive
        );
    }

    #[test]
    fn efficacy_above_cut_classifies_high() {
        let answers = answers_for(Scale::Efficacy, 5);
        assert_eq!(evaluate(&answers).profile.efficacy, EfficacyLevel::High);

        let answers = answers_for(Scale::Efficacy, 4);
        assert_eq!(evaluate(&answers).profile.efficacy, EfficacyLevel::Low);
    }

    #[test]
    fn quadrant_mapping() {
        let case = |self_pct: f64, other_pct: f64| attachment_type(self_pct, other_pct);
        assert_eq!(case(60.0, 70.0), AttachmentType::Secure);
        assert_eq!(case(40.0, 70.0), AttachmentType::Anxious);
        assert_eq!(case(60.0, 30.0), AttachmentType::Avoidant);
        assert_eq!(case(40.0, 30.0), AttachmentType::Dismissive);
    }

    #[test]
    fn raw_negative_values_feed_the_denominator() {
        // Positive items at 6, negative items at 6. Reverse-coded the
        // negatives would be 2 (ratio 0.75); raw they are 6 (ratio 0.5).
        let mut answers = AnswerSet::new();
        for q in QUESTIONS
            .iter()
            .filter(|q| matches!(q.scale, Scale::SelfPositive | Scale::SelfNegative))
        {
            answers.insert(q.key, 6);
        }
        let ratio = evaluate(&answers).scores.self_model;
        assert!((ratio - 0.5).abs() < 1e-6, "got {ratio}");
    }

    #[test]
    fn out_of_range_answers_are_clamped() {
        let mut answers = AnswerSet::new();
        answers.insert("s1", 9);
        assert_eq!(answers.value("s1"), 7);
        answers.insert("s1", 0);
        assert_eq!(answers.value("s1"), 1);
    }

    #[test]
    fn percent_conversion_spans_the_scale() {
        assert_eq!(score_to_percent(1.0), 0);
        assert_eq!(score_to_percent(4.0), 50);
        assert_eq!(score_to_percent(7.0), 100);
    }
}
