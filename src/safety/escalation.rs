//! Risk escalation: severity-level selection and required-step guidance.
//!
//! Invoked only for risk-flagged turns. The level document comes from the
//! risk store (level examples first, response maps as the alternate
//! filter); its required steps come from structured metadata when present,
//! else from a `[필수Step]`-labeled line in the document text. Step
//! guidance retrieval is best-effort per step: a step with no retrievable
//! guidance contributes nothing, it never aborts the turn.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::context::{CONTEXT_DELIMITER, build_query};
use crate::error::RetrievalError;
use crate::retrieval::{Document, KnowledgeStore, MetadataFilter};

/// A required protocol step, decoded from the store's string forms
/// (`STEP_3`, `Step3`, `step 3`) into one canonical identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(pub u32);

impl StepId {
    /// Parse a `STEP_<n>` identifier (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.trim();
        let rest = rest
            .strip_prefix("STEP_")
            .or_else(|| rest.strip_prefix("step_"))
            .or_else(|| rest.strip_prefix("Step_"))?;
        rest.parse().ok().map(StepId)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STEP_{}", self.0)
    }
}

/// The bundle steering a risk-flagged reply. Computed fresh per flagged
/// turn, never persisted across turns.
#[derive(Debug, Clone)]
pub struct RiskPack {
    /// Severity level identifier from the level document's metadata.
    pub level: String,
    /// Required steps, in source order.
    pub required_steps: Vec<StepId>,
    /// The selected level document's text.
    pub level_guidance: String,
    /// Concatenated step guidance, in step order.
    pub step_guidance: String,
}

static REQUIRED_STEP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[필수Step\]\s*(.+)").expect("must compile"));
static STEP_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[→>\-,]").expect("must compile"));
static STEP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)step\s*([0-9]+)").expect("must compile"));

/// Parse required steps out of a `[필수Step]`-labeled line of free text,
/// e.g. `[필수Step] Step1 → Step2, Step3`. Order follows the source text.
pub fn parse_required_steps(text: &str) -> Vec<StepId> {
    let Some(captures) = REQUIRED_STEP_LINE.captures(text) else {
        return Vec::new();
    };
    let raw = captures[1].trim();

    STEP_SEPARATORS
        .split(raw)
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            STEP_NUMBER
                .captures(part)
                .and_then(|m| m[1].parse().ok())
                .map(StepId)
        })
        .collect()
}

/// Decode the level identifier out of loosely-shaped metadata.
///
/// The fallback chain is a compatibility contract and must hold exactly in
/// this priority order: `keys.level` as a nested map, `keys` as
/// JSON-encoded text with a `level` field, flat `level`, flat `row_id`,
/// then the literal `UNKNOWN`.
pub fn extract_level(metadata: &serde_json::Map<String, Value>) -> String {
    if let Some(keys) = metadata.get("keys") {
        if let Value::Object(map) = keys {
            if let Some(level) = map.get("level") {
                return scalar_to_string(level);
            }
        }
        if let Value::String(raw) = keys {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
                if let Some(level) = map.get("level") {
                    return scalar_to_string(level);
                }
            }
        }
    }
    if let Some(level) = metadata.get("level") {
        return scalar_to_string(level);
    }
    if let Some(row_id) = metadata.get("row_id") {
        return scalar_to_string(row_id);
    }
    "UNKNOWN".to_string()
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Required steps from the level document: metadata first, text fallback.
fn required_steps(level_doc: &Document) -> Vec<StepId> {
    if let Some(Value::Array(items)) = level_doc.metadata.get("required_steps") {
        if !items.is_empty() {
            // A single free-form entry like "Step1 → Step2" is a text list
            // in disguise; route it through the text parser.
            if items.len() == 1 {
                if let Some(Value::String(s)) = items.first() {
                    if s.contains("Step") {
                        return parse_required_steps(&format!("[필수Step] {s}"));
                    }
                }
            }
            let parsed: Vec<StepId> = items
                .iter()
                .filter_map(|v| v.as_str())
                .filter_map(StepId::parse)
                .collect();
            if !parsed.is_empty() {
                return parsed;
            }
        }
    }
    parse_required_steps(&level_doc.content)
}

/// Resolves a Risk pack from the risk-protocol store.
pub struct EscalationResolver {
    store: Arc<dyn KnowledgeStore>,
}

impl EscalationResolver {
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Build the Risk pack for a flagged turn. Returns `None` when the
    /// store has no level document at all for the query; the turn then
    /// proceeds with baseline context only.
    pub async fn resolve(
        &self,
        history_summary: &str,
        user_message: &str,
    ) -> Result<Option<RiskPack>, RetrievalError> {
        let query = build_query(history_summary, user_message);

        let Some(level_doc) = self.select_level_doc(&query).await? else {
            tracing::warn!("risk flagged but no level document retrievable");
            return Ok(None);
        };

        let steps = required_steps(&level_doc);
        let level = extract_level(&level_doc.metadata);
        let step_guidance = self.fetch_step_guidance(&steps).await?;

        tracing::info!(
            level = %level,
            steps = steps.len(),
            "risk pack assembled"
        );

        Ok(Some(RiskPack {
            level,
            required_steps: steps,
            level_guidance: level_doc.content,
            step_guidance,
        }))
    }

    /// Top-3 level examples; response maps as the alternate filter; best
    /// match wins.
    async fn select_level_doc(&self, query: &str) -> Result<Option<Document>, RetrievalError> {
        let filter = MetadataFilter::new().with("doc_type", "risk_level_example");
        let mut docs = self.store.similarity_search(query, 3, &filter).await?;
        if docs.is_empty() {
            let filter = MetadataFilter::new().with("doc_type", "risk_response_map");
            docs = self.store.similarity_search(query, 3, &filter).await?;
        }
        Ok(docs.into_iter().next())
    }

    /// Top-1 guidance per step, in step order. The step-id-filtered query
    /// is best-effort (errors downgrade to a miss); the generic retry
    /// drops the step-id filter and takes the first hit.
    async fn fetch_step_guidance(&self, steps: &[StepId]) -> Result<String, RetrievalError> {
        let mut blocks = Vec::new();
        for step in steps {
            let filter = MetadataFilter::new()
                .with("doc_type", "risk_step")
                .with("step_id", step.to_string());
            let docs = match self
                .store
                .similarity_search(&format!("{step} risk step"), 2, &filter)
                .await
            {
                Ok(docs) => docs,
                Err(e) => {
                    tracing::warn!(step = %step, error = %e, "step-filtered search failed");
                    Vec::new()
                }
            };

            let doc = match docs.into_iter().next() {
                Some(doc) => Some(doc),
                None => {
                    let filter = MetadataFilter::new().with("doc_type", "risk_step");
                    self.store
                        .similarity_search(&format!("{step} 단계"), 2, &filter)
                        .await?
                        .into_iter()
                        .next()
                }
            };

            if let Some(doc) = doc {
                blocks.push(doc.content);
            }
        }
        Ok(blocks.join(CONTEXT_DELIMITER).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn steps(ids: &[u32]) -> Vec<StepId> {
        ids.iter().copied().map(StepId).collect()
    }

    #[test]
    fn parses_arrow_and_comma_separated_steps_in_order() {
        assert_eq!(
            parse_required_steps("[필수Step] Step1 → Step2, Step3"),
            steps(&[1, 2, 3])
        );
    }

    #[test]
    fn parses_dash_and_gt_separators() {
        assert_eq!(
            parse_required_steps("대응 지침\n[필수Step] step 2 > Step4 - step1"),
            steps(&[2, 4, 1])
        );
    }

    #[test]
    fn no_label_means_no_steps() {
        assert!(parse_required_steps("Step1 → Step2").is_empty());
    }

    #[test]
    fn step_id_round_trips() {
        assert_eq!(StepId::parse("STEP_3"), Some(StepId(3)));
        assert_eq!(StepId::parse("step_12"), Some(StepId(12)));
        assert_eq!(StepId::parse("STAGE_1"), None);
        assert_eq!(StepId(7).to_string(), "STEP_7");
    }

    fn meta(json: serde_json::Value) -> serde_json::Map<String, Value> {
        json.as_object().unwrap().clone()
    }

    #[test]
    fn level_prefers_nested_keys_map() {
        let md = meta(serde_json::json!({
            "keys": {"level": "L2"},
            "level": "flat",
            "row_id": 9
        }));
        assert_eq!(extract_level(&md), "L2");
    }

    #[test]
    fn level_decodes_json_encoded_keys_text() {
        let md = meta(serde_json::json!({
            "keys": "{\"level\": 3}",
            "row_id": 9
        }));
        assert_eq!(extract_level(&md), "3");
    }

    #[test]
    fn level_falls_back_flat_then_row_id_then_unknown() {
        assert_eq!(
            extract_level(&meta(serde_json::json!({"level": "L1"}))),
            "L1"
        );
        assert_eq!(extract_level(&meta(serde_json::json!({"row_id": 4}))), "4");
        assert_eq!(extract_level(&meta(serde_json::json!({}))), "UNKNOWN");
    }

    #[test]
    fn malformed_keys_text_skips_to_flat_level() {
        let md = meta(serde_json::json!({
            "keys": "not json",
            "level": "L5"
        }));
        assert_eq!(extract_level(&md), "L5");
    }

    #[test]
    fn metadata_steps_win_over_text() {
        let doc = Document::new("[필수Step] Step9")
            .with_meta("required_steps", serde_json::json!(["STEP_1", "STEP_2"]));
        assert_eq!(required_steps(&doc), steps(&[1, 2]));
    }

    #[test]
    fn single_freeform_metadata_entry_parses_as_text_list() {
        let doc = Document::new("")
            .with_meta("required_steps", serde_json::json!(["Step1 → Step3"]));
        assert_eq!(required_steps(&doc), steps(&[1, 3]));
    }

    #[test]
    fn malformed_metadata_falls_back_to_document_text() {
        let doc = Document::new("[필수Step] Step2, Step5")
            .with_meta("required_steps", serde_json::json!([42, true]));
        assert_eq!(required_steps(&doc), steps(&[2, 5]));
    }
}
