//! Persona rule table: externally authored tone/goal/forbidden-language
//! configuration, one rule resolved per session.
//!
//! Resolution order is fixed: exact nickname match first, then the first
//! rule whose present axis filters all match the profile, then the first
//! rule in the table. Under a fixed table ordering this is deterministic.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::survey::Profile;

/// Axis filters for rule selection. A blank or absent field is a wildcard
/// for that axis. Values are the Korean profile labels
/// (e.g. "안정형" / "표현형" / "높음").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxisFilter {
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub emotion_reg: Option<String>,
    #[serde(default)]
    pub efficacy: Option<String>,
}

impl AxisFilter {
    fn matches(&self, profile: &Profile) -> bool {
        axis_matches(&self.attachment, profile.attachment.label())
            && axis_matches(&self.emotion_reg, profile.regulation.label())
            && axis_matches(&self.efficacy, profile.efficacy.label())
    }
}

fn axis_matches(filter: &Option<String>, value: &str) -> bool {
    match filter.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

/// One externally authored persona rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaRule {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub axis: AxisFilter,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub core_traits: String,
    #[serde(default)]
    pub forbidden_phrases: Vec<String>,
}

/// The loaded rule table. Guaranteed non-empty.
#[derive(Debug, Clone)]
pub struct PersonaTable {
    rules: Vec<PersonaRule>,
}

impl PersonaTable {
    /// Load rules from a JSON file. An absent file, a non-array, or an
    /// empty array refuses to load: running without personas is a
    /// configuration fault, not a degraded mode.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::RuleTableMissing {
                path: path.to_path_buf(),
            });
        }
        let data = std::fs::read_to_string(path)?;
        let rules: Vec<PersonaRule> =
            serde_json::from_str(&data).map_err(|e| ConfigError::InvalidRuleTable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::from_rules(rules).map_err(|reason| ConfigError::InvalidRuleTable {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Build a table from in-memory rules (used by tests and embedding
    /// callers). Fails on an empty sequence.
    pub fn from_rules(rules: Vec<PersonaRule>) -> Result<Self, String> {
        if rules.is_empty() {
            return Err("rule table is empty".to_string());
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve exactly one rule for a session.
    pub fn resolve(&self, profile: &Profile, nickname: Option<&str>) -> &PersonaRule {
        if let Some(nick) = nickname.map(str::trim).filter(|n| !n.is_empty()) {
            if let Some(rule) = self.rules.iter().find(|r| r.nickname.trim() == nick) {
                return rule;
            }
        }

        if let Some(rule) = self.rules.iter().find(|r| r.axis.matches(profile)) {
            return rule;
        }

        // Nothing matched; the first rule is the table's designated default.
        &self.rules[0]
    }
}
