//! Automation readiness score
//!
//! Fuses mining, relocation, drift and prior-state reachability into a
//! 0-100 score plus advisory triggers.

use crate::schema::DriftReport;
use serde::{Deserialize, Serialize};

const RULES_WEIGHT: u32 = 30;
const SUGGESTIONS_WEIGHT: u32 = 30;
const STABLE_SCHEMA_WEIGHT: u32 = 20;
const PRIOR_STATE_WEIGHT: u32 = 20;

/// Scores below this raise `low_automation_value`
pub const LOW_VALUE_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    SchemaDrift,
    LowAutomationValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    pub message: String,
}

/// Signals feeding the score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreInputs<'a> {
    pub rule_count: usize,
    pub suggestion_count: usize,
    pub drift: Option<&'a DriftReport>,
    pub prior_state_reachable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationIntelligence {
    pub score: u32,
    pub triggers: Vec<Trigger>,
    pub rule_count: usize,
    pub suggestion_count: usize,
    pub prior_state_reachable: bool,
}

/// Compute the score and triggers.
pub fn score_automation(inputs: ScoreInputs<'_>) -> AutomationIntelligence {
    let drifted: Vec<&str> = inputs.drift.map(|d| d.changed_tables()).unwrap_or_default();

    let mut score = 0;
    if inputs.rule_count > 0 {
        score += RULES_WEIGHT;
    }
    if inputs.suggestion_count > 0 {
        score += SUGGESTIONS_WEIGHT;
    }
    if drifted.is_empty() {
        score += STABLE_SCHEMA_WEIGHT;
    }
    if inputs.prior_state_reachable {
        score += PRIOR_STATE_WEIGHT;
    }
    let score = score.min(100);

    let mut triggers = Vec::new();
    if !drifted.is_empty() {
        triggers.push(Trigger {
            kind: TriggerKind::SchemaDrift,
            message: format!("Schema changed for: {}", drifted.join(", ")),
        });
    }
    if score < LOW_VALUE_THRESHOLD {
        triggers.push(Trigger {
            kind: TriggerKind::LowAutomationValue,
            message: format!("Automation score {} is below {}", score, LOW_VALUE_THRESHOLD),
        });
    }

    AutomationIntelligence {
        score,
        triggers,
        rule_count: inputs.rule_count,
        suggestion_count: inputs.suggestion_count,
        prior_state_reachable: inputs.prior_state_reachable,
    }
}
