//! Repair pipeline for validated responses
//!
//! Repairs run on a deep copy in a fixed order: inject missing sections,
//! coerce recommendation lists into arrays, enhance weak immediate actions,
//! then patch continuity tracking. Each step appends to a call-local
//! [`RepairLog`]; out-of-range values are reported by validation but never
//! clamped here.

use super::continuity::ContinuityCheck;
use super::quality::QualityCheck;
use super::structure::StructureValidation;
use crate::config::Config;
use crate::messages::{Messages, fill};
use crate::schema::{
    ARRAY_REPAIR_PATHS, CONTEXTUAL_SECTION, IMMEDIATE_ACTIONS_FIELD, RECOMMENDATIONS_SECTION,
    SUGGESTION_STATUS_FIELD, default_section,
};
use crate::utils::json::{get_path, is_truthy, set_path};
use serde::Serialize;
use serde_json::{Map, Value};

/// Ordered, human-readable record of the corrections applied in one call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepairLog(Vec<String>);

impl RepairLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        tracing::debug!(repair = %entry, "applied repair");
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.0
    }
}

/// Validation findings the repair steps act on
#[derive(Debug, Clone, Copy)]
pub struct Findings<'a> {
    pub structure: &'a StructureValidation,
    pub quality: &'a QualityCheck,
    pub continuity: &'a ContinuityCheck,
}

/// Produce a repaired copy of `response` together with its repair log
pub fn repair(
    response: &Value,
    findings: Findings<'_>,
    config: &Config,
    messages: &Messages,
) -> (Value, RepairLog) {
    let mut log = RepairLog::new();
    // A non-object root carries no sections worth keeping.
    let mut repaired = match response {
        Value::Object(_) => response.clone(),
        _ => Value::Object(Map::new()),
    };

    inject_missing_sections(&mut repaired, findings.structure, messages, &mut log);
    coerce_array_fields(&mut repaired, messages, &mut log);
    if findings.quality.scores.actionability < config.thresholds.actionability {
        enhance_actions(&mut repaired, config.action_suffix(), messages, &mut log);
    }
    if findings.continuity.continuity_score < config.thresholds.continuity_weak {
        improve_continuity(&mut repaired, messages, &mut log);
    }

    (repaired, log)
}

fn inject_missing_sections(
    response: &mut Value,
    structure: &StructureValidation,
    messages: &Messages,
    log: &mut RepairLog,
) {
    let Some(map) = response.as_object_mut() else {
        return;
    };
    for section in &structure.missing {
        let value = default_section(section, messages).unwrap_or_else(|| Value::Object(Map::new()));
        map.insert(section.clone(), value);
        log.record(fill(messages.repaired_missing_section, section));
    }
}

fn coerce_array_fields(response: &mut Value, messages: &Messages, log: &mut RepairLog) {
    for path in ARRAY_REPAIR_PATHS {
        let wrapped = match get_path(response, path) {
            Some(value) if is_truthy(value) && !value.is_array() => {
                Value::Array(vec![value.clone()])
            }
            _ => continue,
        };
        if set_path(response, path, wrapped) {
            log.record(fill(messages.repaired_array_type, path));
        }
    }
}

fn enhance_actions(response: &mut Value, suffix: &str, messages: &Messages, log: &mut RepairLog) {
    let Some(actions) = response
        .get_mut(RECOMMENDATIONS_SECTION)
        .and_then(|recs| recs.get_mut(IMMEDIATE_ACTIONS_FIELD))
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    let mut changed = false;
    for action in actions.iter_mut() {
        if let Value::String(text) = action
            && !text.ends_with(suffix)
        {
            text.push_str(suffix);
            changed = true;
        }
    }
    if changed {
        log.record(messages.enhanced_actionability);
    }
}

fn improve_continuity(response: &mut Value, messages: &Messages, log: &mut RepairLog) {
    let Some(contextual) = response
        .get_mut(CONTEXTUAL_SECTION)
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    let tracked = contextual
        .get(SUGGESTION_STATUS_FIELD)
        .is_some_and(is_truthy);
    if !tracked {
        contextual.insert(
            SUGGESTION_STATUS_FIELD.to_string(),
            Value::Array(vec![Value::String(messages.continuity_placeholder.to_string())]),
        );
        log.record(messages.added_continuity_hint);
    }
}
