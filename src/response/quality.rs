//! Heuristic content-quality scoring
//!
//! Three fractions in [0, 1]: depth (how many child keys each section has),
//! actionability (how concrete the recommendation lists are), and innovation
//! (bilingual keyword hits anywhere in the response).

use crate::config::Config;
use crate::messages::Messages;
use crate::schema::{
    INNOVATION_KEYWORDS, RECOMMENDATION_LIST_FIELDS, RECOMMENDATIONS_SECTION, REQUIRED_SECTIONS,
};
use crate::utils::json::{child_count, truthy_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    pub depth: f64,
    pub actionability: f64,
    pub innovation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityCheck {
    pub is_valid: bool,
    pub issues: Vec<String>,
    /// Non-blocking hints
    pub suggestions: Vec<String>,
    pub scores: QualityScores,
}

pub fn check_quality(response: &Value, config: &Config, messages: &Messages) -> QualityCheck {
    let scores = QualityScores {
        depth: assess_depth(response, config.scoring.depth_saturation),
        actionability: assess_actionability(response, config.scoring.actionability_saturation),
        innovation: assess_innovation(response, config.scoring.innovation_saturation),
    };

    let mut issues = Vec::new();
    let mut suggestions = Vec::new();
    if scores.depth < config.thresholds.depth {
        issues.push(messages.shallow_analysis.to_string());
    }
    if scores.actionability < config.thresholds.actionability {
        issues.push(messages.low_actionability.to_string());
    }
    if scores.innovation < config.thresholds.innovation {
        suggestions.push(messages.more_innovation.to_string());
    }

    QualityCheck {
        is_valid: issues.is_empty(),
        issues,
        suggestions,
        scores,
    }
}

/// Average over required sections of min(children / saturation, 1)
pub fn assess_depth(response: &Value, saturation: f64) -> f64 {
    let total: f64 = REQUIRED_SECTIONS
        .iter()
        .filter_map(|section| truthy_field(response, section))
        .map(|value| (child_count(value) as f64 / saturation).min(1.0))
        .sum();
    total / REQUIRED_SECTIONS.len() as f64
}

/// Points for concrete recommendation items, saturating at `saturation`
pub fn assess_actionability(response: &Value, saturation: f64) -> f64 {
    let Some(recommendations) = truthy_field(response, RECOMMENDATIONS_SECTION) else {
        return 0.0;
    };

    let points: f64 = RECOMMENDATION_LIST_FIELDS
        .iter()
        .filter_map(|field| recommendations.get(field).and_then(Value::as_array))
        .flatten()
        .map(action_points)
        .sum();

    (points / saturation).min(1.0)
}

fn action_points(action: &Value) -> f64 {
    match action {
        Value::String(text) if text.chars().count() > 10 => 1.0,
        Value::Object(_) if truthy_field(action, "description").is_some() => 1.5,
        _ => 0.0,
    }
}

/// Distinct innovation keywords found, saturating at `saturation`
pub fn assess_innovation(response: &Value, saturation: f64) -> f64 {
    let text = serde_json::to_string(response)
        .unwrap_or_default()
        .to_lowercase();
    let hits = INNOVATION_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(&keyword.to_lowercase()))
        .count();
    (hits as f64 / saturation).min(1.0)
}
