//! Overall confidence blend, on the 0-100 scale

use crate::config::Config;
use crate::schema::{CONFIDENCE_LEVEL_FIELD, META_SECTION, REQUIRED_SECTIONS};
use crate::utils::json::{serialized_len, truthy_field};
use serde_json::Value;

/// Weighted blend of self-reported confidence, structural completeness, and
/// content richness, rounded half-up to an integer
pub fn calculate_confidence(response: &Value, config: &Config) -> i64 {
    let weights = &config.confidence;
    let richness = content_richness(response, config.scoring.richness_saturation_chars);
    let blended = self_reported(response, weights.default_self_reported)
        * weights.self_reported_weight
        + structural_completeness(response) * weights.completeness_weight
        + richness * weights.richness_weight;
    (blended + 0.5).floor() as i64
}

/// `meta_analysis.confidence_level`, or the default when absent, zero, or non-numeric
fn self_reported(response: &Value, default: f64) -> f64 {
    truthy_field(response, META_SECTION)
        .and_then(|meta| truthy_field(meta, CONFIDENCE_LEVEL_FIELD))
        .and_then(Value::as_f64)
        .unwrap_or(default)
}

/// Percentage of required sections present
pub fn structural_completeness(response: &Value) -> f64 {
    let present = REQUIRED_SECTIONS
        .iter()
        .filter(|section| truthy_field(response, section).is_some())
        .count();
    present as f64 / REQUIRED_SECTIONS.len() as f64 * 100.0
}

/// Serialized size relative to the saturation point, as a percentage
pub fn content_richness(response: &Value, saturation_chars: usize) -> f64 {
    (serialized_len(response) as f64 / saturation_chars as f64).min(1.0) * 100.0
}
