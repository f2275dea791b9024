//! Structural validation against the fixed section schema

use crate::messages::{Messages, fill};
use crate::schema::{
    CONFIDENCE_LEVEL_FIELD, CONTEXTUAL_REQUIRED_FIELDS, CONTEXTUAL_SECTION, META_SECTION,
    RECOMMENDATION_LIST_FIELDS, RECOMMENDATIONS_SECTION, REQUIRED_SECTIONS, UNRESTRICTED_SECTION,
};
use crate::utils::json::{is_truthy, truthy_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Required sections that were absent or falsy
    pub missing: Vec<String>,
    /// Share of required sections present, 0-100
    pub completeness: f64,
}

pub fn validate_structure(
    response: &Value,
    unrestricted: bool,
    messages: &Messages,
) -> StructureValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut missing = Vec::new();

    for section in REQUIRED_SECTIONS {
        match truthy_field(response, section) {
            None => {
                missing.push(section.to_string());
                errors.push(fill(messages.missing_section, section));
            }
            // Arrays pass, matching a `typeof === "object"` check.
            Some(value) if !(value.is_object() || value.is_array()) => {
                errors.push(fill(messages.section_not_object, section));
            }
            Some(_) => {}
        }
    }

    if unrestricted && truthy_field(response, UNRESTRICTED_SECTION).is_none() {
        warnings.push(messages.unrestricted_section_recommended.to_string());
    }

    check_nested_contracts(response, messages, &mut errors, &mut warnings);

    let total = REQUIRED_SECTIONS.len() as f64;
    StructureValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        completeness: (total - missing.len() as f64) / total * 100.0,
        missing,
    }
}

fn check_nested_contracts(
    response: &Value,
    messages: &Messages,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    if let Some(contextual) = truthy_field(response, CONTEXTUAL_SECTION) {
        for field in CONTEXTUAL_REQUIRED_FIELDS {
            if truthy_field(contextual, field).is_none() {
                warnings.push(fill(messages.contextual_field_missing, field));
            }
        }
    }

    if let Some(recommendations) = truthy_field(response, RECOMMENDATIONS_SECTION) {
        for field in RECOMMENDATION_LIST_FIELDS {
            let is_list = recommendations
                .get(field)
                .is_some_and(|v| is_truthy(v) && v.is_array());
            if !is_list {
                warnings.push(fill(messages.recommendation_not_array, field));
            }
        }
    }

    if let Some(meta) = truthy_field(response, META_SECTION) {
        let in_range = meta
            .get(CONFIDENCE_LEVEL_FIELD)
            .and_then(Value::as_f64)
            .is_some_and(|level| (0.0..=100.0).contains(&level));
        if !in_range {
            errors.push(messages.confidence_out_of_range.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "contextual_analysis": {"conversation_continuity_score": 7, "previous_suggestions_status": ["done"]},
            "inspiration_deep_dive": {"a": 1},
            "network_insights": {"a": 1},
            "predictive_analysis": {"a": 1},
            "multi_perspective_analysis": {"a": 1},
            "actionable_recommendations": {"immediate_actions": [], "short_term_goals": [], "long_term_vision": []},
            "meta_analysis": {"confidence_level": 80}
        })
    }

    #[test]
    fn test_complete_response_is_valid() {
        let result = validate_structure(&complete(), false, Locale::En.messages());
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.missing.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.completeness, 100.0);
    }

    #[test]
    fn test_missing_sections_reduce_completeness() {
        let mut v = complete();
        let map = v.as_object_mut().unwrap();
        map.remove("network_insights");
        map.insert("predictive_analysis".into(), json!(null));
        let result = validate_structure(&v, false, Locale::En.messages());
        assert!(!result.is_valid);
        assert_eq!(result.missing, vec!["network_insights", "predictive_analysis"]);
        assert!((result.completeness - 500.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_scalar_section_is_error_not_missing() {
        let mut v = complete();
        v["inspiration_deep_dive"] = json!("a plain sentence");
        let result = validate_structure(&v, false, Locale::En.messages());
        assert!(result.missing.is_empty());
        assert_eq!(
            result.errors,
            vec!["Section inspiration_deep_dive should be an object"]
        );
    }

    #[test]
    fn test_array_section_is_accepted() {
        let mut v = complete();
        v["inspiration_deep_dive"] = json!(["a", "b", "c"]);
        let result = validate_structure(&v, false, Locale::En.messages());
        assert!(result.is_valid, "{:?}", result.errors);
        assert_eq!(result.completeness, 100.0);
    }

    #[test]
    fn test_unrestricted_missing_is_warning_only() {
        let result = validate_structure(&complete(), true, Locale::En.messages());
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_confidence_out_of_range_is_error() {
        let mut v = complete();
        v["meta_analysis"]["confidence_level"] = json!(150);
        let result = validate_structure(&v, false, Locale::En.messages());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["confidence_level should be a number between 0 and 100"]
        );

        v["meta_analysis"]["confidence_level"] = json!("90");
        assert!(!validate_structure(&v, false, Locale::En.messages()).is_valid);
    }

    #[test]
    fn test_nested_contract_warnings() {
        let mut v = complete();
        v["contextual_analysis"] = json!({"evolution_trend": "up"});
        v["actionable_recommendations"]["short_term_goals"] = json!("just one");
        let result = validate_structure(&v, false, Locale::En.messages());
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 3);
        assert!(result.warnings.iter().any(|w| w.contains("short_term_goals")));
    }
}
