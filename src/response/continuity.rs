//! Conversation continuity check
//!
//! Looks at how well the response ties back to the previous conversation:
//! the self-reported 0-10 continuity score and whether earlier suggestions
//! were tracked.

use crate::config::ThresholdConfig;
use crate::messages::Messages;
use crate::schema::{CONTEXTUAL_SECTION, CONTINUITY_SCORE_FIELD, SUGGESTION_STATUS_FIELD};
use crate::utils::json::{as_number_like, truthy_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuityCheck {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    /// Reported score on the 0-10 scale, 0 when absent
    pub continuity_score: f64,
}

/// Reported continuity score; zero, non-numeric, or absent values yield None
pub fn continuity_score(response: &Value) -> Option<f64> {
    truthy_field(response, CONTEXTUAL_SECTION)
        .and_then(|ctx| truthy_field(ctx, CONTINUITY_SCORE_FIELD))
        .and_then(as_number_like)
        .filter(|score| *score != 0.0)
}

pub fn validate_continuity(
    response: &Value,
    thresholds: &ThresholdConfig,
    messages: &Messages,
) -> ContinuityCheck {
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    let score = continuity_score(response);
    match score {
        Some(s) if s >= thresholds.continuity_strong => {
            strengths.push(messages.strong_continuity.to_string());
        }
        Some(s) if s < thresholds.continuity_weak => {
            issues.push(messages.weak_continuity.to_string());
        }
        Some(_) => {}
        None => issues.push(messages.missing_continuity_score.to_string()),
    }

    let tracked = truthy_field(response, CONTEXTUAL_SECTION)
        .and_then(|ctx| truthy_field(ctx, SUGGESTION_STATUS_FIELD))
        .is_some();
    if tracked {
        strengths.push(messages.tracked_suggestions.to_string());
    } else {
        issues.push(messages.untracked_suggestions.to_string());
    }

    ContinuityCheck {
        is_valid: issues.is_empty(),
        issues,
        strengths,
        continuity_score: score.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use serde_json::json;

    fn check(v: Value) -> ContinuityCheck {
        validate_continuity(&v, &ThresholdConfig::default(), Locale::En.messages())
    }

    #[test]
    fn test_strong_continuity() {
        let result = check(json!({
            "contextual_analysis": {
                "conversation_continuity_score": 9,
                "previous_suggestions_status": [{"id": 1, "status": "done"}]
            }
        }));
        assert!(result.is_valid);
        assert_eq!(result.strengths.len(), 2);
        assert_eq!(result.continuity_score, 9.0);
    }

    #[test]
    fn test_middling_score_has_no_note() {
        let result = check(json!({
            "contextual_analysis": {
                "conversation_continuity_score": 6,
                "previous_suggestions_status": []
            }
        }));
        assert!(result.is_valid);
        assert_eq!(result.strengths, vec!["Previous suggestions were tracked"]);
    }

    #[test]
    fn test_weak_continuity_and_untracked() {
        let result = check(json!({
            "contextual_analysis": {"conversation_continuity_score": "3"}
        }));
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.continuity_score, 3.0);
    }

    #[test]
    fn test_non_numeric_score_counts_as_missing() {
        let result = check(json!({
            "contextual_analysis": {
                "conversation_continuity_score": "high",
                "previous_suggestions_status": ["done"]
            }
        }));
        assert!(!result.is_valid);
        assert_eq!(result.issues, vec!["Missing conversation continuity score"]);
        assert_eq!(result.continuity_score, 0.0);
        let textual = json!({"contextual_analysis": {"conversation_continuity_score": "high"}});
        assert!(continuity_score(&textual).is_none());
    }

    #[test]
    fn test_missing_context_entirely() {
        let result = check(json!({}));
        assert_eq!(
            result.issues,
            vec![
                "Missing conversation continuity score",
                "Previous suggestion status was not tracked"
            ]
        );
        assert_eq!(result.continuity_score, 0.0);
    }
}
