//! Display-oriented view of a repaired analysis response

use crate::messages::Messages;
use crate::schema::UNRESTRICTED_SECTION;
use crate::utils::json::truthy_field;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayView {
    pub context_section: ContextSection,
    pub analysis_section: AnalysisSection,
    pub network_section: NetworkSection,
    pub perspective_section: TitledSection,
    pub predictive_section: PredictiveSection,
    pub recommendations_section: RecommendationsSection,
    pub unrestricted_section: Option<UnrestrictedSection>,
    pub meta_section: MetaSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitledSection {
    pub title: String,
    pub content: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextSection {
    pub title: String,
    pub content: Value,
    pub score: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSection {
    pub title: String,
    pub content: Value,
    pub feasibility: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkSection {
    pub title: String,
    pub content: Value,
    pub connections: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictiveSection {
    pub title: String,
    pub content: Value,
    pub probability: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsSection {
    pub title: String,
    pub immediate: Value,
    pub short_term: Value,
    pub long_term: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnrestrictedSection {
    pub title: String,
    pub content: Value,
    pub warning: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaSection {
    pub title: String,
    pub confidence: Value,
    pub completeness: Value,
    pub follow_up: Value,
}

fn field(response: &Value, section: &str) -> Value {
    response.get(section).cloned().unwrap_or(Value::Null)
}

fn nested(response: &Value, section: &str, key: &str) -> Value {
    response
        .get(section)
        .and_then(|s| s.get(key))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Nested list, or `[]` when absent or falsy
fn nested_list(response: &Value, section: &str, key: &str) -> Value {
    response
        .get(section)
        .and_then(|s| truthy_field(s, key))
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

impl DisplayView {
    pub fn from_response(response: &Value, messages: &Messages) -> Self {
        Self {
            context_section: ContextSection {
                title: messages.title_context.to_string(),
                content: field(response, "contextual_analysis"),
                score: nested(response, "contextual_analysis", "conversation_continuity_score"),
            },
            analysis_section: AnalysisSection {
                title: messages.title_deep_dive.to_string(),
                content: field(response, "inspiration_deep_dive"),
                feasibility: nested(response, "inspiration_deep_dive", "feasibility_matrix"),
            },
            network_section: NetworkSection {
                title: messages.title_network.to_string(),
                content: field(response, "network_insights"),
                connections: nested(response, "network_insights", "connection_patterns"),
            },
            perspective_section: TitledSection {
                title: messages.title_perspectives.to_string(),
                content: field(response, "multi_perspective_analysis"),
            },
            predictive_section: PredictiveSection {
                title: messages.title_predictive.to_string(),
                content: field(response, "predictive_analysis"),
                probability: nested(response, "predictive_analysis", "success_probability"),
            },
            recommendations_section: RecommendationsSection {
                title: messages.title_recommendations.to_string(),
                immediate: nested_list(response, "actionable_recommendations", "immediate_actions"),
                short_term: nested_list(response, "actionable_recommendations", "short_term_goals"),
                long_term: nested_list(response, "actionable_recommendations", "long_term_vision"),
            },
            unrestricted_section: truthy_field(response, UNRESTRICTED_SECTION).map(|content| {
                UnrestrictedSection {
                    title: messages.title_unrestricted.to_string(),
                    content: content.clone(),
                    warning: messages.unrestricted_caution.to_string(),
                }
            }),
            meta_section: MetaSection {
                title: messages.title_meta.to_string(),
                confidence: nested(response, "meta_analysis", "confidence_level"),
                completeness: nested(response, "meta_analysis", "analysis_completeness"),
                follow_up: nested_list(response, "meta_analysis", "follow_up_questions"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use serde_json::json;

    #[test]
    fn test_view_defaults_for_sparse_response() {
        let view = DisplayView::from_response(&json!({}), Locale::En.messages());
        assert_eq!(view.recommendations_section.immediate, json!([]));
        assert_eq!(view.meta_section.follow_up, json!([]));
        assert_eq!(view.context_section.score, Value::Null);
        assert!(view.unrestricted_section.is_none());
    }

    #[test]
    fn test_view_picks_nested_values() {
        let response = json!({
            "contextual_analysis": {"conversation_continuity_score": 8},
            "predictive_analysis": {"success_probability": 65},
            "actionable_recommendations": {"immediate_actions": ["Call the supplier today"]},
            "unrestricted_insights": {"unconventional_approaches": ["Barter"]}
        });
        let view = DisplayView::from_response(&response, Locale::En.messages());
        assert_eq!(view.context_section.score, json!(8));
        assert_eq!(view.predictive_section.probability, json!(65));
        assert_eq!(
            view.recommendations_section.immediate,
            json!(["Call the supplier today"])
        );
        let extended = view.unrestricted_section.expect("extended section present");
        assert_eq!(extended.content["unconventional_approaches"][0], "Barter");
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = DisplayView::from_response(&json!({}), Locale::En.messages());
        let v = serde_json::to_value(&view).unwrap();
        assert!(v.get("recommendationsSection").is_some());
        assert!(v["recommendationsSection"].get("shortTerm").is_some());
        assert_eq!(v["unrestrictedSection"], Value::Null);
    }
}
