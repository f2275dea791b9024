//! Static schema tables for analysis responses
//!
//! Section names, nested field contracts, innovation keywords, and the canned
//! defaults injected by repair.

use crate::messages::Messages;
use serde_json::{Value, json};

/// Sections every analysis response must carry
pub const REQUIRED_SECTIONS: [&str; 7] = [
    "contextual_analysis",
    "inspiration_deep_dive",
    "network_insights",
    "predictive_analysis",
    "multi_perspective_analysis",
    "actionable_recommendations",
    "meta_analysis",
];

/// Extra section expected when the extended schema is requested
pub const UNRESTRICTED_SECTION: &str = "unrestricted_insights";

pub const CONTEXTUAL_SECTION: &str = "contextual_analysis";
pub const RECOMMENDATIONS_SECTION: &str = "actionable_recommendations";
pub const META_SECTION: &str = "meta_analysis";

pub const CONTINUITY_SCORE_FIELD: &str = "conversation_continuity_score";
pub const SUGGESTION_STATUS_FIELD: &str = "previous_suggestions_status";
pub const CONFIDENCE_LEVEL_FIELD: &str = "confidence_level";
pub const IMMEDIATE_ACTIONS_FIELD: &str = "immediate_actions";

/// Fields `contextual_analysis` should carry
pub const CONTEXTUAL_REQUIRED_FIELDS: [&str; 2] = [CONTINUITY_SCORE_FIELD, SUGGESTION_STATUS_FIELD];

/// Array-typed recommendation lists that feed the actionability score
pub const RECOMMENDATION_LIST_FIELDS: [&str; 3] =
    ["immediate_actions", "short_term_goals", "long_term_vision"];

/// Paths coerced into arrays during repair
pub const ARRAY_REPAIR_PATHS: [&str; 4] = [
    "actionable_recommendations.immediate_actions",
    "actionable_recommendations.short_term_goals",
    "actionable_recommendations.long_term_vision",
    "actionable_recommendations.pivot_options",
];

/// Bilingual keywords signalling innovative thinking
pub const INNOVATION_KEYWORDS: [&str; 9] = [
    "創新",
    "突破",
    "顛覆",
    "革命性",
    "前所未有",
    "innovation",
    "breakthrough",
    "disruptive",
    "revolutionary",
];

/// Canned content for a missing section, or `None` for unknown names
pub fn default_section(name: &str, messages: &Messages) -> Option<Value> {
    let value = match name {
        "contextual_analysis" => json!({
            "conversation_continuity_score": 5,
            "previous_suggestions_status": [],
            "user_engagement_pattern": messages.default_engagement_pattern,
            "evolution_trend": messages.default_evolution_trend
        }),
        "inspiration_deep_dive" => json!({
            "feasibility_matrix": {},
            "innovation_potential": {},
            "implementation_roadmap": [],
            "resource_requirements": {}
        }),
        "network_insights" => json!({
            "connection_patterns": [],
            "cluster_analysis": {},
            "synergy_opportunities": [],
            "potential_conflicts": []
        }),
        "predictive_analysis" => json!({
            "next_inspiration_probability": {},
            "market_timing_analysis": {},
            "technology_readiness": {},
            "success_probability": 50
        }),
        "multi_perspective_analysis" => json!({
            "executive_view": {},
            "designer_view": {},
            "technical_view": {},
            "investor_view": {},
            "user_view": {}
        }),
        "actionable_recommendations" => json!({
            "immediate_actions": [messages.default_immediate_action],
            "short_term_goals": [messages.default_short_term_goal],
            "long_term_vision": [messages.default_long_term_vision],
            "pivot_options": []
        }),
        "meta_analysis" => json!({
            "confidence_level": 70,
            "analysis_completeness": 80,
            "follow_up_questions": [messages.default_follow_up]
        }),
        _ => return None,
    };
    Some(value)
}

/// Response template shown to the model in the analysis prompt
pub fn response_template(include_unrestricted: bool) -> String {
    let unrestricted = if include_unrestricted {
        r#"
  "unrestricted_insights": {
    "unconventional_approaches": [],
    "overlooked_opportunities": [],
    "risk_reward_analysis": {}
  },"#
    } else {
        ""
    };

    format!(
        r#"{{
  "contextual_analysis": {{
    "conversation_continuity_score": 0-10,
    "previous_suggestions_status": [],
    "user_engagement_pattern": "string",
    "evolution_trend": "string"
  }},
  "inspiration_deep_dive": {{
    "feasibility_matrix": {{}},
    "innovation_potential": {{}},
    "implementation_roadmap": [],
    "resource_requirements": {{}}
  }},
  "network_insights": {{
    "connection_patterns": [],
    "cluster_analysis": {{}},
    "synergy_opportunities": [],
    "potential_conflicts": []
  }},{unrestricted}
  "predictive_analysis": {{
    "next_inspiration_probability": {{}},
    "market_timing_analysis": {{}},
    "technology_readiness": {{}},
    "success_probability": 0-100
  }},
  "multi_perspective_analysis": {{
    "executive_view": {{}},
    "designer_view": {{}},
    "technical_view": {{}},
    "investor_view": {{}},
    "user_view": {{}}
  }},
  "actionable_recommendations": {{
    "immediate_actions": [],
    "short_term_goals": [],
    "long_term_vision": [],
    "pivot_options": []
  }},
  "meta_analysis": {{
    "confidence_level": 0-100,
    "analysis_completeness": 0-100,
    "follow_up_questions": []
  }}
}}"#
    )
}
