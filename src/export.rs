//! Exported inspiration data consumed by the prompt generator
//!
//! The web app exports inspirations, AI conversation history, and connection
//! edges as one JSON document. Known fields are typed; everything else is kept
//! in `extra` so the prompt shows the records as exported.

use crate::deserializers::{
    de_option_f64_forgiving, de_option_string_forgiving, de_string_forgiving,
    de_string_list_forgiving, de_vec_or_default,
};
use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// A user-created note record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inspiration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "de_string_forgiving")]
    pub title: String,
    #[serde(default, deserialize_with = "de_string_forgiving")]
    pub content: String,
    #[serde(default, deserialize_with = "de_string_list_forgiving")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(
        default,
        deserialize_with = "de_option_string_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_option_string_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_option_string_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One prompt/response exchange with an AI tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspiration_id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "de_option_string_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_feedback: Option<Value>,
    #[serde(
        default,
        deserialize_with = "de_option_string_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Edge between two inspirations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_inspiration_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_inspiration_id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "de_option_string_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_option_f64_forgiving",
        skip_serializing_if = "Option::is_none"
    )]
    pub strength: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Complete export as written by the web app
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportBundle {
    #[serde(default, deserialize_with = "de_vec_or_default")]
    pub inspirations: Vec<Inspiration>,
    /// Newest first, as exported
    #[serde(default, deserialize_with = "de_vec_or_default")]
    pub conversations: Vec<Conversation>,
    #[serde(default, deserialize_with = "de_vec_or_default")]
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ExportBundle {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AnalyzerError::io(path.display().to_string(), e))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| AnalyzerError::InvalidInput {
            message: format!("export bundle is not valid: {e}"),
        })
    }

    /// BLAKE3 hex digest of the canonical serialization
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    /// The `n` most recently appended conversations, in export order
    pub fn recent_conversations(&self, n: usize) -> &[Conversation] {
        let start = self.conversations.len().saturating_sub(n);
        &self.conversations[start..]
    }
}

/// Conversation context summarized for the prompt header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSummary {
    pub conversation_count: usize,
    /// First 50 characters of each recent prompt
    pub recent_topics: Vec<String>,
    /// Recent conversations that carry user feedback
    pub feedback_count: usize,
    pub last_interaction: Option<String>,
}

const RECENT_WINDOW: usize = 10;
const TOPIC_CHARS: usize = 50;

impl ContextSummary {
    pub fn from_bundle(bundle: &ExportBundle) -> Self {
        let recent = bundle.recent_conversations(RECENT_WINDOW);
        Self {
            conversation_count: bundle.conversations.len(),
            recent_topics: recent
                .iter()
                .filter_map(|c| c.ai_prompt.as_deref())
                .map(|p| p.chars().take(TOPIC_CHARS).collect())
                .collect(),
            feedback_count: recent
                .iter()
                .filter(|c| {
                    c.user_feedback
                        .as_ref()
                        .is_some_and(crate::utils::json::is_truthy)
                })
                .count(),
            last_interaction: bundle
                .conversations
                .first()
                .and_then(|c| c.created_at.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ExportBundle {
        ExportBundle::from_json(
            &json!({
                "inspirations": [
                    {"id": 1, "title": "Pocket garden", "content": "Modular balcony planters", "tags": ["home"], "priority": "high", "category_id": "c1"}
                ],
                "conversations": [
                    {"ai_prompt": "Analyze the pocket garden idea and suggest a go-to-market plan", "user_feedback": "useful", "created_at": "2025-03-02T10:00:00Z"},
                    {"ai_prompt": "Short prompt", "user_feedback": null, "created_at": "2025-03-01T10:00:00Z"}
                ],
                "connections": [
                    {"source_inspiration_id": 1, "target_inspiration_id": 2, "connection_type": "related", "strength": 0.8}
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let bundle = sample();
        assert_eq!(bundle.inspirations[0].extra["category_id"], json!("c1"));
        let v = serde_json::to_value(&bundle.inspirations[0]).unwrap();
        assert_eq!(v["category_id"], json!("c1"));
        assert_eq!(v["priority"], json!("high"));
    }

    #[test]
    fn test_context_summary() {
        let summary = ContextSummary::from_bundle(&sample());
        assert_eq!(summary.conversation_count, 2);
        assert_eq!(summary.feedback_count, 1);
        assert_eq!(summary.recent_topics[0].chars().count(), 50);
        assert_eq!(summary.recent_topics[1], "Short prompt");
        assert_eq!(summary.last_interaction.as_deref(), Some("2025-03-02T10:00:00Z"));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = sample().fingerprint().unwrap();
        let b = sample().fingerprint().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_invalid_bundle_rejected() {
        assert!(matches!(
            ExportBundle::from_json("[1, 2]"),
            Err(AnalyzerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_nullable_columns_are_accepted() {
        let bundle = ExportBundle::from_json(
            r#"{
                "inspirations": [{"id": 1, "title": "t", "content": null, "tags": null, "category": null}],
                "conversations": [{"ai_prompt": null, "created_at": null}],
                "connections": [{"source_inspiration_id": 1, "strength": "0.4", "connection_type": null}]
            }"#,
        )
        .unwrap();
        assert_eq!(bundle.inspirations[0].title, "t");
        assert_eq!(bundle.inspirations[0].content, "");
        assert!(bundle.inspirations[0].tags.is_empty());
        assert!(bundle.conversations[0].ai_prompt.is_none());
        assert_eq!(bundle.connections[0].strength, Some(0.4));

        let summary = ContextSummary::from_bundle(&bundle);
        assert!(summary.recent_topics.is_empty());
        assert!(summary.last_interaction.is_none());
    }

    #[test]
    fn test_null_record_lists_are_empty() {
        let bundle =
            ExportBundle::from_json(r#"{"inspirations": null, "conversations": null}"#).unwrap();
        assert!(bundle.inspirations.is_empty());
        assert!(bundle.conversations.is_empty());
        assert!(bundle.connections.is_empty());
    }

    #[test]
    fn test_recent_conversations_window() {
        let bundle = sample();
        assert_eq!(bundle.recent_conversations(1).len(), 1);
        assert_eq!(bundle.recent_conversations(5).len(), 2);
    }
}
