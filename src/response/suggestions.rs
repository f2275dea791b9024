//! Remediation hints attached to failed parses

use crate::error::AnalyzerError;
use crate::messages::Messages;

/// Non-binding suggestions for a failed extraction or parse
pub fn error_suggestions(
    error: &AnalyzerError,
    original_text: &str,
    short_response_chars: usize,
    messages: &Messages,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if error.is_json_related() {
        suggestions.extend(messages.json_format_suggestions.iter().map(|s| s.to_string()));
    }
    if original_text.chars().count() < short_response_chars {
        suggestions.extend(messages.too_short_suggestions.iter().map(|s| s.to_string()));
    }
    if !original_text.contains('{') {
        suggestions.extend(messages.no_json_suggestions.iter().map(|s| s.to_string()));
    }

    suggestions
}
