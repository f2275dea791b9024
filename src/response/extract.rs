//! JSON extraction from free-form model output
//!
//! Strategies are tried in order and the first hit wins:
//! a fenced ```json block, then the span from the first `{` to the last `}`,
//! then the whole trimmed input when it is itself brace-delimited.

use crate::error::{AnalyzerError, Result};
use regex::Regex;
use std::sync::LazyLock;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```json\s*([\s\S]*?)\s*```").expect("fenced json regex should compile")
});

/// A named extraction strategy
#[derive(Debug, Clone, Copy)]
pub struct ExtractionStrategy {
    pub name: &'static str,
    pub extract: fn(&str) -> Option<String>,
}

/// Ordered strategy list; earlier entries take precedence
pub static STRATEGIES: [ExtractionStrategy; 3] = [
    ExtractionStrategy {
        name: "fenced_block",
        extract: fenced_block,
    },
    ExtractionStrategy {
        name: "brace_span",
        extract: brace_span,
    },
    ExtractionStrategy {
        name: "whole_input",
        extract: whole_input,
    },
];

fn fenced_block(text: &str) -> Option<String> {
    FENCED_JSON
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn brace_span(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| text[start..=end].to_string())
}

/// Last-resort fallback; any input it accepts is already matched by `brace_span`
fn whole_input(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}')).then(|| trimmed.to_string())
}

/// Extract the JSON payload, returning the winning strategy name with it
pub fn extract_json(text: &str) -> Result<(&'static str, String)> {
    STRATEGIES
        .iter()
        .find_map(|strategy| (strategy.extract)(text).map(|json| (strategy.name, json)))
        .ok_or(AnalyzerError::Extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block_wins_and_is_trimmed() {
        let text = "Here you go:\n```json\n  {\"a\": 1}  \n```\nand {\"b\": 2}";
        let (name, json) = extract_json(text).unwrap();
        assert_eq!(name, "fenced_block");
        assert_eq!(json, "{\"a\": 1}");
    }

    #[test]
    fn test_fence_marker_is_case_insensitive() {
        let (_, json) = extract_json("```JSON\n{\"x\": true}\n```").unwrap();
        assert_eq!(json, "{\"x\": true}");
    }

    #[test]
    fn test_brace_span_is_greedy() {
        let text = "prefix {\"a\": {\"b\": 1}} middle {\"c\": 2} suffix";
        let (name, json) = extract_json(text).unwrap();
        assert_eq!(name, "brace_span");
        assert_eq!(json, "{\"a\": {\"b\": 1}} middle {\"c\": 2}");
    }

    #[test]
    fn test_no_braces_fails() {
        let err = extract_json("no json here at all").unwrap_err();
        assert!(matches!(err, AnalyzerError::Extraction));
    }

    #[test]
    fn test_reversed_braces_fail() {
        assert!(extract_json("} nothing {").is_err());
    }

    #[test]
    fn test_whole_input_is_shadowed_by_brace_span() {
        let text = "  {\"a\": 1}\n";
        assert_eq!(whole_input(text), brace_span(text));
        assert_eq!(extract_json(text).unwrap().0, "brace_span");
        assert_eq!(STRATEGIES[2].name, "whole_input");
    }

    #[test]
    fn test_unterminated_fence_falls_back_to_braces() {
        let (name, json) = extract_json("```json\n{\"a\": 1}").unwrap();
        assert_eq!(name, "brace_span");
        assert_eq!(json, "{\"a\": 1}");
    }
}
