//! Wrap a validated response with processing metadata and keep a local backup

use crate::error::{AnalyzerError, Result};
use crate::prompts::{AiTool, PROMPT_VERSION};
use crate::response::ParseOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct ProcessingMetadata {
    pub analyzer_version: &'static str,
    pub tool_used: AiTool,
    pub unrestricted_mode: bool,
    pub processing_time: DateTime<Utc>,
    pub analysis_id: String,
    pub thread_id: String,
    /// Overall confidence from validation, 0-100
    pub confidence: i64,
    /// Whether every validation check passed before repair
    pub validated: bool,
}

const METADATA_KEY: &str = "metadata";

/// Repaired analysis ready to be stored
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedAnalysis {
    #[serde(flatten)]
    pub analysis: serde_json::Map<String, Value>,
    pub metadata: ProcessingMetadata,
}

/// `ANA_<millis>_<9 hex chars>`
pub fn generate_analysis_id(at: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("ANA_{}_{}", at.timestamp_millis(), &random[..9])
}

/// `THR_<millis>_<tool>_<UNRES|STD>`
pub fn generate_thread_id(at: DateTime<Utc>, tool: AiTool, unrestricted: bool) -> String {
    let mode = if unrestricted { "UNRES" } else { "STD" };
    format!("THR_{}_{}_{}", at.timestamp_millis(), tool, mode)
}

/// Build the stored form of a parsed response.
///
/// Reports whose checks failed are still accepted since their data has been
/// repaired; only extraction or parse failures are rejected.
pub fn finalize(outcome: ParseOutcome, tool: AiTool) -> Result<ProcessedAnalysis> {
    let report = match outcome {
        ParseOutcome::Report(report) => *report,
        ParseOutcome::Failure(failure) => {
            return Err(AnalyzerError::InvalidInput {
                message: format!("cannot finalize an unparsed response: {}", failure.error),
            });
        }
    };

    let mut analysis = match report.data {
        Value::Object(map) => map,
        _ => {
            return Err(AnalyzerError::InvalidInput {
                message: "repaired analysis is not a JSON object".to_string(),
            });
        }
    };

    // Processing metadata replaces any top-level `metadata` the model produced.
    analysis.retain(|key, _| key != METADATA_KEY);

    let now = Utc::now();
    let unrestricted = report.metadata.unrestricted_mode;
    Ok(ProcessedAnalysis {
        analysis,
        metadata: ProcessingMetadata {
            analyzer_version: PROMPT_VERSION,
            tool_used: tool,
            unrestricted_mode: unrestricted,
            processing_time: now,
            analysis_id: generate_analysis_id(now),
            thread_id: generate_thread_id(now, tool, unrestricted),
            confidence: report.metadata.confidence,
            validated: report.success,
        },
    })
}

impl ProcessedAnalysis {
    /// Write `analysis-backup-<millis>.json` into `dir` and return its path
    pub fn write_backup(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .map_err(|e| AnalyzerError::io(dir.display().to_string(), e))?;
        let path = dir.join(format!(
            "analysis-backup-{}.json",
            self.metadata.processing_time.timestamp_millis()
        ));
        let body = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, body)
            .map_err(|e| AnalyzerError::io(path.display().to_string(), e))?;
        tracing::info!(path = %path.display(), "wrote analysis backup");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseParser;
    use chrono::TimeZone;

    #[test]
    fn test_id_formats() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let analysis_id = generate_analysis_id(at);
        assert!(analysis_id.starts_with("ANA_1700000000123_"));
        assert_eq!(analysis_id.len(), "ANA_1700000000123_".len() + 9);

        assert_eq!(
            generate_thread_id(at, AiTool::Cursor, true),
            "THR_1700000000123_cursor_UNRES"
        );
        assert_eq!(
            generate_thread_id(at, AiTool::Claude, false),
            "THR_1700000000123_claude_STD"
        );
    }

    #[test]
    fn test_finalize_rejects_failures() {
        let outcome = ResponseParser::default().parse_and_validate("no braces", false);
        assert!(finalize(outcome, AiTool::Claude).is_err());
    }

    #[test]
    fn test_finalize_flattens_repaired_sections() {
        let outcome = ResponseParser::default()
            .parse_and_validate("{\"meta_analysis\": {\"confidence_level\": 90}}", true);
        let processed = finalize(outcome, AiTool::Gemini).unwrap();
        let v = serde_json::to_value(&processed).unwrap();
        assert_eq!(v["meta_analysis"]["confidence_level"], 90);
        assert!(v["contextual_analysis"].is_object());
        assert_eq!(v["metadata"]["tool_used"], "gemini");
        assert_eq!(v["metadata"]["unrestricted_mode"], true);
        assert_eq!(v["metadata"]["validated"], false);
    }

    #[test]
    fn test_model_metadata_is_replaced_not_duplicated() {
        let outcome = ResponseParser::default().parse_and_validate(
            "{\"meta_analysis\": {\"confidence_level\": 80}, \"metadata\": {\"model\": \"x\"}}",
            false,
        );
        let processed = finalize(outcome, AiTool::Claude).unwrap();
        assert!(!processed.analysis.contains_key("metadata"));

        let text = serde_json::to_string(&processed).unwrap();
        assert_eq!(text.matches("\"metadata\"").count(), 1);
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["metadata"]["tool_used"], "claude");
        assert!(v["metadata"].get("model").is_none());
    }
}
