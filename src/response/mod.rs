//! Response validator/repairer for pasted AI analysis output
//!
//! The pipeline is extract → parse → validate (structure, quality, continuity)
//! → repair → confidence. Only extraction and parsing can fail a call; every
//! other irregularity is reported and repaired where possible.

pub mod confidence;
pub mod continuity;
pub mod extract;
pub mod quality;
pub mod repair;
pub mod structure;
pub mod suggestions;

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::messages::Messages;
use chrono::{DateTime, Utc};
use continuity::ContinuityCheck;
use quality::QualityCheck;
use repair::Findings;
use serde::Serialize;
use serde_json::Value;
use structure::StructureValidation;

/// Per-check validation detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetail {
    pub structure: StructureValidation,
    pub quality: QualityCheck,
    pub continuity: ContinuityCheck,
}

impl ValidationDetail {
    pub fn is_valid(&self) -> bool {
        self.structure.is_valid && self.quality.is_valid && self.continuity.is_valid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub parse_time: DateTime<Utc>,
    pub unrestricted_mode: bool,
    /// Overall confidence, 0-100
    pub confidence: i64,
}

/// Outcome of a call that got as far as a parsed JSON value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    /// Repaired copy of the response
    pub data: Value,
    /// Response exactly as parsed
    pub original: Value,
    pub validation: ValidationDetail,
    pub repairs: Vec<String>,
    pub metadata: ReportMetadata,
}

/// Outcome of a call that failed during extraction or parsing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    pub success: bool,
    pub data: Option<Value>,
    pub error: String,
    pub suggestions: Vec<String>,
}

/// Result of [`ResponseParser::parse_and_validate`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseOutcome {
    Report(Box<ValidationReport>),
    Failure(ValidationFailure),
}

impl ParseOutcome {
    /// True only when every check passed
    pub fn is_success(&self) -> bool {
        match self {
            ParseOutcome::Report(report) => report.success,
            ParseOutcome::Failure(_) => false,
        }
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ParseOutcome::Report(report) => Some(&**report),
            ParseOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            ParseOutcome::Report(_) => None,
            ParseOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_report(self) -> Option<ValidationReport> {
        match self {
            ParseOutcome::Report(report) => Some(*report),
            ParseOutcome::Failure(_) => None,
        }
    }
}

/// Stateless validator; every call starts from a clean slate
#[derive(Debug, Clone, Default)]
pub struct ResponseParser {
    config: Config,
}

impl ResponseParser {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build a parser from a TOML config file plus environment overrides
    pub fn from_config_file(path: &str) -> Result<Self> {
        Ok(Self::new(Config::load_from(path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn messages(&self) -> &'static Messages {
        self.config.messages()
    }

    /// Extract, parse, validate, and repair a model response
    pub fn parse_and_validate(&self, response_text: &str, unrestricted: bool) -> ParseOutcome {
        match parse_response(response_text) {
            Ok(parsed) => ParseOutcome::Report(Box::new(self.validate(parsed, unrestricted))),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read AI response");
                ParseOutcome::Failure(ValidationFailure {
                    success: false,
                    data: None,
                    error: err.to_string(),
                    suggestions: suggestions::error_suggestions(
                        &err,
                        response_text,
                        self.config.scoring.short_response_chars,
                        self.messages(),
                    ),
                })
            }
        }
    }

    /// Validate and repair an already-parsed response
    pub fn validate(&self, parsed: Value, unrestricted: bool) -> ValidationReport {
        let messages = self.messages();
        let validation = ValidationDetail {
            structure: structure::validate_structure(&parsed, unrestricted, messages),
            quality: quality::check_quality(&parsed, &self.config, messages),
            continuity: continuity::validate_continuity(&parsed, &self.config.thresholds, messages),
        };

        let (data, log) = repair::repair(
            &parsed,
            Findings {
                structure: &validation.structure,
                quality: &validation.quality,
                continuity: &validation.continuity,
            },
            &self.config,
            messages,
        );

        let success = validation.is_valid();
        let confidence = confidence::calculate_confidence(&parsed, &self.config);
        tracing::info!(
            success,
            confidence,
            completeness = validation.structure.completeness,
            repairs = log.len(),
            "validated AI response"
        );

        ValidationReport {
            success,
            data,
            original: parsed,
            validation,
            repairs: log.into_entries(),
            metadata: ReportMetadata {
                parse_time: Utc::now(),
                unrestricted_mode: unrestricted,
                confidence,
            },
        }
    }
}

/// Locate and decode the JSON payload in raw model output
pub fn parse_response(response_text: &str) -> Result<Value> {
    let (strategy, json) = extract::extract_json(response_text)?;
    tracing::debug!(strategy, chars = json.len(), "extracted JSON payload");
    serde_json::from_str(&json).map_err(|source| AnalyzerError::Parse { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_with_null_data() {
        let outcome = ResponseParser::default().parse_and_validate("nothing here", false);
        let v = serde_json::to_value(&outcome).unwrap();
        assert_eq!(v["success"], json!(false));
        assert_eq!(v["data"], Value::Null);
        assert!(v["error"].as_str().unwrap().contains("JSON"));
        assert!(v["suggestions"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let outcome = ResponseParser::default().parse_and_validate("{\"meta_analysis\": {}}", true);
        let v = serde_json::to_value(&outcome).unwrap();
        assert!(v["validation"]["structure"]["isValid"].is_boolean());
        assert!(v["validation"]["continuity"]["continuityScore"].is_number());
        assert_eq!(v["metadata"]["unrestrictedMode"], json!(true));
        assert!(v["metadata"]["parseTime"].is_string());
    }

    #[test]
    fn test_parse_error_variant() {
        let err = parse_response("{\"a\": 1,}").unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse { .. }));
    }
}
