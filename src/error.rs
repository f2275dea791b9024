//! Domain-specific error types for inspiration-analyzer

use thiserror::Error;

/// Main error type for response validation and prompt tooling
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// No JSON-shaped content could be located in the model output
    #[error("Extraction error: no valid JSON content found in response")]
    Extraction,

    /// Content was found but is not valid JSON
    #[error("Parse error: invalid JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl AnalyzerError {
    /// Whether this error concerns locating or decoding the JSON payload
    pub fn is_json_related(&self) -> bool {
        matches!(self, AnalyzerError::Extraction | AnalyzerError::Parse { .. })
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AnalyzerError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        AnalyzerError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_related_classification() {
        assert!(AnalyzerError::Extraction.is_json_related());
        let parse = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert!(AnalyzerError::Parse { source: parse }.is_json_related());
        assert!(
            !AnalyzerError::Config {
                message: "x".into()
            }
            .is_json_related()
        );
    }

    #[test]
    fn test_parse_error_message_mentions_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{\"a\": }").unwrap_err();
        let err = AnalyzerError::Parse { source: parse };
        assert!(err.to_string().contains("JSON"));
    }
}
