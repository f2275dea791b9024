use crate::messages::{Locale, Messages};
use serde::{Deserialize, Serialize};

/// Main configuration structure loaded from inspiration_analyzer.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: ThresholdConfig,
    pub scoring: ScoringConfig,
    pub confidence: ConfidenceConfig,
    pub output: OutputConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Pass/fail thresholds for the quality and continuity checks
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum depth score (0-1) before an issue is raised
    pub depth: f64,
    /// Minimum actionability score (0-1); below it the enhancement repair runs
    pub actionability: f64,
    /// Minimum innovation score (0-1); below it only a suggestion is emitted
    pub innovation: f64,
    /// Continuity score (0-10) at or above which continuity counts as strong
    pub continuity_strong: f64,
    /// Continuity score (0-10) below which continuity counts as weak
    pub continuity_weak: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            depth: 0.6,
            actionability: 0.7,
            innovation: 0.5,
            continuity_strong: 8.0,
            continuity_weak: 5.0,
        }
    }
}

/// Saturation points for the heuristic scores
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Child keys per section that earn a full depth score
    pub depth_saturation: f64,
    /// Action points that earn a full actionability score
    pub actionability_saturation: f64,
    /// Keyword hits that earn a full innovation score
    pub innovation_saturation: f64,
    /// Serialized characters that earn full content richness
    pub richness_saturation_chars: usize,
    /// Inputs shorter than this get a "too short" hint on failure
    pub short_response_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            depth_saturation: 3.0,
            actionability_saturation: 10.0,
            innovation_saturation: 5.0,
            richness_saturation_chars: 5000,
            short_response_chars: 500,
        }
    }
}

/// Blend weights for the overall confidence figure (all on the 0-100 scale)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub self_reported_weight: f64,
    pub completeness_weight: f64,
    pub richness_weight: f64,
    /// Used when the response does not report its own confidence
    pub default_self_reported: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            self_reported_weight: 0.5,
            completeness_weight: 0.3,
            richness_weight: 0.2,
            default_self_reported: 70.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub locale: Locale,
    /// Overrides the locale's enhancement suffix for immediate actions
    pub action_suffix: Option<String>,
    /// Where `finalize` writes analysis backups
    pub backup_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            action_suffix: None,
            backup_dir: ".".to_string(),
        }
    }
}

/// Runtime settings sourced only from the environment
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "inspiration_analyzer=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "inspiration_analyzer=info".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses INSPIRATION_ANALYZER_CONFIG environment variable or defaults to "inspiration_analyzer.toml"
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("INSPIRATION_ANALYZER_CONFIG")
            .unwrap_or_else(|_| "inspiration_analyzer.toml".to_string());
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit TOML path, then apply env overrides
    pub fn load_from(config_path: &str) -> anyhow::Result<Self> {
        crate::load_env();

        let mut config: Config = match std::fs::read_to_string(config_path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", config_path, e))?,
            Err(_) => {
                tracing::warn!("Config file {} not found, using defaults", config_path);
                Self::default()
            }
        };

        config.apply_env_overrides()?;
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(locale) = std::env::var("INSP_LOCALE") {
            self.output.locale = locale.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            tracing::debug!("INSP_LOCALE env override applied");
        }
        if let Ok(suffix) = std::env::var("INSP_ACTION_SUFFIX") {
            self.output.action_suffix = Some(suffix);
            tracing::debug!("INSP_ACTION_SUFFIX env override applied");
        }
        if let Ok(dir) = std::env::var("INSP_BACKUP_DIR") {
            self.output.backup_dir = dir;
            tracing::debug!("INSP_BACKUP_DIR env override applied");
        }
        Ok(())
    }

    /// Reject configurations that would make scores meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("thresholds.depth", t.depth),
            ("thresholds.actionability", t.actionability),
            ("thresholds.innovation", t.innovation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be between 0.0 and 1.0");
            }
        }
        if t.continuity_weak > t.continuity_strong {
            anyhow::bail!(
                "thresholds.continuity_weak must not exceed thresholds.continuity_strong"
            );
        }

        let s = &self.scoring;
        if s.depth_saturation <= 0.0
            || s.actionability_saturation <= 0.0
            || s.innovation_saturation <= 0.0
            || s.richness_saturation_chars == 0
        {
            anyhow::bail!("scoring saturation values must be positive");
        }

        let c = &self.confidence;
        let total = c.self_reported_weight + c.completeness_weight + c.richness_weight;
        if (total - 1.0).abs() > 1e-6 {
            anyhow::bail!("confidence weights must sum to 1.0 (got {total})");
        }
        if c.self_reported_weight < 0.0 || c.completeness_weight < 0.0 || c.richness_weight < 0.0 {
            anyhow::bail!("confidence weights must be non-negative");
        }
        Ok(())
    }

    /// Message table for the configured locale
    pub fn messages(&self) -> &'static Messages {
        self.output.locale.messages()
    }

    /// Suffix appended to immediate actions when actionability is low
    pub fn action_suffix(&self) -> &str {
        self.output
            .action_suffix
            .as_deref()
            .unwrap_or(self.messages().action_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds.actionability, 0.7);
        assert_eq!(config.scoring.richness_saturation_chars, 5000);
        assert_eq!(config.action_suffix(), " (建議在1-2天內完成)");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [thresholds]
            depth = 0.5

            [output]
            locale = "en"
            "#,
        )
        .unwrap();
        assert_eq!(config.thresholds.depth, 0.5);
        assert_eq!(config.thresholds.actionability, 0.7);
        assert_eq!(config.output.locale, Locale::En);
        assert_eq!(
            config.action_suffix(),
            " (recommend completing within 1-2 days)"
        );
    }

    #[test]
    fn test_rejects_bad_weights() {
        let mut config = Config::default();
        config.confidence.richness_weight = 0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.thresholds.depth = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_continuity_bounds() {
        let mut config = Config::default();
        config.thresholds.continuity_weak = 9.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_suffix_override() {
        let mut config = Config::default();
        config.output.action_suffix = Some(" [soon]".to_string());
        assert_eq!(config.action_suffix(), " [soon]");
    }
}
