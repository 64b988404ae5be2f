//! Configuration types for cci-tools operations.

use super::defaults::{DEFAULT_EXPECTED_TOTAL_WEIGHTAGE, DEFAULT_MAX_GAPS};
use crate::reports::ReportFormat;
use crate::scoring::DEFAULT_CATEGORY_SEPARATOR;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are merged over file settings, see [`AppConfig::merge`]
/// and [`ConfigOverrides`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Scoring configuration (catalog, category grouping)
    pub scoring: ScoringConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Gap list length, where 0 means unlimited
    #[must_use]
    pub const fn gap_limit(&self) -> Option<usize> {
        match self.output.max_gaps {
            0 => None,
            n => Some(n),
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Use a custom parameter catalog file.
    pub fn catalog_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.scoring.catalog_file = file;
        self
    }

    /// Set the domain separator used in category labels.
    pub const fn category_separator(mut self, separator: char) -> Self {
        self.config.scoring.category_separator = separator;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Limit the number of gaps reported.
    pub const fn max_gaps(mut self, max_gaps: usize) -> Self {
        self.config.output.max_gaps = max_gaps;
        self
    }

    /// Fail when the composite score is below this value.
    pub const fn min_score(mut self, min_score: Option<f64>) -> Self {
        self.config.behavior.min_score = min_score;
        self
    }

    /// Fail when validation produced warnings.
    pub const fn fail_on_warning(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_warning = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Command-line overrides
// ============================================================================

/// Settings given explicitly on the command line.
///
/// `None` leaves the file (or default) value alone; `Some` always wins, even
/// when it equals the built-in default. Switches can only be turned on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub catalog_file: Option<PathBuf>,
    pub category_separator: Option<char>,
    pub expected_total_weightage: Option<f64>,
    pub format: Option<ReportFormat>,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub max_gaps: Option<usize>,
    pub min_score: Option<f64>,
    pub fail_on_warning: bool,
    pub quiet: bool,
}

// ============================================================================
// Section types
// ============================================================================

/// Scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Custom parameter catalog (YAML or JSON); the built-in catalog when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,
    /// Separator between domain and sub-domain in category labels
    pub category_separator: char,
    /// Weightage total the catalog is expected to add up to
    #[schemars(range(min = 0))]
    pub expected_total_weightage: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            catalog_file: None,
            category_separator: DEFAULT_CATEGORY_SEPARATOR,
            expected_total_weightage: DEFAULT_EXPECTED_TOTAL_WEIGHTAGE,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Maximum number of gaps to report (0 = all)
    pub max_gaps: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Summary,
            file: None,
            no_color: false,
            max_gaps: DEFAULT_MAX_GAPS,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if the composite score is below this value
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub min_score: Option<f64>,
    /// Exit with code 1 if validation produced warnings
    pub fail_on_warning: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.scoring.category_separator, ':');
        assert_eq!(config.scoring.expected_total_weightage, 100.0);
        assert_eq!(config.output.format, ReportFormat::Summary);
        assert_eq!(config.gap_limit(), Some(DEFAULT_MAX_GAPS));
        assert!(config.behavior.min_score.is_none());
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .max_gaps(0)
            .min_score(Some(71.0))
            .fail_on_warning(true)
            .build();
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.gap_limit(), None);
        assert_eq!(config.behavior.min_score, Some(71.0));
        assert!(config.behavior.fail_on_warning);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("output:\n  format: csv\n").unwrap();
        assert_eq!(config.output.format, ReportFormat::Csv);
        assert_eq!(config.output.max_gaps, DEFAULT_MAX_GAPS);
        assert_eq!(config.scoring, ScoringConfig::default());
    }
}
