//! Configuration validation for cci-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, OutputConfig, ScoringConfig};
use crate::scoring::MAX_SCORE;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file) = self.catalog_file {
            if !file.exists() {
                errors.push(ConfigError {
                    field: "scoring.catalog_file".to_string(),
                    message: format!("Catalog file does not exist: {}", file.display()),
                });
            }
        }

        if self.category_separator.is_alphanumeric() || self.category_separator.is_whitespace() {
            errors.push(ConfigError {
                field: "scoring.category_separator".to_string(),
                message: format!(
                    "Separator must be a punctuation character, got '{}'",
                    self.category_separator
                ),
            });
        }

        if !self.expected_total_weightage.is_finite() || self.expected_total_weightage <= 0.0 {
            errors.push(ConfigError {
                field: "scoring.expected_total_weightage".to_string(),
                message: format!(
                    "Expected total weightage must be positive, got {}",
                    self.expected_total_weightage
                ),
            });
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(min_score) = self.min_score {
            if !(0.0..=MAX_SCORE).contains(&min_score) {
                errors.push(ConfigError {
                    field: "behavior.min_score".to_string(),
                    message: format!("Minimum score must be between 0 and 100, got {min_score}"),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_scoring_config_validation() {
        let invalid = ScoringConfig {
            catalog_file: Some(PathBuf::from("/nonexistent/catalog.yaml")),
            category_separator: 'x',
            expected_total_weightage: 0.0,
        };
        let fields: Vec<String> = invalid.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "scoring.catalog_file",
                "scoring.category_separator",
                "scoring.expected_total_weightage"
            ]
        );
    }

    #[test]
    fn test_output_config_validation() {
        let invalid = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..Default::default()
        };
        assert!(!invalid.is_valid());

        let relative = OutputConfig {
            file: Some(PathBuf::from("report.json")),
            ..Default::default()
        };
        assert!(relative.is_valid());
    }

    #[test]
    fn test_behavior_min_score_range() {
        let valid = BehaviorConfig {
            min_score: Some(51.0),
            ..Default::default()
        };
        assert!(valid.is_valid());

        let invalid = BehaviorConfig {
            min_score: Some(150.0),
            ..Default::default()
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "behavior.min_score: Minimum score must be between 0 and 100, got 150"
        );
    }
}
