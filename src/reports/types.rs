//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable terminal summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// CSV for spreadsheet import
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the per-category breakdown
    pub show_categories: bool,
    /// Include every parameter's score, not just the gaps
    pub show_parameters: bool,
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_categories: true,
            show_parameters: true,
            title: None,
            metadata: ReportMetadata::new(),
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Assessment input file path
    pub input_path: Option<String>,
    /// Custom catalog file path, if one was used
    pub catalog_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Scoring engine version
    pub engine_version: String,
    /// Generation timestamp
    pub generated_at: Option<String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            engine_version: crate::scoring::SCORING_ENGINE_VERSION.to_string(),
            ..Default::default()
        }
    }
}
