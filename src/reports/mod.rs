//! Report generation for assessment results.
//!
//! This module provides several output formats:
//! - Summary: Human-readable terminal output with optional ANSI colour
//! - JSON: Structured data for programmatic integration
//! - CSV: Per-parameter and per-category rows for spreadsheets
//!
//! Every reporter renders the same [`AssessmentReport`], so the figures in
//! each format always agree.

mod csv;
mod json;
mod summary;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::error::{CciError, ReportErrorKind};
use crate::model::{Assessment, AssessmentMetadata, Catalog};
use crate::scoring::{
    compute_index, gap_analysis, CategoryBreakdown, Gap, IndexResult, ValidationReport,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("{0} output is not available for this report")]
    UnsupportedFormat(ReportFormat),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<ReportError> for CciError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::IoError(source) => source.into(),
            ReportError::SerializationError(msg) => {
                Self::report("serializing report", ReportErrorKind::JsonSerializationError(msg))
            }
            ReportError::UnsupportedFormat(format) => Self::report(
                "selecting reporter",
                ReportErrorKind::UnsupportedFormat(format.to_string()),
            ),
            ReportError::FormatError(e) => Self::report(
                "formatting report",
                ReportErrorKind::FormattingError(e.to_string()),
            ),
        }
    }
}

/// Everything a reporter needs to render one assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    /// Who was assessed
    pub assessment: AssessmentMetadata,
    /// Composite index with per-parameter scores
    pub index: IndexResult,
    /// Sub-category and domain scores
    pub categories: CategoryBreakdown,
    /// Largest improvement opportunities first
    pub gaps: Vec<Gap>,
    /// Issues found in the input
    pub validation: ValidationReport,
}

impl AssessmentReport {
    /// Score an assessment and gather every derived view.
    ///
    /// The computed per-parameter scores are stored back on `assessment`.
    pub fn build(
        assessment: &mut Assessment,
        validation: ValidationReport,
        category_separator: char,
        max_gaps: Option<usize>,
    ) -> Self {
        let index = compute_index(&assessment.snapshot());
        assessment.store_scores(&index.parameters);
        let categories = CategoryBreakdown::compute(&index.parameters, category_separator);
        let gaps = gap_analysis(&index, max_gaps);

        Self {
            assessment: assessment.metadata().clone(),
            index,
            categories,
            gaps,
            validation,
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a scored assessment
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Render the parameter catalog
    fn generate_catalog_report(
        &self,
        catalog: &Catalog,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Render a standalone validation result
    fn generate_validation_report(
        &self,
        _validation: &ValidationReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        Err(ReportError::UnsupportedFormat(self.format()))
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}
