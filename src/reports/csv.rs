//! CSV report generator.
//!
//! Generates comma-separated reports for assessments and catalogs,
//! suitable for spreadsheet import.

use super::{AssessmentReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{Catalog, Parameter};
use crate::scoring::{weighted_score, CategoryScore};
use std::fmt::Write;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        let index = &report.index;

        content.push_str("# Summary\n");
        content.push_str("Entity,Total Score,Maturity Level\n");
        writeln!(
            content,
            "\"{}\",{:.2},\"{}\"",
            escape_csv(report.assessment.entity.as_deref().unwrap_or("-")),
            index.total_score,
            index.maturity_level
        )?;

        if config.show_parameters {
            content.push_str("\n# Parameters\n");
            content.push_str(PARAMETER_HEADER);
            for parameter in &index.parameters {
                write_parameter_line(&mut content, parameter)?;
            }
        }

        if config.show_categories {
            content.push_str("\n# Categories\n");
            content.push_str(CATEGORY_HEADER);
            for category in report.categories.main_categories.values() {
                write_category_line(&mut content, "Domain", category)?;
            }
            for category in report.categories.sub_categories.values() {
                write_category_line(&mut content, "Sub-category", category)?;
            }
        }

        content.push_str("\n# Gaps\n");
        content.push_str("ID,Measure,Score,Weightage,Potential Gain\n");
        for gap in &report.gaps {
            writeln!(
                content,
                "{},\"{}\",{:.2},{},{:.2}",
                gap.id,
                escape_csv(&gap.measure_id),
                gap.score,
                gap.weightage,
                gap.potential_gain
            )?;
        }

        Ok(content)
    }

    fn generate_catalog_report(
        &self,
        catalog: &Catalog,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("ID,Measure,Title,Category,Target,Weightage,Formula\n");

        for p in catalog.parameters() {
            writeln!(
                content,
                "{},\"{}\",\"{}\",\"{}\",{},{},\"{}\"",
                p.id,
                escape_csv(&p.measure_id),
                escape_csv(&p.title),
                escape_csv(p.category().unwrap_or("-")),
                p.target.target(),
                p.weightage,
                escape_csv(&p.formula)
            )?;
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

const PARAMETER_HEADER: &str =
    "ID,Measure,Title,Category,Target,Weightage,Numerator,Denominator,Score,Weighted Score\n";

const CATEGORY_HEADER: &str = "Level,Category,Parameters,Weightage,Weighted Total,Score,Maturity\n";

fn write_parameter_line(content: &mut String, p: &Parameter) -> std::fmt::Result {
    writeln!(
        content,
        "{},\"{}\",\"{}\",\"{}\",{},{},{},{},{:.2},{:.2}",
        p.id,
        escape_csv(&p.measure_id),
        escape_csv(&p.title),
        escape_csv(p.category().unwrap_or("-")),
        p.target.target(),
        p.weightage,
        p.numerator,
        p.denominator,
        p.self_assessment_score.unwrap_or_default(),
        weighted_score(p)
    )
}

fn write_category_line(
    content: &mut String,
    level: &str,
    category: &CategoryScore,
) -> std::fmt::Result {
    writeln!(
        content,
        "{},\"{}\",{},{},{:.2},{:.2},\"{}\"",
        level,
        escape_csv(&category.name),
        category.parameter_count,
        category.weightage,
        category.weighted_total,
        category.score,
        category.maturity_level
    )
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace(['\n', '\r'], " ")
}
