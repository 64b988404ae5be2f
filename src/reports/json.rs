//! JSON report generator.

use super::{AssessmentReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{AssessmentMetadata, Catalog, CatalogRecord, Parameter};
use crate::scoring::{weighted_score, CategoryScore, Gap, ValidationReport};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let index = &report.index;
        let json = JsonAssessmentReport {
            metadata: JsonReportMetadata::from_config(config),
            assessment: &report.assessment,
            summary: JsonSummary {
                total_score: index.total_score,
                maturity_level: index.maturity_level.label(),
                maturity_range: index.maturity_level.range_label(),
                maturity_description: &index.maturity_description,
                total_weightage: index.total_weightage(),
                parameter_count: index.parameters.len(),
                answered_count: index.parameters.iter().filter(|p| p.denominator > 0).count(),
            },
            categories: config.show_categories.then(|| JsonCategories {
                domains: report.categories.main_categories.values().collect(),
                sub_categories: report.categories.sub_categories.values().collect(),
            }),
            parameters: config
                .show_parameters
                .then(|| index.parameters.iter().map(JsonParameter::from).collect()),
            gaps: &report.gaps,
            validation: &report.validation,
        };

        self.to_json(&json)
    }

    fn generate_catalog_report(
        &self,
        catalog: &Catalog,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let json = JsonCatalogReport {
            metadata: JsonReportMetadata::from_config(config),
            parameter_count: catalog.len(),
            total_weightage: catalog.total_weightage(),
            parameters: catalog.to_records(),
        };
        self.to_json(&json)
    }

    fn generate_validation_report(
        &self,
        validation: &ValidationReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let json = JsonValidationReport {
            metadata: JsonReportMetadata::from_config(config),
            valid: !validation.has_errors(),
            validation,
        };
        self.to_json(&json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON report structures

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    engine_version: String,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_file: Option<String>,
}

impl JsonReportMetadata {
    fn from_config(config: &ReportConfig) -> Self {
        let meta = &config.metadata;
        Self {
            tool: ToolInfo {
                name: "cci-tools".to_string(),
                version: meta.tool_version.clone(),
            },
            engine_version: meta.engine_version.clone(),
            generated_at: meta
                .generated_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
            title: config.title.clone(),
            input_file: meta.input_path.clone(),
            catalog_file: meta.catalog_path.clone(),
        }
    }
}

#[derive(Serialize)]
struct JsonAssessmentReport<'a> {
    metadata: JsonReportMetadata,
    assessment: &'a AssessmentMetadata,
    summary: JsonSummary<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<JsonCategories<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Vec<JsonParameter<'a>>>,
    gaps: &'a [Gap],
    validation: &'a ValidationReport,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    total_score: f64,
    maturity_level: &'static str,
    maturity_range: &'static str,
    maturity_description: &'a str,
    total_weightage: f64,
    parameter_count: usize,
    answered_count: usize,
}

#[derive(Serialize)]
struct JsonCategories<'a> {
    domains: Vec<&'a CategoryScore>,
    sub_categories: Vec<&'a CategoryScore>,
}

#[derive(Serialize)]
struct JsonParameter<'a> {
    id: u32,
    measure_id: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    target: f64,
    weightage: f64,
    numerator: u32,
    denominator: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    percentage: Option<f64>,
    score: f64,
    weighted_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    evidence: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audit_comment: Option<&'a str>,
}

impl<'a> From<&'a Parameter> for JsonParameter<'a> {
    fn from(p: &'a Parameter) -> Self {
        Self {
            id: p.id,
            measure_id: &p.measure_id,
            title: &p.title,
            category: p.category(),
            target: p.target.into(),
            weightage: p.weightage,
            numerator: p.numerator,
            denominator: p.denominator,
            percentage: p.percentage(),
            score: p.self_assessment_score.unwrap_or_default(),
            weighted_score: weighted_score(p),
            evidence: p.evidence.as_deref(),
            audit_comment: p.audit_comment.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct JsonCatalogReport {
    metadata: JsonReportMetadata,
    parameter_count: usize,
    total_weightage: f64,
    parameters: Vec<CatalogRecord>,
}

#[derive(Serialize)]
struct JsonValidationReport<'a> {
    metadata: JsonReportMetadata,
    valid: bool,
    #[serde(flatten)]
    validation: &'a ValidationReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Assessment;
    use crate::scoring::validate_parameters;

    fn config() -> ReportConfig {
        let mut config = ReportConfig::default();
        config.metadata.generated_at = Some("2026-01-01T00:00:00+00:00".to_string());
        config
    }

    #[test]
    fn test_assessment_json_shape() {
        let mut assessment = Assessment::new(&Catalog::standard());
        assessment.set_inputs(15, 30, 100).unwrap();
        let validation = validate_parameters(assessment.parameters(), 100.0);
        let report = AssessmentReport::build(&mut assessment, validation, ':', Some(3));

        let rendered = JsonReporter::new()
            .generate_assessment_report(&report, &config())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["metadata"]["tool"]["name"], "cci-tools");
        assert_eq!(value["summary"]["maturity_level"], "Fail");
        assert_eq!(value["summary"]["parameter_count"], 23);
        assert_eq!(value["summary"]["answered_count"], 1);
        assert_eq!(value["gaps"].as_array().unwrap().len(), 3);
        assert_eq!(value["categories"]["domains"].as_array().unwrap().len(), 6);
        let total = value["summary"]["total_score"].as_f64().unwrap();
        assert!((total - 5.4).abs() < 1e-9);
    }

    #[test]
    fn test_sections_can_be_hidden() {
        let mut assessment = Assessment::new(&Catalog::standard());
        let report = AssessmentReport::build(&mut assessment, ValidationReport::default(), ':', None);
        let mut config = config();
        config.show_categories = false;
        config.show_parameters = false;

        let rendered = JsonReporter::new()
            .pretty(false)
            .generate_assessment_report(&report, &config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value.get("categories").is_none());
        assert!(value.get("parameters").is_none());
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_catalog_json() {
        let rendered = JsonReporter::new()
            .generate_catalog_report(&Catalog::standard(), &config())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["parameter_count"], 23);
        assert_eq!(value["parameters"][9]["target"], 0.0);
    }

    #[test]
    fn test_validation_json() {
        let validation = validate_parameters(Catalog::standard().parameters(), 100.0);
        let rendered = JsonReporter::new()
            .generate_validation_report(&validation, &config())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["warning_count"], 1);
        assert_eq!(value["issues"][0]["kind"], "duplicate_measure_id");
    }
}
