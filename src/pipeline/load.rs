//! Loading catalogs and assessment inputs from YAML or JSON files.

use crate::config::AppConfig;
use crate::error::{CciError, ErrorContext, Result};
use crate::model::{
    convert_records, Assessment, AssessmentInput, Catalog, CatalogRecord, Parameter,
};
use crate::scoring::{validate_parameters, IssueKind, ValidationIssue, ValidationReport};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Serialization format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

/// Detect the document format from the file extension, falling back to content sniffing.
#[must_use]
pub fn detect_format(path: Option<&Path>, content: &str) -> DocumentFormat {
    let by_extension = path
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match by_extension.as_deref() {
        Some("json") => DocumentFormat::Json,
        Some("yaml" | "yml") => DocumentFormat::Yaml,
        _ => {
            let trimmed = content.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                DocumentFormat::Json
            } else {
                DocumentFormat::Yaml
            }
        }
    }
}

fn parse_document<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CciError::io(path, e))
}

// ============================================================================
// Assessment inputs
// ============================================================================

/// Parse assessment input content.
pub fn parse_assessment_str(content: &str, format: DocumentFormat) -> Result<AssessmentInput> {
    parse_document(content, format)
}

/// Read and parse an assessment input file.
pub fn load_assessment_input(path: &Path) -> Result<AssessmentInput> {
    let content = read_file(path)?;
    let format = detect_format(Some(path), &content);
    parse_assessment_str(&content, format)
        .with_context(|| format!("parsing assessment input {}", path.display()))
}

/// Copy responses onto a fresh assessment of `catalog`.
///
/// Unknown ids are errors. A repeated id is a warning and the last response
/// wins. Parameters without a response stay zeroed. Unrecognised top-level
/// keys and an empty response list are warnings.
pub fn apply_responses(catalog: &Catalog, input: &AssessmentInput) -> (Assessment, ValidationReport) {
    let mut assessment = Assessment::new(catalog).with_metadata(input.metadata.clone());
    let mut report = ValidationReport::default();
    let mut seen = HashSet::new();

    for key in input.unknown_fields.keys() {
        report.push(ValidationIssue::new(
            IssueKind::UnknownField,
            None,
            format!("unrecognised top-level key '{key}' was ignored"),
        ));
    }
    if input.responses.is_empty() {
        report.push(ValidationIssue::new(
            IssueKind::NoResponses,
            None,
            "input contains no responses; every parameter scores 0",
        ));
    }

    for response in &input.responses {
        if catalog.get(response.id).is_none() {
            report.push(ValidationIssue::new(
                IssueKind::UnknownResponseId,
                Some(response.id),
                "response refers to a parameter that is not in the catalog",
            ));
            continue;
        }
        if !seen.insert(response.id) {
            report.push(ValidationIssue::new(
                IssueKind::DuplicateResponse,
                Some(response.id),
                "answered more than once, keeping the last response",
            ));
        }
        // Known id, cannot fail
        if let Err(e) = assessment.record_response(response) {
            tracing::warn!("skipping response {}: {e}", response.id);
        }
    }

    tracing::debug!(
        responses = input.responses.len(),
        answered = seen.len(),
        "applied assessment responses"
    );
    (assessment, report)
}

// ============================================================================
// Catalogs
// ============================================================================

/// On-disk catalog layout: a `parameters` list, other top-level keys ignored.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    parameters: Vec<CatalogRecord>,
}

/// Parse catalog records without checking their targets.
pub fn parse_catalog_records(content: &str, format: DocumentFormat) -> Result<Vec<CatalogRecord>> {
    let file: CatalogFile = parse_document(content, format)?;
    Ok(file.parameters)
}

/// Convert records to parameters, reporting every unsupported target.
pub fn check_catalog_records(records: Vec<CatalogRecord>) -> (Vec<Parameter>, ValidationReport) {
    let (parameters, rejected) = convert_records(records);
    let report = ValidationReport::new(
        rejected
            .into_iter()
            .map(|(id, err)| {
                ValidationIssue::new(IssueKind::UnknownTarget, Some(id), err.to_string())
            })
            .collect(),
    );
    (parameters, report)
}

/// Read a custom catalog file; fails on any invalid record.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = read_file(path)?;
    let format = detect_format(Some(path), &content);
    let records = parse_catalog_records(&content, format)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    let catalog = Catalog::from_records(records)
        .with_context(|| format!("loading catalog {}", path.display()))?;
    tracing::info!("Loaded {} catalog parameters from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Read a custom catalog file, keeping the valid records and reporting the rest.
pub fn load_catalog_checked(path: &Path) -> Result<(Vec<Parameter>, ValidationReport)> {
    let content = read_file(path)?;
    let format = detect_format(Some(path), &content);
    let records = parse_catalog_records(&content, format)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(check_catalog_records(records))
}

/// The configured catalog, or the built-in one.
///
/// A configured path that is not a file is a configuration error.
pub fn resolve_catalog(config: &AppConfig) -> Result<Catalog> {
    match config.scoring.catalog_file.as_deref() {
        None => Ok(Catalog::standard()),
        Some(path) if !path.is_file() => Err(CciError::config(format!(
            "scoring.catalog_file {} is not a file",
            path.display()
        ))),
        Some(path) => load_catalog(path),
    }
}

// ============================================================================
// Full preparation
// ============================================================================

/// An assessment ready for scoring, with every issue found on the way.
#[derive(Debug, Clone)]
pub struct PreparedAssessment {
    pub assessment: Assessment,
    pub validation: ValidationReport,
    pub input_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
}

/// Load the catalog and input file, apply responses and validate the result.
pub fn prepare_assessment(input_path: &Path, config: &AppConfig) -> Result<PreparedAssessment> {
    let catalog = resolve_catalog(config)?;
    let input = load_assessment_input(input_path)?;

    let (assessment, mut validation) = apply_responses(&catalog, &input);
    validation.merge(validate_parameters(
        assessment.parameters(),
        config.scoring.expected_total_weightage,
    ));

    Ok(PreparedAssessment {
        assessment,
        validation,
        input_path: input_path.to_path_buf(),
        catalog_path: config.scoring.catalog_file.clone(),
    })
}
