//! Validate command handler.
//!
//! Checks the configured catalog and an assessment input file without
//! scoring anything.

use crate::config::AppConfig;
use crate::model::Catalog;
use crate::pipeline::{
    apply_responses, exit_codes, load_assessment_input, load_catalog_checked, should_use_color,
    write_output, OutputTarget,
};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportFormat};
use crate::scoring::{validate_parameters, ValidationReport};
use anyhow::Result;
use std::path::Path;

/// Run the validate command, returning the desired exit code.
pub fn run_validate(input: &Path, format: ReportFormat, app: &AppConfig) -> Result<i32> {
    let validation = validate_input(input, app)?;

    let target = OutputTarget::from_option(app.output.file.clone());
    let reporter =
        create_reporter_with_options(format, should_use_color(app.output.no_color, &target));
    let output_text = reporter.generate_validation_report(&validation, &ReportConfig::default())?;
    write_output(&output_text, &target, app.behavior.quiet)?;

    let failed = validation.has_errors()
        || (app.behavior.fail_on_warning && validation.has_warnings());
    Ok(if failed {
        exit_codes::CHECK_FAILED
    } else {
        exit_codes::SUCCESS
    })
}

/// Collect catalog and input issues.
///
/// Input checks are skipped when the catalog itself is unusable.
fn validate_input(input: &Path, app: &AppConfig) -> Result<ValidationReport> {
    let expected_total = app.scoring.expected_total_weightage;

    let catalog = match app.scoring.catalog_file.as_deref() {
        None => Catalog::standard(),
        Some(path) => {
            tracing::info!("Checking catalog {}", path.display());
            let (parameters, mut report) = load_catalog_checked(path)?;
            let catalog_report = validate_parameters(&parameters, expected_total);
            if report.has_errors() || catalog_report.has_errors() {
                report.merge(catalog_report);
                return Ok(report);
            }
            Catalog::from_parameters(parameters)?
        }
    };

    tracing::info!("Checking input {}", input.display());
    let input = load_assessment_input(input)?;
    let (assessment, mut report) = apply_responses(&catalog, &input);
    report.merge(validate_parameters(assessment.parameters(), expected_total));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::IssueKind;
    use tempfile::TempDir;

    #[test]
    fn test_validate_standard_catalog_input() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input.json");
        std::fs::write(
            &input,
            r#"{"responses": [{"id": 1, "numerator": 12, "denominator": 10}]}"#,
        )
        .unwrap();

        let report = validate_input(&input, &AppConfig::default()).unwrap();
        assert!(!report.has_errors());
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::NumeratorExceedsDenominator && i.parameter_id == Some(1)));
    }

    #[test]
    fn test_bad_catalog_stops_before_input() {
        let tmp = TempDir::new().unwrap();
        let catalog = tmp.path().join("catalog.yaml");
        std::fs::write(
            &catalog,
            "parameters:\n  - id: 1\n    measure_id: A.A.S1\n    title: a\n    target: 20\n    weightage: 100\n",
        )
        .unwrap();
        let app = AppConfig::builder().catalog_file(Some(catalog)).build();

        // The input file does not exist and is never read
        let report = validate_input(&tmp.path().join("missing.yaml"), &app).unwrap();
        assert_eq!(report.error_count, 1);
        assert_eq!(report.issues[0].kind, IssueKind::UnknownTarget);
    }

    #[test]
    fn test_run_validate_exit_code() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input.yaml");
        std::fs::write(&input, "responses:\n  - id: 99\n    numerator: 1\n    denominator: 1\n")
            .unwrap();
        let app = AppConfig::builder()
            .output_file(Some(tmp.path().join("validation.json")))
            .quiet(true)
            .build();

        let code = run_validate(&input, ReportFormat::Json, &app).unwrap();
        assert_eq!(code, exit_codes::CHECK_FAILED);
    }
}
