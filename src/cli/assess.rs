//! Assess command handler.
//!
//! Implements the `assess` subcommand: score an assessment input file and
//! report the composite index, maturity band, category breakdown and gaps.

use crate::config::AppConfig;
use crate::pipeline::{
    exit_codes, prepare_assessment, should_use_color, write_output, OutputTarget,
};
use crate::reports::{
    create_reporter_with_options, AssessmentReport, ReportConfig, ReportFormat, ReportMetadata,
};
use crate::scoring::IssueSeverity;
use anyhow::Result;
use std::path::PathBuf;

/// Assess command configuration
#[derive(Debug, Clone)]
pub struct AssessConfig {
    /// Assessment input file (YAML or JSON)
    pub input: PathBuf,
    /// Effective configuration (file merged with CLI flags)
    pub app: AppConfig,
    /// Show the category breakdown in the summary format
    pub show_categories: bool,
}

/// Run the assess command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_assess(config: AssessConfig) -> Result<i32> {
    let app = &config.app;
    let quiet = app.behavior.quiet;

    if !quiet {
        tracing::info!("Assessing {}", config.input.display());
    }
    let mut prepared = prepare_assessment(&config.input, app)?;

    if prepared.validation.has_errors() {
        for issue in prepared.validation.by_severity(IssueSeverity::Error) {
            tracing::error!("{issue}");
        }
        tracing::error!(
            "Input has {} validation error(s); not scoring",
            prepared.validation.error_count
        );
        return Ok(exit_codes::CHECK_FAILED);
    }

    let has_warnings = prepared.validation.has_warnings();
    let report = AssessmentReport::build(
        &mut prepared.assessment,
        prepared.validation,
        app.scoring.category_separator,
        app.gap_limit(),
    );

    let format = app.output.format;
    let report_config = ReportConfig {
        show_categories: config.show_categories || format != ReportFormat::Summary,
        show_parameters: true,
        title: None,
        metadata: ReportMetadata {
            input_path: Some(prepared.input_path.display().to_string()),
            catalog_path: prepared.catalog_path.map(|p| p.display().to_string()),
            ..ReportMetadata::new()
        },
    };

    let target = OutputTarget::from_option(app.output.file.clone());
    let reporter =
        create_reporter_with_options(format, should_use_color(app.output.no_color, &target));
    let output_text = reporter.generate_assessment_report(&report, &report_config)?;
    write_output(&output_text, &target, quiet)?;

    let total = report.index.total_score;
    if !quiet {
        tracing::info!(
            "CCI score {:.2} ({})",
            total,
            report.index.maturity_level
        );
    }

    Ok(check_thresholds(total, has_warnings, app))
}

/// Exit code for a scored assessment under the configured thresholds.
fn check_thresholds(total: f64, has_warnings: bool, app: &AppConfig) -> i32 {
    if let Some(threshold) = app.behavior.min_score {
        if total < threshold {
            tracing::error!(
                "CCI score {:.2} is below minimum threshold {:.2}",
                total,
                threshold
            );
            return exit_codes::CHECK_FAILED;
        }
    }

    if app.behavior.fail_on_warning && has_warnings {
        tracing::error!("Validation produced warnings and --fail-on-warning is set");
        return exit_codes::CHECK_FAILED;
    }

    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("input.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_thresholds() {
        let app = AppConfig::builder().min_score(Some(51.0)).build();
        assert_eq!(check_thresholds(50.99, false, &app), exit_codes::CHECK_FAILED);
        assert_eq!(check_thresholds(51.0, true, &app), exit_codes::SUCCESS);

        let strict = AppConfig::builder().fail_on_warning(true).build();
        assert_eq!(check_thresholds(90.0, true, &strict), exit_codes::CHECK_FAILED);
        assert_eq!(check_thresholds(90.0, false, &strict), exit_codes::SUCCESS);
    }

    #[test]
    fn test_assess_writes_json_report() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(
            &tmp,
            "entity: Example\nresponses:\n  - id: 18\n    numerator: 10\n    denominator: 10\n",
        );
        let out = tmp.path().join("report.json");
        let app = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        let code = run_assess(AssessConfig {
            input,
            app,
            show_categories: false,
        })
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["summary"]["total_score"].as_f64(), Some(10.0));
        assert!(value["categories"].is_object());
    }

    #[test]
    fn test_assess_unknown_response_fails_check() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(
            &tmp,
            "responses:\n  - id: 404\n    numerator: 1\n    denominator: 1\n",
        );
        let app = AppConfig::builder()
            .output_file(Some(tmp.path().join("report.txt")))
            .quiet(true)
            .build();
        let code = run_assess(AssessConfig {
            input,
            app,
            show_categories: false,
        })
        .unwrap();
        assert_eq!(code, exit_codes::CHECK_FAILED);
        assert!(!tmp.path().join("report.txt").exists());
    }
}
