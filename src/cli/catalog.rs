//! Catalog and template command handlers.

use crate::config::AppConfig;
use crate::pipeline::{
    generate_input_template, resolve_catalog, should_use_color, write_output, OutputTarget,
};
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::Result;

/// Print the active parameter catalog in the configured format.
pub fn run_catalog(app: &AppConfig) -> Result<()> {
    let catalog = resolve_catalog(app)?;

    let target = OutputTarget::from_option(app.output.file.clone());
    let reporter = create_reporter_with_options(
        app.output.format,
        should_use_color(app.output.no_color, &target),
    );
    let output_text = reporter.generate_catalog_report(&catalog, &ReportConfig::default())?;
    write_output(&output_text, &target, app.behavior.quiet)
}

/// Write a blank assessment input file for the active catalog.
pub fn run_template(app: &AppConfig) -> Result<()> {
    let catalog = resolve_catalog(app)?;
    let template = generate_input_template(&catalog);
    let target = OutputTarget::from_option(app.output.file.clone());
    write_output(&template, &target, app.behavior.quiet)
}
