//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{AssessmentReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::Catalog;
use crate::scoring::{CategoryScore, IssueSeverity, MaturityLevel, ValidationReport};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn level_color(level: MaturityLevel) -> &'static str {
    match level {
        MaturityLevel::Exceptional | MaturityLevel::Optimal => "green",
        MaturityLevel::Manageable | MaturityLevel::Developing => "yellow",
        _ => "red",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn category_line(&self, category: &CategoryScore, width: usize) -> String {
        let name = format!("{:<width$}", truncate(&category.name, width));
        let score = format!("{:>6.2}", category.score);
        format!(
            "  {} {} {}",
            name,
            self.color(&score, level_color(category.maturity_level)),
            self.color(category.maturity_level.label(), "dim")
        )
    }

    fn validation_lines(&self, validation: &ValidationReport, lines: &mut Vec<String>) {
        lines.push(format!(
            "{}  {} error(s), {} warning(s), {} info",
            self.color("Validation:", "cyan"),
            validation.error_count,
            validation.warning_count,
            validation.info_count
        ));
        for issue in &validation.issues {
            let color = match issue.severity {
                IssueSeverity::Error => "red",
                IssueSeverity::Warning => "yellow",
                IssueSeverity::Info => continue,
            };
            lines.push(format!("  {}", self.color(&issue.to_string(), color)));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_assessment_report(
        &self,
        report: &AssessmentReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let index = &report.index;
        let level = index.maturity_level;

        // Header
        let title = config
            .title
            .as_deref()
            .unwrap_or("Cyber Capability Index Assessment");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(50).as_str(), "dim"));

        if let Some(entity) = &report.assessment.entity {
            lines.push(format!("{}  {}", self.color("Entity:", "cyan"), entity));
        }
        if let Some(date) = report.assessment.assessed_on {
            lines.push(format!("{}  {}", self.color("Date:", "cyan"), date));
        }
        if let Some(assessor) = &report.assessment.assessor {
            lines.push(format!("{}  {}", self.color("Assessor:", "cyan"), assessor));
        }

        let answered = index.parameters.iter().filter(|p| p.denominator > 0).count();
        lines.push(format!(
            "{}  {} of {} answered",
            self.color("Parameters:", "cyan"),
            answered,
            index.parameters.len()
        ));

        // Score
        lines.push(String::new());
        lines.push(format!(
            "{}  {}",
            self.color("CCI Score:", "bold"),
            self.color(&format!("{:.2}", index.total_score), level_color(level))
        ));
        lines.push(format!(
            "{}  {} ({})",
            self.color("Maturity:", "bold"),
            self.color(level.label(), level_color(level)),
            level.range_label()
        ));
        lines.push(format!("  {}", self.color(&index.maturity_description, "dim")));

        if config.show_categories && !report.categories.main_categories.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Domains:", "bold"));
            for category in report.categories.main_categories.values() {
                lines.push(self.category_line(category, 24));
            }

            lines.push(String::new());
            lines.push(self.color("Sub-categories:", "bold"));
            for category in report.categories.sub_categories.values() {
                lines.push(self.category_line(category, 48));
            }
        }

        if !report.gaps.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Top gaps:", "bold"));
            for (rank, gap) in report.gaps.iter().enumerate() {
                lines.push(format!("  {}. {}", rank + 1, gap.message()));
            }
        }

        lines.push(String::new());
        self.validation_lines(&report.validation, &mut lines);

        Ok(lines.join("\n"))
    }

    fn generate_catalog_report(
        &self,
        catalog: &Catalog,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(format!(
            "{:<4} {:<10} {:<44} {:>6} {:>9}",
            self.color("ID", "bold"),
            self.color("MEASURE", "bold"),
            self.color("TITLE", "bold"),
            self.color("TARGET", "bold"),
            self.color("WEIGHTAGE", "bold")
        ));
        lines.push("─".repeat(77));

        for p in catalog.parameters() {
            lines.push(format!(
                "{:<4} {:<10} {:<44} {:>6} {:>9}",
                p.id,
                p.measure_id,
                truncate(&p.title, 44),
                p.target.target(),
                p.weightage
            ));
        }

        lines.push("─".repeat(77));
        lines.push(format!(
            "{} parameters, total weightage {}",
            catalog.len(),
            catalog.total_weightage()
        ));

        Ok(lines.join("\n"))
    }

    fn generate_validation_report(
        &self,
        validation: &ValidationReport,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let status = if validation.has_errors() {
            self.color("INVALID", "red")
        } else {
            self.color("VALID", "green")
        };
        lines.push(format!("{}  {}", self.color("Status:", "bold"), status));
        self.validation_lines(validation, &mut lines);
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assessment, AssessmentMetadata};
    use crate::scoring::validate_parameters;

    fn report() -> AssessmentReport {
        let mut assessment = Assessment::new(&Catalog::standard()).with_metadata(AssessmentMetadata {
            entity: Some("Example Securities Ltd".to_string()),
            ..Default::default()
        });
        let validation = validate_parameters(assessment.parameters(), 100.0);
        AssessmentReport::build(&mut assessment, validation, ':', Some(3))
    }

    #[test]
    fn test_plain_summary() {
        let text = SummaryReporter::new()
            .no_color()
            .generate_assessment_report(&report(), &ReportConfig::default())
            .unwrap();

        assert!(!text.contains("\x1b["));
        assert!(text.contains("Entity:  Example Securities Ltd"));
        assert!(text.contains("CCI Score:  0.00"));
        assert!(text.contains("Maturity:  Fail (0-50.99)"));
        assert!(text.contains("Parameters:  0 of 23 answered"));
        assert!(text.contains("1. DE.CM.S5"));
        assert!(text.contains("DE.CM.S5 is shared by parameters 18, 19"));
    }

    #[test]
    fn test_colored_summary() {
        let text = SummaryReporter::new()
            .generate_assessment_report(&report(), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("\x1b[31m0.00\x1b[0m"));
    }

    #[test]
    fn test_categories_hidden() {
        let config = ReportConfig {
            show_categories: false,
            ..Default::default()
        };
        let text = SummaryReporter::new()
            .no_color()
            .generate_assessment_report(&report(), &config)
            .unwrap();
        assert!(!text.contains("Domains:"));
    }

    #[test]
    fn test_catalog_table() {
        let text = SummaryReporter::new()
            .no_color()
            .generate_catalog_report(&Catalog::standard(), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("23 parameters, total weightage 100"));
        assert!(text.contains("PR.AA.S3"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
