//! Blank assessment input generation.

use crate::model::Catalog;
use std::fmt::Write;

/// Render a YAML input file with one zeroed response per catalog parameter.
///
/// Each response is preceded by comments naming the measure, its category,
/// formula and scoring rule, so the file doubles as a questionnaire.
#[must_use]
pub fn generate_input_template(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(
        "# Cyber Capability Index self-assessment input\n\
         #\n\
         # Fill in numerator and denominator for every parameter. A denominator\n\
         # of 0 means \"not answered\" and scores 0.\n\
         #\n\
         # entity: Example Securities Ltd\n\
         # assessed_on: 2026-03-31\n\
         # assessor: Internal Audit\n\
         \n\
         responses:\n",
    );

    for p in catalog.parameters() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "  # {} {}", p.measure_id, p.title);
        if let Some(category) = p.category() {
            let _ = writeln!(out, "  # Category: {category}");
        }
        if !p.formula.is_empty() {
            let _ = writeln!(out, "  # Formula: {}", p.formula);
        }
        let _ = writeln!(
            out,
            "  # Target: {} ({}), weightage {}",
            p.target,
            p.target.label(),
            p.weightage
        );
        let _ = writeln!(out, "  - id: {}", p.id);
        out.push_str("    numerator: 0\n    denominator: 0\n");
        out.push_str("    # evidence: \"\"\n    # audit_comment: \"\"\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{parse_assessment_str, DocumentFormat};

    #[test]
    fn test_template_parses_back() {
        let catalog = Catalog::standard();
        let template = generate_input_template(&catalog);
        let input = parse_assessment_str(&template, DocumentFormat::Yaml).unwrap();

        assert_eq!(input.responses.len(), catalog.len());
        assert!(input.metadata.entity.is_none());
        assert!(input
            .responses
            .iter()
            .all(|r| r.numerator == 0 && r.denominator == 0));
    }

    #[test]
    fn test_template_describes_rules() {
        let template = generate_input_template(&Catalog::standard());
        assert!(template.contains("# PR.AA.S3 Unauthorized Physical Entry Measure"));
        assert!(template.contains("# Target: 0 (Lower is better), weightage 1"));
        assert!(template.contains("# Target: 50 (50% coverage earns full credit), weightage 9"));
    }
}
