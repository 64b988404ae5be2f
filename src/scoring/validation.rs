//! Data validation for parameter lists and assessment inputs.
//!
//! Validation never blocks scoring on its own: the engine handles every
//! input shape. Callers decide what to do with the issues (the CLI refuses
//! to score when errors are present).

use crate::model::{duplicate_measure_ids, Parameter};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Tolerance when comparing the weightage total against the expected total
const WEIGHTAGE_TOLERANCE: f64 = 1e-6;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Makes the result meaningless
    Error,
    /// Result is computed but should be reviewed
    Warning,
    /// Informational
    Info,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// What was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IssueKind {
    DuplicateId,
    NonPositiveWeightage,
    DuplicateMeasureId,
    WeightageTotal,
    NumeratorExceedsDenominator,
    ZeroDenominator,
    UnknownTarget,
    UnknownResponseId,
    DuplicateResponse,
    UnknownField,
    NoResponses,
}

impl IssueKind {
    /// Severity this kind is always reported with
    #[must_use]
    pub const fn severity(&self) -> IssueSeverity {
        match self {
            Self::DuplicateId
            | Self::NonPositiveWeightage
            | Self::UnknownTarget
            | Self::UnknownResponseId => IssueSeverity::Error,
            Self::DuplicateMeasureId
            | Self::WeightageTotal
            | Self::DuplicateResponse
            | Self::UnknownField
            | Self::NoResponses => IssueSeverity::Warning,
            Self::NumeratorExceedsDenominator | Self::ZeroDenominator => IssueSeverity::Info,
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub kind: IssueKind,
    /// Parameter the issue refers to, if any
    pub parameter_id: Option<u32>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, parameter_id: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            parameter_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parameter_id {
            Some(id) => write!(f, "[{}] parameter {id}: {}", self.severity, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// All issues found for one input, with per-severity counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

impl ValidationReport {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        let mut report = Self::default();
        report.extend(issues);
        report
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.error_count += 1,
            IssueSeverity::Warning => self.warning_count += 1,
            IssueSeverity::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        for issue in issues {
            self.push(issue);
        }
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: Self) {
        self.extend(other.issues);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of one severity
    pub fn by_severity(&self, severity: IssueSeverity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// Messages of every error, joined for an error value
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.by_severity(IssueSeverity::Error)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Check a parameter list for structural and data problems.
pub fn validate_parameters(parameters: &[Parameter], expected_total: f64) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut seen = HashSet::new();
    for p in parameters {
        if !seen.insert(p.id) {
            report.push(ValidationIssue::new(
                IssueKind::DuplicateId,
                Some(p.id),
                format!("id {} appears more than once", p.id),
            ));
        }
    }

    for p in parameters {
        if p.weightage.is_nan() || p.weightage <= 0.0 {
            report.push(ValidationIssue::new(
                IssueKind::NonPositiveWeightage,
                Some(p.id),
                format!("weightage must be positive, got {}", p.weightage),
            ));
        }
    }

    for (measure_id, ids) in duplicate_measure_ids(parameters) {
        let ids = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        report.push(ValidationIssue::new(
            IssueKind::DuplicateMeasureId,
            None,
            format!("measure id {measure_id} is shared by parameters {ids}"),
        ));
    }

    let total: f64 = parameters.iter().map(|p| p.weightage).sum();
    if !parameters.is_empty() && (total - expected_total).abs() > WEIGHTAGE_TOLERANCE {
        report.push(ValidationIssue::new(
            IssueKind::WeightageTotal,
            None,
            format!("weightages sum to {total}, expected {expected_total}"),
        ));
    }

    for p in parameters {
        if p.denominator == 0 {
            report.push(ValidationIssue::new(
                IssueKind::ZeroDenominator,
                Some(p.id),
                format!("{} has no denominator and scores 0", p.measure_id),
            ));
        } else if p.numerator > p.denominator {
            report.push(ValidationIssue::new(
                IssueKind::NumeratorExceedsDenominator,
                Some(p.id),
                format!(
                    "{} numerator {} exceeds denominator {}",
                    p.measure_id, p.numerator, p.denominator
                ),
            ));
        }
    }

    for issue in report.by_severity(IssueSeverity::Warning) {
        tracing::warn!("{issue}");
    }
    tracing::debug!(
        errors = report.error_count,
        warnings = report.warning_count,
        info = report.info_count,
        "validated parameters"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Catalog, ScoringRule};

    fn kinds(report: &ValidationReport) -> Vec<IssueKind> {
        report.issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_standard_catalog() {
        let report = validate_parameters(Catalog::standard().parameters(), 100.0);
        assert_eq!(report.error_count, 0);
        // DE.CM.S5 shared by 18 and 19
        assert_eq!(report.warning_count, 1);
        assert!(report.issues[0].message.contains("DE.CM.S5"));
        // Every fresh parameter has a zero denominator
        assert_eq!(report.info_count, 23);
    }

    #[test]
    fn test_duplicate_id_and_bad_weightage() {
        let params = vec![
            Parameter::new(1, "A.A.S1", "a", ScoringRule::HigherIsBetter, 50.0).with_inputs(1, 1),
            Parameter::new(1, "A.A.S2", "b", ScoringRule::HigherIsBetter, 0.0).with_inputs(1, 1),
            Parameter::new(2, "A.A.S3", "c", ScoringRule::HigherIsBetter, 50.0).with_inputs(1, 1),
        ];
        let report = validate_parameters(&params, 100.0);
        assert_eq!(
            kinds(&report),
            vec![IssueKind::DuplicateId, IssueKind::NonPositiveWeightage]
        );
        assert!(report.has_errors());
        assert!(report.error_summary().contains("parameter 1"));
    }

    #[test]
    fn test_weightage_total_mismatch() {
        let params = vec![
            Parameter::new(1, "A.A.S1", "a", ScoringRule::HigherIsBetter, 40.0).with_inputs(1, 2),
        ];
        let report = validate_parameters(&params, 100.0);
        assert_eq!(kinds(&report), vec![IssueKind::WeightageTotal]);
        assert!(report.has_warnings());
        assert!(!report.has_errors());

        assert!(validate_parameters(&params, 40.0).is_clean());
    }

    #[test]
    fn test_numerator_over_denominator_is_info() {
        let params = vec![
            Parameter::new(1, "A.A.S1", "a", ScoringRule::HigherIsBetter, 100.0).with_inputs(9, 3),
        ];
        let report = validate_parameters(&params, 100.0);
        assert_eq!(kinds(&report), vec![IssueKind::NumeratorExceedsDenominator]);
        assert_eq!(report.info_count, 1);
    }

    #[test]
    fn test_empty_list_is_clean() {
        assert!(validate_parameters(&[], 100.0).is_clean());
    }

    #[test]
    fn test_report_counts_follow_push() {
        let mut report = ValidationReport::new(vec![ValidationIssue::new(
            IssueKind::UnknownResponseId,
            Some(99),
            "not in catalog",
        )]);
        report.merge(ValidationReport::new(vec![ValidationIssue::new(
            IssueKind::DuplicateResponse,
            Some(3),
            "answered twice",
        )]));
        assert_eq!(report.error_count, 1);
        assert_eq!(report.warning_count, 1);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(
            report.issues[0].to_string(),
            "[error] parameter 99: not in catalog"
        );
    }
}
