//! Assessment parameters and their scoring rules.
//!
//! A [`Parameter`] is one weighted regulatory measure. Its scoring behavior is
//! selected by a closed [`ScoringRule`]; the numeric targets used in catalog
//! files (`100`, `0`, `50`) are only accepted at the decoding boundary, so an
//! unsupported target can never reach the scorer.

use crate::error::ParseErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a parameter's raw compliance percentage is turned into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ScoringRule {
    /// Target 100: the score is the percentage, capped at 100.
    HigherIsBetter,
    /// Target 0: adverse-event measures, every percent reduces the score.
    LowerIsBetter,
    /// Target 50: half coverage already earns full credit.
    HalfCoverageFull,
}

impl ScoringRule {
    /// All supported rules
    pub const ALL: [Self; 3] = [
        Self::HigherIsBetter,
        Self::LowerIsBetter,
        Self::HalfCoverageFull,
    ];

    /// The numeric target this rule is written as in catalog files.
    #[must_use]
    pub const fn target(self) -> u32 {
        match self {
            Self::HigherIsBetter => 100,
            Self::LowerIsBetter => 0,
            Self::HalfCoverageFull => 50,
        }
    }

    /// Short human label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "Higher is better",
            Self::LowerIsBetter => "Lower is better",
            Self::HalfCoverageFull => "50% coverage earns full credit",
        }
    }
}

impl TryFrom<f64> for ScoringRule {
    type Error = ParseErrorKind;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // Exact comparisons: targets are whole numbers in every catalog.
        if value == 100.0 {
            Ok(Self::HigherIsBetter)
        } else if value == 0.0 {
            Ok(Self::LowerIsBetter)
        } else if value == 50.0 {
            Ok(Self::HalfCoverageFull)
        } else {
            Err(ParseErrorKind::UnknownTarget(value))
        }
    }
}

impl From<ScoringRule> for f64 {
    fn from(rule: ScoringRule) -> Self {
        f64::from(rule.target())
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target())
    }
}

/// One weighted regulatory measure being assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Unique numeric id
    pub id: u32,
    /// Measure code (e.g. `PR.AA.S1`); not guaranteed unique
    pub measure_id: String,
    /// Human title
    pub title: String,
    /// Formula text shown next to the inputs
    #[serde(default)]
    pub formula: String,
    /// Help text describing what to count
    #[serde(default)]
    pub description: String,
    /// Grouping key in the form `Domain: Sub-domain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_category: Option<String>,
    /// Scoring rule, written as the numeric target
    pub target: ScoringRule,
    /// Share of the 100-point composite
    pub weightage: f64,
    /// Count of compliant items
    #[serde(default)]
    pub numerator: u32,
    /// Count of applicable items
    #[serde(default)]
    pub denominator: u32,
    /// Evidence supplied by the assessed entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Auditor commentary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_comment: Option<String>,
    /// Last computed normalized score; written by the index computation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_assessment_score: Option<f64>,
}

impl Parameter {
    /// Create a parameter with zeroed inputs.
    pub fn new(
        id: u32,
        measure_id: impl Into<String>,
        title: impl Into<String>,
        target: ScoringRule,
        weightage: f64,
    ) -> Self {
        Self {
            id,
            measure_id: measure_id.into(),
            title: title.into(),
            formula: String::new(),
            description: String::new(),
            framework_category: None,
            target,
            weightage,
            numerator: 0,
            denominator: 0,
            evidence: None,
            audit_comment: None,
            self_assessment_score: None,
        }
    }

    /// Set the numerator/denominator inputs
    #[must_use]
    pub const fn with_inputs(mut self, numerator: u32, denominator: u32) -> Self {
        self.numerator = numerator;
        self.denominator = denominator;
        self
    }

    /// Set the framework category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.framework_category = Some(category.into());
        self
    }

    /// Raw compliance percentage, or `None` when the denominator is zero.
    ///
    /// Not clamped: a numerator above the denominator yields more than 100.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        if self.denominator == 0 {
            return None;
        }
        Some(f64::from(self.numerator) / f64::from(self.denominator) * 100.0)
    }

    /// Clear every user-supplied value, keeping the definition.
    pub fn reset_inputs(&mut self) {
        self.numerator = 0;
        self.denominator = 0;
        self.evidence = None;
        self.audit_comment = None;
        self.self_assessment_score = None;
    }

    /// Category label used for grouping, if any
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.framework_category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// A catalog entry as written in a custom catalog file.
///
/// The target stays a raw number here so that every invalid entry in a file
/// can be reported at once instead of failing on the first one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogRecord {
    pub id: u32,
    pub measure_id: String,
    pub title: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub framework_category: Option<String>,
    pub target: f64,
    pub weightage: f64,
}

impl TryFrom<CatalogRecord> for Parameter {
    type Error = ParseErrorKind;

    fn try_from(record: CatalogRecord) -> Result<Self, Self::Error> {
        let target = ScoringRule::try_from(record.target)?;
        let mut parameter = Self::new(
            record.id,
            record.measure_id,
            record.title,
            target,
            record.weightage,
        );
        parameter.formula = record.formula;
        parameter.description = record.description;
        parameter.framework_category = record.framework_category;
        Ok(parameter)
    }
}

impl From<&Parameter> for CatalogRecord {
    fn from(parameter: &Parameter) -> Self {
        Self {
            id: parameter.id,
            measure_id: parameter.measure_id.clone(),
            title: parameter.title.clone(),
            formula: parameter.formula.clone(),
            description: parameter.description.clone(),
            framework_category: parameter.framework_category.clone(),
            target: f64::from(parameter.target),
            weightage: parameter.weightage,
        }
    }
}
