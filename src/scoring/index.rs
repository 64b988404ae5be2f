//! Composite index computation.

use super::maturity::MaturityLevel;
use super::scorer::{score_parameter, weighted_score};
use crate::model::Parameter;
use serde::{Deserialize, Serialize};

/// Scoring engine version, bumped whenever a formula changes
pub const SCORING_ENGINE_VERSION: &str = "1.0";

/// Outcome of one full assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct IndexResult {
    /// Sum of every parameter's weighted score (0-100)
    pub total_score: f64,
    /// Band the total falls into
    pub maturity_level: MaturityLevel,
    /// Fixed narrative for the band
    pub maturity_description: String,
    /// Parameters annotated with a fresh `self_assessment_score`
    pub parameters: Vec<Parameter>,
}

impl IndexResult {
    /// Sum of weightages of the scored parameters
    #[must_use]
    pub fn total_weightage(&self) -> f64 {
        self.parameters.iter().map(|p| p.weightage).sum()
    }
}

/// Score every parameter and aggregate them into the composite index.
///
/// The input slice is never modified; scores are written to an owned copy
/// returned in [`IndexResult::parameters`]. An empty slice yields a total
/// of 0 and the lowest band.
pub fn compute_index(parameters: &[Parameter]) -> IndexResult {
    let mut scored = parameters.to_vec();
    for parameter in &mut scored {
        parameter.self_assessment_score = Some(score_parameter(parameter));
    }

    let total_score: f64 = scored.iter().map(weighted_score).sum();
    let maturity_level = MaturityLevel::from_score(total_score);

    tracing::debug!(
        parameters = scored.len(),
        total_score,
        level = %maturity_level,
        "computed composite index"
    );

    IndexResult {
        total_score,
        maturity_level,
        maturity_description: maturity_level.description().to_string(),
        parameters: scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assessment, Catalog, ScoringRule};

    fn fully_compliant() -> Vec<Parameter> {
        let mut assessment = Assessment::new(&Catalog::standard());
        let ids: Vec<(u32, ScoringRule)> = assessment
            .parameters()
            .iter()
            .map(|p| (p.id, p.target))
            .collect();
        for (id, rule) in ids {
            let numerator = match rule {
                ScoringRule::LowerIsBetter => 0,
                ScoringRule::HigherIsBetter | ScoringRule::HalfCoverageFull => 40,
            };
            assessment.set_inputs(id, numerator, 40).unwrap();
        }
        assessment.snapshot()
    }

    #[test]
    fn test_empty_list() {
        let result = compute_index(&[]);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.maturity_level, MaturityLevel::LOWEST);
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn test_fresh_catalog_scores_zero() {
        let result = compute_index(Catalog::standard().parameters());
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.maturity_level, MaturityLevel::Fail);
        assert!(result
            .parameters
            .iter()
            .all(|p| p.self_assessment_score == Some(0.0)));
    }

    #[test]
    fn test_fully_compliant_is_exceptional() {
        let result = compute_index(&fully_compliant());
        assert!((result.total_score - 100.0).abs() < 1e-9);
        assert_eq!(result.maturity_level, MaturityLevel::Exceptional);
        assert!(result
            .parameters
            .iter()
            .all(|p| p.self_assessment_score == Some(100.0)));
    }

    #[test]
    fn test_input_slice_untouched() {
        let input = fully_compliant();
        let _ = compute_index(&input);
        assert!(input.iter().all(|p| p.self_assessment_score.is_none()));
    }

    #[test]
    fn test_idempotent() {
        let input = fully_compliant();
        let first = compute_index(&input);
        let second = compute_index(&first.parameters);
        assert_eq!(first, second);
    }

    #[test]
    fn test_description_matches_level() {
        let result = compute_index(&[]);
        assert_eq!(
            result.maturity_description,
            MaturityLevel::Fail.description()
        );
    }

    #[test]
    fn test_total_weightage() {
        let result = compute_index(Catalog::standard().parameters());
        assert!((result.total_weightage() - 100.0).abs() < 1e-9);
    }
}
