//! Per-parameter scoring.

use crate::model::{Parameter, ScoringRule};

/// Upper bound of a normalized score
pub const MAX_SCORE: f64 = 100.0;

/// Normalized score of one parameter, always within `[0, 100]`.
///
/// A zero denominator is an undefined ratio and scores 0 under every rule.
#[must_use]
pub fn score_parameter(parameter: &Parameter) -> f64 {
    let Some(percentage) = parameter.percentage() else {
        tracing::debug!(
            id = parameter.id,
            measure = %parameter.measure_id,
            "denominator is zero, scoring 0"
        );
        return 0.0;
    };

    let score = apply_rule(parameter.target, percentage);
    score.clamp(0.0, MAX_SCORE)
}

/// Map a raw percentage to a score for the given rule (not yet clamped).
#[must_use]
pub fn apply_rule(rule: ScoringRule, percentage: f64) -> f64 {
    match rule {
        ScoringRule::HigherIsBetter => percentage.min(MAX_SCORE),
        ScoringRule::LowerIsBetter => (MAX_SCORE - percentage).max(0.0),
        ScoringRule::HalfCoverageFull => {
            if percentage >= 50.0 {
                MAX_SCORE
            } else {
                percentage / 50.0 * MAX_SCORE
            }
        }
    }
}

/// Contribution of a parameter to the composite, within `[0, weightage]`.
#[must_use]
pub fn weighted_score(parameter: &Parameter) -> f64 {
    score_parameter(parameter) * parameter.weightage / MAX_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(rule: ScoringRule, weightage: f64, numerator: u32, denominator: u32) -> Parameter {
        Parameter::new(1, "T.T.S1", "Test", rule, weightage).with_inputs(numerator, denominator)
    }

    #[test]
    fn test_higher_is_better_scenario() {
        let p = param(ScoringRule::HigherIsBetter, 18.0, 50, 100);
        assert_eq!(score_parameter(&p), 50.0);
        assert_eq!(weighted_score(&p), 9.0);
    }

    #[test]
    fn test_lower_is_better_scenario() {
        let p = param(ScoringRule::LowerIsBetter, 1.0, 5, 20);
        assert_eq!(score_parameter(&p), 75.0);
        assert_eq!(weighted_score(&p), 0.75);
    }

    #[test]
    fn test_half_coverage_scenario() {
        let p = param(ScoringRule::HalfCoverageFull, 9.0, 30, 100);
        assert!((score_parameter(&p) - 60.0).abs() < 1e-9);
        assert!((weighted_score(&p) - 5.4).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominator_scores_zero_for_every_rule() {
        for rule in ScoringRule::ALL {
            assert_eq!(score_parameter(&param(rule, 5.0, 0, 0)), 0.0, "{rule:?}");
            assert_eq!(score_parameter(&param(rule, 5.0, 7, 0)), 0.0, "{rule:?}");
        }
    }

    #[test]
    fn test_higher_is_better_caps_overflow() {
        let p = param(ScoringRule::HigherIsBetter, 4.0, 150, 100);
        assert_eq!(score_parameter(&p), 100.0);
        assert_eq!(weighted_score(&p), 4.0);
    }

    #[test]
    fn test_lower_is_better_edges() {
        assert_eq!(score_parameter(&param(ScoringRule::LowerIsBetter, 1.0, 0, 10)), 100.0);
        assert_eq!(score_parameter(&param(ScoringRule::LowerIsBetter, 1.0, 10, 10)), 0.0);
        assert_eq!(score_parameter(&param(ScoringRule::LowerIsBetter, 1.0, 30, 10)), 0.0);
    }

    #[test]
    fn test_half_coverage_edges() {
        assert_eq!(score_parameter(&param(ScoringRule::HalfCoverageFull, 9.0, 0, 10)), 0.0);
        assert_eq!(score_parameter(&param(ScoringRule::HalfCoverageFull, 9.0, 5, 10)), 100.0);
        assert_eq!(score_parameter(&param(ScoringRule::HalfCoverageFull, 9.0, 9, 10)), 100.0);
        assert_eq!(score_parameter(&param(ScoringRule::HalfCoverageFull, 9.0, 1, 4)), 50.0);
    }

    #[test]
    fn test_apply_rule_unclamped_inputs() {
        assert_eq!(apply_rule(ScoringRule::HigherIsBetter, 250.0), 100.0);
        assert_eq!(apply_rule(ScoringRule::LowerIsBetter, 250.0), 0.0);
        assert_eq!(apply_rule(ScoringRule::HalfCoverageFull, 250.0), 100.0);
    }
}
