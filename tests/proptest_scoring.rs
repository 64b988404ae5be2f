//! Property-based tests for the scoring engine.
//!
//! Checks the per-rule monotonicity, the score and weighted bounds, and that
//! category roll-ups agree with direct aggregation for arbitrary inputs.

use cci_tools::model::{Parameter, ScoringRule};
use cci_tools::scoring::{
    aggregate_by_category, aggregate_by_main_category, by_framework_category, compute_index,
    main_category_of, rollup, score_parameter, weighted_score, MaturityLevel,
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-6;

fn rule_strategy() -> impl Strategy<Value = ScoringRule> {
    prop_oneof![
        Just(ScoringRule::HigherIsBetter),
        Just(ScoringRule::LowerIsBetter),
        Just(ScoringRule::HalfCoverageFull),
    ]
}

fn category_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Governance: Policy".to_string())),
        Just(Some("Governance: Oversight".to_string())),
        Just(Some("Protect: Data Security".to_string())),
        Just(Some("Protect: Platform Security".to_string())),
        Just(Some("Detect: Continuous Monitoring".to_string())),
        Just(Some("Recover".to_string())),
    ]
}

prop_compose! {
    fn parameter_strategy()(
        id in 1u32..1000,
        rule in rule_strategy(),
        weightage in 0.5f64..20.0,
        numerator in 0u32..500,
        denominator in 0u32..500,
        category in category_strategy(),
    ) -> Parameter {
        let mut p = Parameter::new(id, format!("P.{id}"), "generated", rule, weightage)
            .with_inputs(numerator, denominator);
        p.framework_category = category;
        p
    }
}

fn with_rule(rule: ScoringRule, numerator: u32, denominator: u32) -> Parameter {
    Parameter::new(1, "P.1", "generated", rule, 10.0).with_inputs(numerator, denominator)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn score_is_bounded(p in parameter_strategy()) {
        let score = score_parameter(&p);
        prop_assert!((0.0..=100.0).contains(&score), "score {} out of range", score);

        let weighted = weighted_score(&p);
        prop_assert!(weighted >= 0.0);
        prop_assert!(weighted <= p.weightage + EPSILON);
    }

    #[test]
    fn weighted_is_score_times_weightage(p in parameter_strategy()) {
        prop_assert_eq!(weighted_score(&p), score_parameter(&p) * p.weightage / 100.0);
    }

    #[test]
    fn zero_denominator_scores_zero(rule in rule_strategy(), numerator in 0u32..10_000) {
        prop_assert_eq!(score_parameter(&with_rule(rule, numerator, 0)), 0.0);
    }

    #[test]
    fn higher_is_better_monotonic(denominator in 1u32..1000, a in 0u32..2000, b in 0u32..2000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = score_parameter(&with_rule(ScoringRule::HigherIsBetter, lo, denominator));
        let high = score_parameter(&with_rule(ScoringRule::HigherIsBetter, hi, denominator));
        prop_assert!(low <= high);
        if hi >= denominator {
            prop_assert_eq!(high, 100.0);
        }
    }

    #[test]
    fn lower_is_better_antitonic(denominator in 1u32..1000, a in 0u32..2000, b in 0u32..2000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = score_parameter(&with_rule(ScoringRule::LowerIsBetter, lo, denominator));
        let high = score_parameter(&with_rule(ScoringRule::LowerIsBetter, hi, denominator));
        prop_assert!(low >= high);
        if hi >= denominator {
            prop_assert_eq!(high, 0.0);
        }
        prop_assert_eq!(
            score_parameter(&with_rule(ScoringRule::LowerIsBetter, 0, denominator)),
            100.0
        );
    }

    #[test]
    fn half_coverage_is_linear_below_half(half in 1u32..500, numerator in 0u32..500) {
        let denominator = half * 2;
        let numerator = numerator.min(half);
        let score = score_parameter(&with_rule(ScoringRule::HalfCoverageFull, numerator, denominator));
        let expected = f64::from(numerator) / f64::from(half) * 100.0;
        prop_assert!((score - expected).abs() < EPSILON, "{} vs {}", score, expected);
        prop_assert_eq!(
            score_parameter(&with_rule(ScoringRule::HalfCoverageFull, half, denominator)),
            100.0
        );
    }

    #[test]
    fn composite_matches_band(params in prop::collection::vec(parameter_strategy(), 0..30)) {
        let result = compute_index(&params);
        let expected: f64 = params.iter().map(weighted_score).sum();
        prop_assert!((result.total_score - expected).abs() < EPSILON);
        prop_assert_eq!(result.maturity_level, MaturityLevel::from_score(result.total_score));
        prop_assert_eq!(result.parameters.len(), params.len());
    }

    #[test]
    fn rollup_matches_direct_aggregation(params in prop::collection::vec(parameter_strategy(), 1..40)) {
        let direct = aggregate_by_main_category(&params, ':');
        let sub = aggregate_by_category(&params, by_framework_category);
        let rolled = rollup(&sub, |name| main_category_of(name, ':'));

        prop_assert_eq!(direct.len(), rolled.len());
        for (name, category) in &direct {
            let other = &rolled[name];
            prop_assert!((category.score - other.score).abs() < EPSILON, "{}: {} vs {}", name, category.score, other.score);
            prop_assert!((category.weightage - other.weightage).abs() < EPSILON);
            prop_assert_eq!(category.parameter_count, other.parameter_count);
        }
    }
}
