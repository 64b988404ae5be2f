//! Category and domain aggregation.
//!
//! Every grouping level uses the same reduction, Σ(weighted score) divided by
//! Σ(weightage). Because the ratio only depends on the two sums, rolling
//! parameters up through sub-categories gives exactly the same domain scores
//! as grouping the parameters by domain directly.

use super::maturity::MaturityLevel;
use super::scorer::weighted_score;
use crate::model::Parameter;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bucket for parameters without a category label
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Separator between domain and sub-domain in category labels
pub const DEFAULT_CATEGORY_SEPARATOR: char = ':';

/// Running sums behind a weighted average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedTally {
    pub weighted_total: f64,
    pub weightage: f64,
}

impl WeightedTally {
    pub fn add(&mut self, weighted: f64, weightage: f64) {
        self.weighted_total += weighted;
        self.weightage += weightage;
    }

    pub fn merge(&mut self, other: &Self) {
        self.add(other.weighted_total, other.weightage);
    }

    /// Weighted average on the 0-100 scale; 0 for a weightless group.
    #[must_use]
    pub fn score(&self) -> f64 {
        if self.weightage > 0.0 {
            self.weighted_total / self.weightage * 100.0
        } else {
            0.0
        }
    }
}

/// Aggregated score of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    /// Sum of the members' weighted scores
    pub weighted_total: f64,
    /// Sum of the members' weightages
    pub weightage: f64,
    /// `weighted_total / weightage * 100`
    pub score: f64,
    /// Band of this category's own score, independent of the composite
    pub maturity_level: MaturityLevel,
    pub parameter_count: usize,
}

impl CategoryScore {
    fn from_tally(name: String, tally: WeightedTally, parameter_count: usize) -> Self {
        let score = tally.score();
        Self {
            name,
            weighted_total: tally.weighted_total,
            weightage: tally.weightage,
            score,
            maturity_level: MaturityLevel::from_score(score),
            parameter_count,
        }
    }

    #[must_use]
    pub const fn tally(&self) -> WeightedTally {
        WeightedTally {
            weighted_total: self.weighted_total,
            weightage: self.weightage,
        }
    }
}

/// Category scores keyed by name, in first-seen order
pub type CategoryScores = IndexMap<String, CategoryScore>;

/// Group parameters with `key_fn` and compute each group's weighted average.
///
/// Parameters whose key is `None` or blank land in [`UNCATEGORIZED`].
pub fn aggregate_by_category<F>(parameters: &[Parameter], key_fn: F) -> CategoryScores
where
    F: Fn(&Parameter) -> Option<String>,
{
    let mut groups: IndexMap<String, (WeightedTally, usize)> = IndexMap::new();
    for parameter in parameters {
        let key = normalize_key(key_fn(parameter));
        let (tally, count) = groups.entry(key).or_default();
        tally.add(weighted_score(parameter), parameter.weightage);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(name, (tally, count))| {
            let score = CategoryScore::from_tally(name.clone(), tally, count);
            (name, score)
        })
        .collect()
}

/// Roll category scores up one level, weighting by each category's weightage.
pub fn rollup<F>(categories: &CategoryScores, key_fn: F) -> CategoryScores
where
    F: Fn(&str) -> String,
{
    let mut groups: IndexMap<String, (WeightedTally, usize)> = IndexMap::new();
    for category in categories.values() {
        let key = normalize_key(Some(key_fn(&category.name)));
        let (tally, count) = groups.entry(key).or_default();
        tally.merge(&category.tally());
        *count += category.parameter_count;
    }

    groups
        .into_iter()
        .map(|(name, (tally, count))| {
            let score = CategoryScore::from_tally(name.clone(), tally, count);
            (name, score)
        })
        .collect()
}

/// Grouping key: the parameter's full framework category
#[must_use]
pub fn by_framework_category(parameter: &Parameter) -> Option<String> {
    parameter.category().map(str::to_string)
}

/// Domain part of a category label: the prefix before `separator`, trimmed.
#[must_use]
pub fn main_category_of(label: &str, separator: char) -> String {
    let prefix = label.split(separator).next().unwrap_or(label).trim();
    if prefix.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        prefix.to_string()
    }
}

/// Group parameters directly into domains.
pub fn aggregate_by_main_category(parameters: &[Parameter], separator: char) -> CategoryScores {
    aggregate_by_category(parameters, |p| {
        p.category().map(|c| main_category_of(c, separator))
    })
}

fn normalize_key(key: Option<String>) -> String {
    match key {
        Some(k) if !k.trim().is_empty() => k.trim().to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Two-level breakdown: sub-categories and the domains they roll up into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub sub_categories: CategoryScores,
    pub main_categories: CategoryScores,
}

impl CategoryBreakdown {
    /// Aggregate by framework category, then roll up by domain prefix.
    pub fn compute(parameters: &[Parameter], separator: char) -> Self {
        let sub_categories = aggregate_by_category(parameters, by_framework_category);
        let main_categories = rollup(&sub_categories, |name| main_category_of(name, separator));
        Self {
            sub_categories,
            main_categories,
        }
    }

    /// Domains whose own band is the lowest one.
    #[must_use]
    pub fn failing_domains(&self) -> Vec<&CategoryScore> {
        self.main_categories
            .values()
            .filter(|c| !c.maturity_level.is_passing())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Catalog, ScoringRule};

    fn p(id: u32, category: Option<&str>, weightage: f64, num: u32, den: u32) -> Parameter {
        let param = Parameter::new(id, format!("M.{id}"), "t", ScoringRule::HigherIsBetter, weightage)
            .with_inputs(num, den);
        match category {
            Some(c) => param.with_category(c),
            None => param,
        }
    }

    #[test]
    fn test_weighted_average_within_group() {
        let params = vec![
            p(1, Some("Protect: Data Security"), 4.0, 1, 1),
            p(2, Some("Protect: Data Security"), 1.0, 0, 1),
        ];
        let scores = aggregate_by_category(&params, by_framework_category);
        let ds = &scores["Protect: Data Security"];
        assert_eq!(ds.weightage, 5.0);
        assert_eq!(ds.weighted_total, 4.0);
        assert!((ds.score - 80.0).abs() < 1e-9);
        assert_eq!(ds.maturity_level, MaturityLevel::Manageable);
        assert_eq!(ds.parameter_count, 2);
    }

    #[test]
    fn test_missing_category_goes_to_uncategorized() {
        let params = vec![
            p(1, None, 2.0, 1, 1),
            p(2, Some("  "), 2.0, 0, 1),
            p(3, Some("Detect: Continuous Monitoring"), 2.0, 1, 1),
        ];
        let scores = aggregate_by_category(&params, by_framework_category);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[UNCATEGORIZED].parameter_count, 2);
        assert!((scores[UNCATEGORIZED].score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weightage_group_scores_zero() {
        let params = vec![p(1, Some("Empty: Group"), 0.0, 1, 1)];
        let scores = aggregate_by_category(&params, by_framework_category);
        assert_eq!(scores["Empty: Group"].score, 0.0);
        assert!(!scores["Empty: Group"].score.is_nan());
    }

    #[test]
    fn test_main_category_of() {
        assert_eq!(main_category_of("Protect: Data Security", ':'), "Protect");
        assert_eq!(main_category_of("Recover", ':'), "Recover");
        assert_eq!(main_category_of(": orphan", ':'), UNCATEGORIZED);
        assert_eq!(main_category_of("Detect - Monitoring", '-'), "Detect");
    }

    #[test]
    fn test_rollup_matches_direct_aggregation() {
        let params = vec![
            p(1, Some("Protect: Data Security"), 4.0, 3, 4),
            p(2, Some("Protect: Platform Security"), 5.0, 1, 3),
            p(3, Some("Detect: Continuous Monitoring"), 9.0, 2, 9),
            p(4, None, 1.0, 1, 1),
        ];
        let breakdown = CategoryBreakdown::compute(&params, ':');
        let direct = aggregate_by_main_category(&params, ':');

        assert_eq!(
            breakdown.main_categories.keys().collect::<Vec<_>>(),
            direct.keys().collect::<Vec<_>>()
        );
        for (name, via_sub) in &breakdown.main_categories {
            let d = &direct[name];
            assert!((via_sub.score - d.score).abs() < 1e-9, "{name}");
            assert_eq!(via_sub.parameter_count, d.parameter_count);
        }
    }

    #[test]
    fn test_standard_catalog_breakdown_shape() {
        let breakdown = CategoryBreakdown::compute(Catalog::standard().parameters(), ':');
        assert_eq!(breakdown.main_categories.len(), 6);
        let total: f64 = breakdown.main_categories.values().map(|c| c.weightage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(breakdown.failing_domains().len(), 6);
    }
}
