//! Gap analysis: where the composite index loses the most points.

use super::index::IndexResult;
use super::scorer::weighted_score;
use crate::model::ScoringRule;
use serde::{Deserialize, Serialize};

/// Gains below this are treated as fully compliant
const MIN_GAIN: f64 = 1e-9;

/// A parameter that is not fully compliant, with the points it could add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub id: u32,
    pub measure_id: String,
    pub title: String,
    pub category: Option<String>,
    pub target: ScoringRule,
    /// Current normalized score (0-100)
    pub score: f64,
    pub weighted_score: f64,
    pub weightage: f64,
    /// `weightage - weighted_score`: points regained by full compliance
    pub potential_gain: f64,
}

impl Gap {
    /// One-line remediation hint
    #[must_use]
    pub fn message(&self) -> String {
        let action = match self.target {
            ScoringRule::HigherIsBetter => "raise coverage to 100%",
            ScoringRule::LowerIsBetter => "drive occurrences down to zero",
            ScoringRule::HalfCoverageFull => "reach at least 50% coverage",
        };
        format!(
            "{} {}: {action} (+{:.2} points)",
            self.measure_id, self.title, self.potential_gain
        )
    }
}

/// Parameters ranked by potential gain, largest first, ties by id.
///
/// Fully compliant parameters are left out. `limit` caps the list length.
pub fn gap_analysis(result: &IndexResult, limit: Option<usize>) -> Vec<Gap> {
    let mut gaps: Vec<Gap> = result
        .parameters
        .iter()
        .filter_map(|p| {
            let weighted = weighted_score(p);
            let potential_gain = p.weightage - weighted;
            if potential_gain <= MIN_GAIN {
                return None;
            }
            Some(Gap {
                id: p.id,
                measure_id: p.measure_id.clone(),
                title: p.title.clone(),
                category: p.category().map(str::to_string),
                target: p.target,
                score: p.self_assessment_score.unwrap_or_default(),
                weighted_score: weighted,
                weightage: p.weightage,
                potential_gain,
            })
        })
        .collect();

    gaps.sort_by(|a, b| {
        b.potential_gain
            .partial_cmp(&a.potential_gain)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    if let Some(limit) = limit {
        gaps.truncate(limit);
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assessment, Catalog};
    use crate::scoring::compute_index;

    #[test]
    fn test_fresh_catalog_ranks_by_weightage() {
        let result = compute_index(Catalog::standard().parameters());
        let gaps = gap_analysis(&result, None);
        assert_eq!(gaps.len(), 23);
        // DE.CM.S5 vulnerability measure carries weightage 10
        assert_eq!(gaps[0].id, 18);
        assert_eq!(gaps[0].potential_gain, 10.0);
        assert_eq!(gaps[1].id, 15);
        // Ties broken by id
        let sixes: Vec<u32> = gaps
            .iter()
            .filter(|g| g.weightage == 6.0)
            .map(|g| g.id)
            .collect();
        assert_eq!(sixes, vec![20, 22]);
    }

    #[test]
    fn test_limit_and_compliant_excluded() {
        let mut assessment = Assessment::new(&Catalog::standard());
        assessment.set_inputs(18, 10, 10).unwrap();
        let result = compute_index(&assessment.snapshot());

        let gaps = gap_analysis(&result, Some(3));
        assert_eq!(gaps.len(), 3);
        assert!(gaps.iter().all(|g| g.id != 18));
        assert_eq!(gaps[0].id, 15);
    }

    #[test]
    fn test_partial_gain() {
        let mut assessment = Assessment::new(&Catalog::standard());
        // HigherIsBetter, weightage 5, 60% coverage
        assessment.set_inputs(14, 6, 10).unwrap();
        let result = compute_index(&assessment.snapshot());
        let gap = gap_analysis(&result, None)
            .into_iter()
            .find(|g| g.id == 14)
            .unwrap();
        assert!((gap.potential_gain - 2.0).abs() < 1e-9);
        assert!((gap.score - 60.0).abs() < 1e-9);
        assert!(gap.message().contains("+2.00 points"));
    }

    #[test]
    fn test_empty_result() {
        assert!(gap_analysis(&compute_index(&[]), Some(5)).is_empty());
    }
}
