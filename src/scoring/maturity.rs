//! Maturity-level classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named band a 0-100 score falls into.
///
/// Bands are identified by their inclusive lower bound and scanned from the
/// highest down, so a score like `90.995` lands in `Optimal` instead of
/// falling between two bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MaturityLevel {
    /// Below 51: scored below the cut-off
    #[serde(alias = "Insufficient")]
    Fail,
    /// 51 to below 61
    #[serde(rename = "Bare Minimum", alias = "BareMinimum")]
    BareMinimum,
    /// 61 to below 71
    Developing,
    /// 71 to below 81
    Manageable,
    /// 81 to below 91
    Optimal,
    /// 91 and above
    Exceptional,
}

/// Ordered band table: lower bound and level, highest band first.
pub const MATURITY_BANDS: [(f64, MaturityLevel); 6] = [
    (91.0, MaturityLevel::Exceptional),
    (81.0, MaturityLevel::Optimal),
    (71.0, MaturityLevel::Manageable),
    (61.0, MaturityLevel::Developing),
    (51.0, MaturityLevel::BareMinimum),
    (0.0, MaturityLevel::Fail),
];

impl MaturityLevel {
    /// The band used when a score matches nothing (negative or NaN).
    pub const LOWEST: Self = Self::Fail;

    /// Classify a score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        MATURITY_BANDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map_or_else(
                || {
                    tracing::warn!(score, "score outside every maturity band, using lowest band");
                    Self::LOWEST
                },
                |(_, level)| *level,
            )
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional",
            Self::Optimal => "Optimal",
            Self::Manageable => "Manageable",
            Self::Developing => "Developing",
            Self::BareMinimum => "Bare Minimum",
            Self::Fail => "Fail",
        }
    }

    /// Inclusive lower bound of the band
    #[must_use]
    pub const fn lower_bound(&self) -> f64 {
        match self {
            Self::Exceptional => 91.0,
            Self::Optimal => 81.0,
            Self::Manageable => 71.0,
            Self::Developing => 61.0,
            Self::BareMinimum => 51.0,
            Self::Fail => 0.0,
        }
    }

    /// Human-readable score range, e.g. `81-90.99`
    #[must_use]
    pub const fn range_label(&self) -> &'static str {
        match self {
            Self::Exceptional => "91-100",
            Self::Optimal => "81-90.99",
            Self::Manageable => "71-80.99",
            Self::Developing => "61-70.99",
            Self::BareMinimum => "51-60.99",
            Self::Fail => "0-50.99",
        }
    }

    /// Fixed narrative for the band
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Exceptional => {
                "The entity demonstrates exceptional cyber resilience, with controls that are comprehensive, measured and continuously improved."
            }
            Self::Optimal => {
                "The entity has an optimal cyber security posture; controls are well implemented with only minor gaps."
            }
            Self::Manageable => {
                "The entity's cyber security posture is manageable; most controls are in place but several areas need strengthening."
            }
            Self::Developing => {
                "The entity's cyber security capabilities are developing; significant improvements are required across multiple domains."
            }
            Self::BareMinimum => {
                "The entity meets only the bare minimum cyber security requirements and must prioritise remediation."
            }
            Self::Fail => {
                "The entity has scored below the cut-off in at least one domain/sub-domain and does not meet the required cyber resilience level."
            }
        }
    }

    /// Whether the band counts as a pass
    #[must_use]
    pub fn is_passing(&self) -> bool {
        *self != Self::Fail
    }

    /// All levels, highest first
    #[must_use]
    pub fn all() -> [Self; 6] {
        MATURITY_BANDS.map(|(_, level)| level)
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
