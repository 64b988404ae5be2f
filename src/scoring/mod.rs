//! Scoring engine.
//!
//! Turns parameter inputs into normalized scores, weighted contributions,
//! the composite Cyber Capability Index and its maturity band.
//!
//! # Scoring rules
//!
//! | Rule | Score for percentage `p` |
//! |------|--------------------------|
//! | higher is better (`100`) | `min(p, 100)` |
//! | lower is better (`0`) | `max(100 - p, 0)` |
//! | half coverage is full (`50`) | `100` if `p >= 50`, else `p / 50 * 100` |
//!
//! A parameter contributes `score * weightage / 100` to the index; with the
//! standard weightages summing to 100 the index is itself on a 0-100 scale.
//!
//! ```
//! use cci_tools::model::{Assessment, Catalog};
//! use cci_tools::scoring::{compute_index, MaturityLevel};
//!
//! let assessment = Assessment::new(&Catalog::standard());
//! let result = compute_index(&assessment.snapshot());
//! assert_eq!(result.total_score, 0.0);
//! assert_eq!(result.maturity_level, MaturityLevel::Fail);
//! ```

mod category;
mod gaps;
mod index;
mod maturity;
mod scorer;
mod validation;

pub use category::{
    aggregate_by_category, aggregate_by_main_category, by_framework_category, main_category_of,
    rollup, CategoryBreakdown, CategoryScore, CategoryScores, WeightedTally,
    DEFAULT_CATEGORY_SEPARATOR, UNCATEGORIZED,
};
pub use gaps::{gap_analysis, Gap};
pub use index::{compute_index, IndexResult, SCORING_ENGINE_VERSION};
pub use maturity::{MaturityLevel, MATURITY_BANDS};
pub use scorer::{apply_rule, score_parameter, weighted_score, MAX_SCORE};
pub use validation::{
    validate_parameters, IssueKind, IssueSeverity, ValidationIssue, ValidationReport,
};
