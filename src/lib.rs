//! **A library for scoring Cyber Capability Index (CCI) self-assessments.**
//!
//! `cci-tools` computes a weighted compliance index from an entity's responses
//! to the 23 CCI parameters, assigns a maturity band, and breaks the result
//! down by framework category. It powers both the `cci-tools` command-line
//! tool and programmatic integrations.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The parameter [`Catalog`] and the [`Assessment`] working
//!   copy that collects numerator/denominator inputs.
//! - **[`scoring`]**: Per-parameter scoring rules, the composite index
//!   ([`compute_index`]), maturity bands, category aggregation, gap analysis
//!   and input validation.
//! - **[`pipeline`]**: Loading assessment inputs and custom catalogs from YAML
//!   or JSON, and writing output.
//! - **[`reports`]**: Summary, JSON and CSV report generators.
//! - **[`config`]**: Layered configuration loaded from `.cci-tools.yaml`.
//!
//! ## Getting Started
//!
//! ```
//! use cci_tools::{compute_index, Assessment, Catalog, MaturityLevel};
//!
//! fn main() -> cci_tools::Result<()> {
//!     let catalog = Catalog::standard();
//!     let mut assessment = Assessment::new(&catalog);
//!
//!     // Every parameter fully compliant with its target
//!     for parameter in catalog.parameters() {
//!         let (numerator, denominator) = match parameter.target.target() {
//!             0 => (0, 10),
//!             _ => (10, 10),
//!         };
//!         assessment.set_inputs(parameter.id, numerator, denominator)?;
//!     }
//!
//!     let result = compute_index(&assessment.snapshot());
//!     assert!((result.total_score - 100.0).abs() < 1e-9);
//!     assert_eq!(result.maturity_level, MaturityLevel::Exceptional);
//!     Ok(())
//! }
//! ```
//!
//! ## Loading an Assessment File
//!
//! ```no_run
//! use std::path::Path;
//! use cci_tools::{config::AppConfig, pipeline::prepare_assessment, compute_index};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let prepared = prepare_assessment(Path::new("assessment.yaml"), &AppConfig::default())?;
//!     let result = compute_index(&prepared.assessment.snapshot());
//!     println!("CCI {:.2} ({})", result.total_score, result.maturity_level);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: counts and widths are converted to f64 for percentages
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Report renderers are inherently long
    clippy::too_many_lines,
    // Config structs legitimately use several bools for toggle flags
    clippy::struct_excessive_bools,
    // self is kept for API consistency across ReportGenerator impls
    clippy::unused_self,
    // Score comparisons against exact band edges are intentional
    clippy::float_cmp
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;

// Re-export main types for convenience
pub use config::{
    AppConfig, AppConfigBuilder, BehaviorConfig, ConfigOverrides, OutputConfig, ScoringConfig,
};
pub use config::{ConfigError, Validatable};
pub use error::{CciError, ErrorContext, OptionContext, Result};
pub use model::{Assessment, AssessmentInput, Catalog, CatalogRecord, Parameter, ScoringRule};
pub use reports::{AssessmentReport, ReportFormat, ReportGenerator};
pub use scoring::{
    compute_index, gap_analysis, validate_parameters, CategoryBreakdown, IndexResult,
    MaturityLevel, ValidationReport,
};
