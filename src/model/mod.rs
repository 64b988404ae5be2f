//! Data model for Cyber Capability Index assessments.
//!
//! The [`Catalog`] holds the immutable parameter definitions. An
//! [`Assessment`] is a working copy of a catalog that collects the
//! numerator/denominator inputs supplied by the assessed entity:
//!
//! ```
//! use cci_tools::model::{Assessment, Catalog};
//!
//! let catalog = Catalog::standard();
//! let mut assessment = Assessment::new(&catalog);
//! assessment.set_inputs(5, 180, 200).unwrap();
//!
//! // The template is untouched
//! assert_eq!(catalog.get(5).unwrap().numerator, 0);
//! ```

mod assessment;
mod catalog;
mod parameter;

pub use assessment::{Assessment, AssessmentInput, AssessmentMetadata, Response};
pub use catalog::{convert_records, Catalog};
pub(crate) use catalog::duplicate_measure_ids;
pub use parameter::{CatalogRecord, Parameter, ScoringRule};
