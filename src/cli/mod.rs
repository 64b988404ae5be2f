//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod assess;
mod catalog;
mod validate;

pub use assess::{run_assess, AssessConfig};
pub use catalog::{run_catalog, run_template};
pub use validate::run_validate;
