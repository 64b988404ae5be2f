//! Configuration module for cci-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use cci_tools::config::{AppConfig, Validatable};
//! use cci_tools::reports::ReportFormat;
//!
//! let config = AppConfig::builder()
//!     .output_format(ReportFormat::Json)
//!     .min_score(Some(51.0))
//!     .build();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.cci-tools.yaml` file in your project root or `~/.config/cci-tools/`:
//!
//! ```yaml
//! scoring:
//!   catalog_file: ./catalog.yaml
//! output:
//!   format: json
//! behavior:
//!   min_score: 51
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_EXPECTED_TOTAL_WEIGHTAGE, DEFAULT_MAX_GAPS};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, ConfigOverrides, OutputConfig, ScoringConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.cci-tools.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
