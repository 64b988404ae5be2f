//! Pipeline orchestration for assessment runs.
//!
//! Shared load → score → report steps used by the CLI command handlers.

mod load;
mod output;
mod template;

pub use load::{
    apply_responses, check_catalog_records, detect_format, load_assessment_input, load_catalog,
    load_catalog_checked, parse_assessment_str, parse_catalog_records, prepare_assessment, resolve_catalog,
    DocumentFormat, PreparedAssessment,
};
pub use output::{should_use_color, write_output, OutputTarget};
pub use template::generate_input_template;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Score below the minimum, or validation failed
    pub const CHECK_FAILED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHECK_FAILED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
