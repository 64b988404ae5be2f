//! Default values for cci-tools configuration.

/// Weightage total of the standard catalog
pub const DEFAULT_EXPECTED_TOTAL_WEIGHTAGE: f64 = 100.0;

/// Number of gaps listed in reports unless configured otherwise
pub const DEFAULT_MAX_GAPS: usize = 10;
