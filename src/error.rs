//! Unified error types for cci-tools.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and user-friendly messages. The scoring engine itself
//! never fails; errors only arise while loading catalogs, assessment inputs,
//! configuration, or while rendering reports.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cci-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CciError {
    /// Errors while decoding a catalog or an assessment input file
    #[error("Failed to parse input: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration values that cannot be used
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Unsupported target value {0} (supported: 0, 50, 100)")]
    UnknownTarget(f64),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Formatting failed: {0}")]
    FormattingError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for cci-tools operations
pub type Result<T> = std::result::Result<T, CciError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CciError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CciError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CciError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for CciError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is chained in front of any existing context, so an
/// error surfacing from a nested loader reads like
/// `"loading catalog: record 4: <original>"`.
///
/// # Example
///
/// ```ignore
/// use cci_tools::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<AssessmentInput> {
///     let content = std::fs::read_to_string(path)
///         .context("reading assessment input")?;
///
///     parse_assessment_str(&content)
///         .with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CciError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: CciError, new_ctx: &str) -> CciError {
    match err {
        CciError::Parse {
            context: existing,
            source,
        } => CciError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CciError::Report {
            context: existing,
            source,
        } => CciError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CciError::Io {
            path,
            message,
            source,
        } => CciError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CciError::Config(msg) => CciError::Config(chain_context(new_ctx, &msg)),
        CciError::Validation(msg) => CciError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| CciError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| CciError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CciError::parse("response 4", ParseErrorKind::UnknownTarget(75.0));
        let display = err.to_string();
        assert!(display.contains("parse input"), "unexpected: {display}");

        let err = CciError::config("catalog file missing");
        assert_eq!(err.to_string(), "Invalid configuration: catalog file missing");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CciError::io("/path/to/inputs.yaml", io_err);

        assert!(err.to_string().contains("/path/to/inputs.yaml"));
    }

    #[test]
    fn test_unknown_target_message() {
        let kind = ParseErrorKind::UnknownTarget(75.0);
        assert!(kind.to_string().contains("75"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(CciError::parse("base", ParseErrorKind::InvalidJson("eof".to_string())))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(CciError::Parse { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_is_lazy_on_ok() {
        let ok: Result<u32> = Ok(7);
        let value = ok
            .with_context(|| -> String { panic!("closure must not run on Ok") })
            .unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_config_context_chaining() {
        let result: Result<()> = Err(CciError::config("not a file"));
        match result.context("resolving catalog") {
            Err(CciError::Config(msg)) => assert_eq!(msg, "resolving catalog: not a file"),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_option_context() {
        let none: Option<u32> = None;
        let err = none.context_none("parameter 42 not in catalog").unwrap_err();
        assert!(matches!(err, CciError::Validation(msg) if msg.contains("42")));

        let some = Some(3).with_context_none(|| "unused").unwrap();
        assert_eq!(some, 3);
    }

    #[test]
    fn test_yaml_error_conversion() {
        let err: CciError = serde_yaml::from_str::<Vec<u32>>("- [oops")
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            CciError::Parse {
                source: ParseErrorKind::InvalidYaml(_),
                ..
            }
        ));
    }
}
