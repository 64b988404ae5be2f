//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, ConfigOverrides};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".cci-tools.yaml",
    ".cci-tools.yml",
    "cci-tools.yaml",
    "cci-tools.yml",
    ".cci-toolsrc",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/cci-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("cci-tools")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Apply command-line overrides on top of this config.
    ///
    /// Every value the user gave wins, including one equal to the default.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        // Scoring config
        if let Some(file) = &overrides.catalog_file {
            self.scoring.catalog_file = Some(file.clone());
        }
        if let Some(separator) = overrides.category_separator {
            self.scoring.category_separator = separator;
        }
        if let Some(total) = overrides.expected_total_weightage {
            self.scoring.expected_total_weightage = total;
        }

        // Output config
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(file) = &overrides.output_file {
            self.output.file = Some(file.clone());
        }
        if overrides.no_color {
            self.output.no_color = true;
        }
        if let Some(max_gaps) = overrides.max_gaps {
            self.output.max_gaps = max_gaps;
        }

        // Behavior config
        if overrides.min_score.is_some() {
            self.behavior.min_score = overrides.min_score;
        }
        if overrides.fail_on_warning {
            self.behavior.fail_on_warning = true;
        }
        if overrides.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# cci-tools configuration
# Place this file at .cci-tools.yaml in your project root or ~/.config/cci-tools/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# cci-tools Configuration File
# ============================
#
# This file configures cci-tools behavior. Place it at:
#   - .cci-tools.yaml in your project root
#   - ~/.config/cci-tools/cci-tools.yaml for global config
#
# CLI arguments always override file settings.

# Scoring configuration
scoring:
  # Custom parameter catalog (YAML or JSON); omit for the built-in catalog
  # catalog_file: ./catalog.yaml
  # Separator between domain and sub-domain in category labels
  category_separator: ':'
  # Weightage total the catalog should add up to
  expected_total_weightage: 100.0

# Output configuration
output:
  # Format: summary, json, csv
  format: summary
  # Output file path (omit for stdout)
  # file: report.json
  # Disable colored output
  no_color: false
  # Number of gaps to list (0 = all)
  max_gaps: 10

# Behavior flags
behavior:
  # Exit with code 1 if the composite score is below this value
  # min_score: 51
  # Exit with code 1 if validation produced warnings
  fail_on_warning: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
