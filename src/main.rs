//! cci-tools: Cyber Capability Index self-assessment calculator
//!
//! Scores compliance responses against the weighted CCI parameter catalog.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use cci_tools::{
    cli::{self, AssessConfig},
    config::{AppConfig, ConfigOverrides, Validatable, CONFIG_FILE_NAMES},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with engine info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nScoring engine: CCI 1.0 (23 weighted parameters)",
        "\n\nInput Formats:",
        "\n  YAML, JSON",
        "\n\nOutput Formats:",
        "\n  summary, json, csv"
    )
}

#[derive(Parser)]
#[command(name = "cci-tools")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Cyber Capability Index self-assessment calculator", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Validation failed or score below --min-score
    3  Error occurred

EXAMPLES:
    # Write a blank assessment input for the standard catalog
    cci-tools template -O assessment.yaml

    # Score an assessment
    cci-tools assess assessment.yaml

    # CI/CD gate on the Bare Minimum band
    cci-tools assess assessment.yaml --min-score 51

    # Export JSON for processing
    cci-tools assess assessment.yaml -o json > report.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Custom parameter catalog (YAML or JSON)
    #[arg(long, global = true, env = "CCI_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `assess` subcommand
#[derive(Parser)]
struct AssessArgs {
    /// Path to the assessment input (YAML or JSON)
    input: PathBuf,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if the CCI score is below this value
    #[arg(long)]
    min_score: Option<f64>,

    /// Exit with code 1 if validation produced warnings
    #[arg(long)]
    fail_on_warning: bool,

    /// Show the category breakdown in summary output
    #[arg(long)]
    categories: bool,

    /// Maximum number of gaps to report (0 = all)
    #[arg(long)]
    gaps: Option<usize>,
}

/// Arguments for the `catalog` subcommand
#[derive(Parser)]
struct CatalogArgs {
    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Path to the assessment input (YAML or JSON)
    input: PathBuf,

    /// Output format (summary or json)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if validation produced warnings
    #[arg(long)]
    fail_on_warning: bool,
}

/// Arguments for the `template` subcommand
#[derive(Parser)]
struct TemplateArgs {
    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an assessment and report the CCI index and maturity band
    Assess(AssessArgs),

    /// Print the active parameter catalog
    Catalog(CatalogArgs),

    /// Check an assessment input without scoring it
    Validate(ValidateArgs),

    /// Generate a blank assessment input for the active catalog
    Template(TemplateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .cci-tools.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli) {
        Ok(exit_code) => {
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Dispatch to command handlers
fn run(cli: Cli) -> Result<i32> {
    let global = ConfigOverrides {
        catalog_file: cli.catalog.clone(),
        no_color: cli.no_color,
        quiet: cli.quiet,
        ..ConfigOverrides::default()
    };

    match cli.command {
        Commands::Assess(args) => {
            let overrides = ConfigOverrides {
                format: args.output,
                output_file: args.output_file,
                max_gaps: args.gaps,
                min_score: args.min_score,
                fail_on_warning: args.fail_on_warning,
                ..global
            };
            let app = effective_config(cli.config.as_deref(), &overrides);

            cli::run_assess(AssessConfig {
                input: args.input,
                app,
                show_categories: args.categories,
            })
        }

        Commands::Catalog(args) => {
            let overrides = ConfigOverrides {
                format: args.output,
                output_file: args.output_file,
                ..global
            };
            let app = effective_config(cli.config.as_deref(), &overrides);
            cli::run_catalog(&app)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Validate(args) => {
            let overrides = ConfigOverrides {
                output_file: args.output_file,
                fail_on_warning: args.fail_on_warning,
                ..global
            };
            let app = effective_config(cli.config.as_deref(), &overrides);
            let format = match args.output.unwrap_or(app.output.format) {
                ReportFormat::Csv => {
                    tracing::warn!("CSV output is not available for validation; using summary");
                    ReportFormat::Summary
                }
                other => other,
            };
            cli::run_validate(&args.input, format, &app)
        }

        Commands::Template(args) => {
            let overrides = ConfigOverrides {
                output_file: args.output_file,
                ..global
            };
            let app = effective_config(cli.config.as_deref(), &overrides);
            cli::run_template(&app)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cci-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = cci_tools::config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    cci_tools::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    ::dirs::config_dir().map(|p| p.join("cci-tools").display().to_string()),
                    ::dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match cci_tools::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".cci-tools.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = cci_tools::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}

/// Merge the discovered config file with CLI overrides and report problems.
fn effective_config(
    config_path: Option<&std::path::Path>,
    overrides: &ConfigOverrides,
) -> AppConfig {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(config_path, overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    for problem in config.validate() {
        tracing::warn!("Config: {problem}");
    }
    config
}
