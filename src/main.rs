//! vocab-diff: Semantic change detection for RDF/OWL vocabularies
//!
//! Compares a published vocabulary with its draft and reports reviewable
//! changes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_diff::{
    cli,
    config::{AppConfig, ConfigPreset, DiffPaths, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported graph syntaxes:",
        "\n  N-Triples, Turtle",
        "\n\nOutput Formats:",
        "\n  json, summary, table",
        "\n\nFeatures:",
        "\n  Blank-node isomorphism, OWL restriction composition, review carry-over"
    )
}

#[derive(Parser)]
#[command(name = "vocab-diff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Semantic change detection for RDF/OWL vocabularies", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or changes without --fail-on-change)
    1  Changes detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Summary of what the draft changes
    vocab-diff diff published.ttl draft.ttl

    # Persist the change list and keep reviewer verdicts on the next run
    vocab-diff diff published.ttl draft.ttl -o json -O changes.json
    vocab-diff diff published.ttl draft.ttl --previous changes.json -o json -O changes.json

    # CI gate
    vocab-diff diff published.nt draft.nt --preset ci-cd")]
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

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the canonical (published) graph
    canonical: PathBuf,

    /// Path to the draft graph
    draft: PathBuf,

    /// Previously persisted change list (JSON) whose verdicts are kept
    #[arg(long)]
    previous: Option<PathBuf>,

    /// Output format (auto: summary on a terminal, json otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Configuration preset (default, ci-cd, strict, flat)
    #[arg(long)]
    preset: Option<String>,

    /// Fail when a removed statement reappears with an object of another kind
    #[arg(long)]
    strict: bool,

    /// Report atomic changes only, without composite restrictions
    #[arg(long)]
    no_compose: bool,

    /// Reviewer whose verdicts drive review states
    #[arg(long, env = "VOCAB_DIFF_REVIEWER")]
    reviewer: Option<String>,

    /// Exit with code 1 if any changes detected
    #[arg(long)]
    fail_on_change: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a draft vocabulary with the canonical one
    Diff(DiffArgs),

    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an example .vocab-diff.yaml in the current directory
    InitConfig,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    // Dispatch to command handlers
    match cli.command {
        Commands::Diff(args) => {
            let base = match args.preset.as_deref() {
                Some(name) => {
                    let preset = ConfigPreset::from_name(name).with_context(|| {
                        let known: Vec<_> = ConfigPreset::all().iter().map(|p| p.name()).collect();
                        format!("unknown preset '{name}' (expected one of: {})", known.join(", "))
                    })?;
                    AppConfig::from_preset(preset)
                }
                None => AppConfig::default(),
            };

            let overrides = AppConfig::builder()
                .strict_modifications(args.strict)
                .compose_restrictions(!args.no_compose)
                .reviewer(args.reviewer)
                .output_format(args.output)
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .fail_on_change(args.fail_on_change)
                .quiet(cli.quiet)
                .build();

            let (mut config, loaded_from) = vocab_diff::config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }
            config.merge(&base);
            config.merge(&overrides);

            let errors = config.validate();
            if !errors.is_empty() {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
            }

            let paths = DiffPaths {
                canonical: args.canonical,
                draft: args.draft,
                previous: args.previous,
            };
            cli::run_diff(&config, &paths)
        }

        Commands::Schema { output } => {
            let schema = vocab_diff::config::generate_json_schema()
                .context("failed to generate config schema")?;
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

        Commands::InitConfig => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".vocab-diff.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = vocab_diff::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
            Ok(exit_codes::SUCCESS)
        }
    }
}
