//! interceptor-lint CLI tool.
//!
//! Usage:
//! ```bash
//! interceptor-lint check [OPTIONS] [PATH]
//! interceptor-lint list-rules
//! interceptor-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Linter for before/around/after plugin methods in PHP modules
#[derive(Parser)]
#[command(name = "interceptor-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Path to analyze (default: `[analyzer] root` from config, else the
        /// current directory)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude path patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Plugin method names to skip (can be specified multiple times)
        #[arg(long = "exclude-method", value_name = "NAME")]
        exclude_methods: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Graphical report with source snippets.
    Rich,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            exclude_methods,
        } => {
            let target = path.as_deref().unwrap_or_else(|| std::path::Path::new("."));
            let source = config_resolver::resolve(target, cli.config.as_deref());
            let args = commands::check::CheckArgs {
                path,
                format,
                exclude,
                exclude_methods,
            };
            let has_errors = commands::check::run(&args, &source)?;
            if has_errors {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(std::path::Path::new("."), force),
    }
}
