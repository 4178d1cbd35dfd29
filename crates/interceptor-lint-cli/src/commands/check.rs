//! Check command implementation.

use anyhow::{Context, Result};
use interceptor_lint_core::{Analyzer, Config};
use interceptor_lint_php::PhpExtractor;
use interceptor_lint_rules::{plugin_method, rules_from_config};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of the `check` subcommand.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Directory or file to analyze; `None` defers to `[analyzer] root`.
    pub path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Extra path exclusion globs.
    pub exclude: Vec<String>,
    /// Extra plugin method names to skip.
    pub exclude_methods: Vec<String>,
}

/// Runs the check command.
///
/// Returns `true` when at least one error-level violation was found.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<bool> {
    let mut config = load_config(source)?;
    add_method_exclusions(&mut config, &args.exclude_methods);

    let mut builder = Analyzer::builder().extractor(PhpExtractor::new());

    if let Some(path) = &args.path {
        builder = builder.root(path);
    }

    for pattern in &args.exclude {
        builder = builder.exclude(pattern.clone());
    }

    for rule in rules_from_config(&config) {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, args.format, analyzer.root())?;

    Ok(result.has_errors())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };

    if source.is_global() {
        tracing::info!("Using global config: {}", p.display());
    }

    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

/// Appends `--exclude-method` names to `[rules.plugin-method] exclude`.
fn add_method_exclusions(config: &mut Config, names: &[String]) {
    if names.is_empty() {
        return;
    }

    let rule = config
        .rules
        .entry(plugin_method::NAME.to_string())
        .or_default();
    let mut exclude = rule.get_str_array("exclude");
    exclude.extend(names.iter().cloned());

    rule.options.insert(
        "exclude".to_string(),
        toml::Value::Array(exclude.into_iter().map(toml::Value::String).collect()),
    );
}
