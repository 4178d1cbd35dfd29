//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use interceptor_lint_core::{LintResult, Severity, ViolationDiagnostic};
use miette::GraphicalReportHandler;
use std::fmt::Write as _;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analysis root; violation paths are relative to it and the
/// rich format re-reads files from there to show source snippets.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    print!("{}", render(result, format, root)?);
    Ok(())
}

/// Renders lint results in the specified format.
pub fn render(result: &LintResult, format: OutputFormat, root: &Path) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => render_text(&mut out, result)?,
        OutputFormat::Json => render_json(&mut out, result)?,
        OutputFormat::Compact => render_compact(&mut out, result)?,
        OutputFormat::Rich => {
            render_rich(&mut out, result, root, &GraphicalReportHandler::new())?;
        }
    }
    Ok(out)
}

fn render_text(out: &mut String, result: &LintResult) -> std::fmt::Result {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        )?;
        writeln!(out, "  {}: {}", severity_indicator, violation.message)?;
        writeln!(out)?;
    }

    summary(out, result)
}

fn summary(out: &mut String, result: &LintResult) -> std::fmt::Result {
    let (errors, warnings, infos) = result.count_by_severity();

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    writeln!(
        out,
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    )
}

fn render_json(out: &mut String, result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn render_compact(out: &mut String, result: &LintResult) -> std::fmt::Result {
    for violation in &result.violations {
        writeln!(out, "{violation}")?;
    }
    Ok(())
}

fn render_rich(
    out: &mut String,
    result: &LintResult,
    root: &Path,
    handler: &GraphicalReportHandler,
) -> Result<()> {
    // A single-file root reports paths relative to its directory.
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };

    for violation in &result.violations {
        let path = base.join(&violation.location.file);
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let diagnostic = ViolationDiagnostic::new(violation, source);

        handler
            .render_report(out, &diagnostic)
            .context("Failed to render diagnostic")?;
        writeln!(out)?;
    }

    summary(out, result)?;
    Ok(())
}
