//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use yamllintx_core::{LintResult, ProblemDiagnostic, Severity};

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the directory violation paths are relative to.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => return print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    let mut current: Option<&Path> = None;
    for violation in &result.violations {
        let file = violation.location.file.as_path();
        if current != Some(file) {
            if current.is_some() {
                println!();
            }
            println!("\x1b[4m{}\x1b[0m", file.display());
            current = Some(file);
        }

        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "  {}:{}\t{}\t{} ({})",
            violation.location.line,
            violation.location.column,
            severity_indicator,
            violation.message,
            violation.rule,
        );
    }
    if current.is_some() {
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, root: &Path) -> Result<()> {
    let mut sources: HashMap<PathBuf, String> = HashMap::new();

    for violation in &result.violations {
        let file = &violation.location.file;
        if !sources.contains_key(file) {
            let full = if root.is_file() {
                root.to_path_buf()
            } else {
                root.join(file)
            };
            let content = std::fs::read_to_string(&full)
                .with_context(|| format!("Failed to read {}", full.display()))?;
            sources.insert(file.clone(), content);
        }
        let source = sources.get(file).map_or("", String::as_str);

        let report = miette::Report::new(ProblemDiagnostic::new(violation, source));
        println!("{report:?}");
    }

    let (errors, warnings, infos) = result.count_by_severity();
    println!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors, warnings, infos, result.files_checked
    );
    Ok(())
}
