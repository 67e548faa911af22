//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use yamllintx_core::{Analyzer, Chain, Config};
use yamllintx_rules::{chain_from_config, chain_from_names, RuleConfigError};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `false` when a violation reaches the configured `fail-on`
/// severity.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = load_config(source)?;
    let fail_on = config.fail_threshold();

    // Surface option errors once, before any file is read.
    build_chain(rules_filter.as_deref(), &config)
        .context("Invalid rule configuration")?;

    let chain_config = config.clone();
    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(exclude)
        .chain(move || {
            build_chain(rules_filter.as_deref(), &chain_config).unwrap_or_default()
        })
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Linting {} with rules: {}",
        path.display(),
        analyzer.rule_names().join(", ")
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    Ok(!result.has_violations_at(fail_on))
}

/// Builds the `--rules` subset when given, the configured chain otherwise.
fn build_chain(names: Option<&str>, config: &Config) -> Result<Chain, RuleConfigError> {
    match names {
        Some(names) => chain_from_names(names, config),
        None => chain_from_config(config),
    }
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}
