//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `yamllintx::check!()`.

use std::path::{Path, PathBuf};
use yamllintx_core::{Analyzer, Config, Severity};
use yamllintx_rules::{chain_from_config, Preset};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["yamllintx.toml", ".yamllintx.toml"];

/// Arguments accepted by `check!()`.
#[derive(Debug, Default, Clone)]
pub struct CheckOptions {
    /// Preset overriding the config file's.
    pub preset: Option<&'static str>,
    /// Config path relative to the workspace root.
    pub config: Option<&'static str>,
    /// Failure threshold overriding the config file's.
    pub fail_on: Option<&'static str>,
    /// Lint root relative to the workspace root.
    pub path: Option<&'static str>,
}

/// Runs yamllintx over the current workspace as part of `cargo test`.
///
/// # Panics
///
/// Panics with a formatted report if violations at or above the failure
/// threshold are found, or if the configuration is invalid.
pub fn run_check(options: &CheckOptions) {
    run_check_in(&find_project_root(), options);
}

/// Same as [`run_check`] with an explicit project root.
///
/// # Panics
///
/// See [`run_check`].
pub fn run_check_in(root: &Path, options: &CheckOptions) {
    let content = read_config_content(root, options.config);
    let mut config = parse_config(&content);

    if let Some(preset) = options.preset {
        config.preset = Some(resolve_preset(preset).to_string());
    }
    let fail_on = resolve_fail_on(options.fail_on, &config);

    // Surfaces option errors before any file is read.
    if let Err(e) = chain_from_config(&config) {
        panic!("yamllintx: invalid rule configuration: {e}");
    }

    let lint_root = options.path.map_or_else(|| root.to_path_buf(), |p| root.join(p));
    let chain_config = config.clone();
    let analyzer = Analyzer::builder()
        .root(lint_root)
        .config(config)
        .chain(move || chain_from_config(&chain_config).unwrap_or_default())
        .build()
        .unwrap_or_else(|e| {
            panic!("yamllintx: failed to build analyzer: {e}");
        });

    let result = analyzer.analyze().unwrap_or_else(|e| {
        panic!("yamllintx: analysis failed: {e}");
    });

    if result.has_violations_at(fail_on) {
        let report = result.format_test_report(fail_on);
        panic!("{report}");
    }
}

/// Reads the raw TOML content from the config file.
///
/// Returns an empty string if no config file is found.
fn read_config_content(root: &Path, explicit_path: Option<&str>) -> String {
    if let Some(path) = explicit_path {
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            root.join(path)
        };
        return std::fs::read_to_string(&full_path).unwrap_or_else(|e| {
            panic!(
                "yamllintx: failed to read config from {}: {e}",
                full_path.display()
            );
        });
    }

    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            return std::fs::read_to_string(&path).unwrap_or_else(|e| {
                panic!(
                    "yamllintx: failed to read config from {}: {e}",
                    path.display()
                );
            });
        }
    }

    String::new()
}

fn parse_config(content: &str) -> Config {
    if content.is_empty() {
        return Config::default();
    }
    Config::parse(content).unwrap_or_else(|e| {
        panic!("yamllintx: failed to parse config: {e}");
    })
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root, walking up from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        return manifest_path;
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Validates a preset name given to the macro.
fn resolve_preset(name: &str) -> &str {
    match name.parse::<Preset>() {
        Ok(_) => name,
        Err(_) => {
            panic!("yamllintx: unknown preset `{name}`. Valid presets: default, relaxed, none")
        }
    }
}

/// Resolves the effective failure threshold.
///
/// Priority: explicit macro arg > config file > default ("error").
fn resolve_fail_on(macro_arg: Option<&str>, config: &Config) -> Severity {
    match macro_arg {
        None => config.fail_threshold(),
        Some("error") => Severity::Error,
        Some("warning") => Severity::Warning,
        Some("info") => Severity::Info,
        Some(other) => {
            panic!("yamllintx: unknown severity `{other}`. Valid values: error, warning, info")
        }
    }
}
