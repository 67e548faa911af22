//! Builds configured rule instances from names and TOML tables.

use crate::flow_pair::FlowPairOptions;
use crate::presets::Preset;
use crate::{anchors, braces, brackets, comments, hyphens, octal, trailing_spaces};
use crate::{Anchors, Braces, Brackets, Comments, Hyphens, Octal, TrailingSpaces};
use tracing::{debug, warn};
use yamllintx_core::{Chain, Config, LinterBox, RuleConfig};

/// Names of every built-in rule, in chain order.
pub const RULE_NAMES: [&str; 7] = [
    anchors::NAME,
    braces::NAME,
    brackets::NAME,
    comments::NAME,
    hyphens::NAME,
    octal::NAME,
    trailing_spaces::NAME,
];

/// Errors turning configuration into rules.
#[derive(Debug, thiserror::Error)]
pub enum RuleConfigError {
    /// An option has the wrong type or an out-of-range value.
    #[error("rule `{rule}`: option `{option}` must be {expected}")]
    InvalidOption {
        /// Rule name.
        rule: &'static str,
        /// Option key.
        option: &'static str,
        /// Description of the accepted values.
        expected: &'static str,
    },

    /// The preset name is not known.
    #[error("unknown preset `{0}` (expected \"default\", \"relaxed\" or \"none\")")]
    UnknownPreset(String),
}

/// Reads a boolean option.
pub(crate) fn bool_option(
    rule: &'static str,
    config: &RuleConfig,
    option: &'static str,
    default: bool,
) -> Result<bool, RuleConfigError> {
    match config.get(option) {
        None => Ok(default),
        Some(value) => value.as_bool().ok_or(RuleConfigError::InvalidOption {
            rule,
            option,
            expected: "a boolean",
        }),
    }
}

/// Reads a non-negative integer option.
pub(crate) fn usize_option(
    rule: &'static str,
    config: &RuleConfig,
    option: &'static str,
    default: usize,
) -> Result<usize, RuleConfigError> {
    match config.get(option) {
        None => Ok(default),
        Some(value) => value
            .as_integer()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(RuleConfigError::InvalidOption {
                rule,
                option,
                expected: "a non-negative integer",
            }),
    }
}

/// Builds the named rule from its configuration table.
///
/// Returns `Ok(None)` for unknown names.
///
/// # Errors
///
/// Returns an error if an option has the wrong type.
pub fn rule_from_config(
    name: &str,
    config: &RuleConfig,
) -> Result<Option<LinterBox>, RuleConfigError> {
    let rule: LinterBox = match name {
        anchors::NAME => Box::new(
            Anchors::new()
                .forbid_undeclared_aliases(bool_option(
                    anchors::NAME,
                    config,
                    "forbid-undeclared-aliases",
                    true,
                )?)
                .forbid_duplicated_anchors(bool_option(
                    anchors::NAME,
                    config,
                    "forbid-duplicated-anchors",
                    false,
                )?)
                .forbid_unused_anchors(bool_option(
                    anchors::NAME,
                    config,
                    "forbid-unused-anchors",
                    false,
                )?),
        ),
        braces::NAME => Box::new(Braces::with_options(FlowPairOptions::from_config(
            braces::NAME,
            config,
        )?)),
        brackets::NAME => Box::new(Brackets::with_options(FlowPairOptions::from_config(
            brackets::NAME,
            config,
        )?)),
        comments::NAME => Box::new(
            Comments::new()
                .require_starting_space(bool_option(
                    comments::NAME,
                    config,
                    "require-starting-space",
                    true,
                )?)
                .ignore_shebangs(bool_option(comments::NAME, config, "ignore-shebangs", true)?),
        ),
        hyphens::NAME => Box::new(Hyphens::new().max_spaces_after(usize_option(
            hyphens::NAME,
            config,
            "max-spaces-after",
            1,
        )?)),
        octal::NAME => Box::new(
            Octal::new()
                .forbid_implicit(bool_option(
                    octal::NAME,
                    config,
                    "forbid-implicit-octal",
                    true,
                )?)
                .forbid_explicit(bool_option(
                    octal::NAME,
                    config,
                    "forbid-explicit-octal",
                    true,
                )?),
        ),
        trailing_spaces::NAME => Box::new(TrailingSpaces::new()),
        _ => return Ok(None),
    };
    Ok(Some(rule))
}

/// Builds a fresh chain from a configuration.
///
/// The chain holds the preset's rules plus any rule given its own table,
/// minus rules disabled with `enabled = false`, in [`RULE_NAMES`] order.
///
/// # Errors
///
/// Returns an error for an unknown preset or a badly typed option.
pub fn chain_from_config(config: &Config) -> Result<Chain, RuleConfigError> {
    let preset: Preset = config.preset.as_deref().unwrap_or("default").parse()?;

    for name in config.rules.keys() {
        if !RULE_NAMES.contains(&name.as_str()) {
            warn!("Unknown rule: {}", name);
        }
    }

    let default_config = RuleConfig::default();
    let mut chain = Chain::new();
    for name in RULE_NAMES {
        let configured = config.rules.get(name);
        let selected = preset.rule_names().contains(&name) || configured.is_some();
        if !selected || !config.is_rule_enabled(name) {
            debug!("Rule not selected: {}", name);
            continue;
        }
        if let Some(rule) = rule_from_config(name, configured.unwrap_or(&default_config))? {
            chain.push(rule);
        }
    }
    Ok(chain)
}

/// Builds a chain from a comma-separated list of rule names.
///
/// Names are configured from `config` when it has a table for them.
///
/// # Errors
///
/// Returns an error if an option has the wrong type.
pub fn chain_from_names(names: &str, config: &Config) -> Result<Chain, RuleConfigError> {
    let default_config = RuleConfig::default();
    let mut chain = Chain::new();
    for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let rule_config = config.rules.get(name).unwrap_or(&default_config);
        match rule_from_config(name, rule_config)? {
            Some(rule) => chain.push(rule),
            None => warn!("Unknown rule: {}", name),
        }
    }
    Ok(chain)
}
