//! Rule presets for common configurations.

use crate::registry::{RuleConfigError, RULE_NAMES};
use crate::{Anchors, Braces, Brackets, Comments, Hyphens, Octal, TrailingSpaces};
use std::str::FromStr;
use yamllintx_core::Chain;

/// Preset configurations for yamllintx.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Every built-in rule with its default options.
    #[default]
    Default,
    /// Only rules that catch likely mistakes rather than layout taste.
    Relaxed,
    /// No rules; only explicitly configured rules run.
    Off,
}

const RELAXED: [&str; 3] = ["anchors", "octal", "trailing-spaces"];

impl Preset {
    /// Returns the names of the rules in this preset.
    #[must_use]
    pub fn rule_names(self) -> &'static [&'static str] {
        match self {
            Self::Default => &RULE_NAMES,
            Self::Relaxed => &RELAXED,
            Self::Off => &[],
        }
    }

    /// Returns fresh instances of the rules in this preset.
    #[must_use]
    pub fn rules(self) -> Chain {
        match self {
            Self::Default => all_rules(),
            Self::Relaxed => relaxed_rules(),
            Self::Off => Chain::new(),
        }
    }
}

impl FromStr for Preset {
    type Err = RuleConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "relaxed" => Ok(Self::Relaxed),
            "none" => Ok(Self::Off),
            other => Err(RuleConfigError::UnknownPreset(other.to_string())),
        }
    }
}

/// Returns all built-in rules with default options.
#[must_use]
pub fn all_rules() -> Chain {
    vec![
        Box::new(Anchors::new()),
        Box::new(Braces::new()),
        Box::new(Brackets::new()),
        Box::new(Comments::new()),
        Box::new(Hyphens::new()),
        Box::new(Octal::new()),
        Box::new(TrailingSpaces::new()),
    ]
}

/// Returns the relaxed set of rules.
///
/// Includes:
/// - `anchors` - undeclared aliases
/// - `octal` - ambiguous octal literals
/// - `trailing-spaces`
#[must_use]
pub fn relaxed_rules() -> Chain {
    vec![
        Box::new(Anchors::new()),
        Box::new(Octal::new()),
        Box::new(TrailingSpaces::new()),
    ]
}
