//! Shared presence and spacing checks for `{ }` and `[ ]` pairs.
//!
//! Spacing inside a pair is the number of ASCII spaces between the
//! delimiter and its neighbour on the same line. Neighbours on another line
//! are not measured.

use crate::registry::{usize_option, RuleConfigError};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use yamllintx_core::{
    leading_spaces, trailing_spaces, Emit, FlowPair, LintError, Problem, RuleConfig, Token,
    TokenContext,
};

/// Which flow collections are forbidden outright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Forbid {
    /// Flow collections are allowed.
    #[default]
    None,
    /// Every flow collection is forbidden.
    All,
    /// Only empty flow collections are allowed.
    NonEmpty,
}

/// Configuration shared by the braces and brackets rules.
///
/// Thresholds are inclusive bounds on the number of spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowPairOptions {
    /// Presence restriction.
    pub forbid: Forbid,
    /// Minimum spaces inside a non-empty pair.
    pub min_spaces_inside: usize,
    /// Maximum spaces inside a non-empty pair.
    pub max_spaces_inside: usize,
    /// Minimum spaces inside an empty pair.
    pub min_spaces_inside_empty: usize,
    /// Maximum spaces inside an empty pair.
    pub max_spaces_inside_empty: usize,
}

impl FlowPairOptions {
    /// Creates options with nothing forbidden and every threshold at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the presence restriction.
    #[must_use]
    pub fn forbid(mut self, forbid: Forbid) -> Self {
        self.forbid = forbid;
        self
    }

    /// Sets the bounds for non-empty pairs.
    #[must_use]
    pub fn spaces_inside(mut self, min: usize, max: usize) -> Self {
        self.min_spaces_inside = min;
        self.max_spaces_inside = max;
        self
    }

    /// Sets the bounds for empty pairs.
    #[must_use]
    pub fn spaces_inside_empty(mut self, min: usize, max: usize) -> Self {
        self.min_spaces_inside_empty = min;
        self.max_spaces_inside_empty = max;
        self
    }

    /// Reads options from a rule's configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has the wrong type or is negative.
    pub fn from_config(rule: &'static str, config: &RuleConfig) -> Result<Self, RuleConfigError> {
        let forbid = match config.get("forbid") {
            None => Forbid::None,
            Some(toml::Value::Boolean(true)) => Forbid::All,
            Some(toml::Value::Boolean(false)) => Forbid::None,
            Some(value) => {
                value
                    .clone()
                    .try_into()
                    .map_err(|_| RuleConfigError::InvalidOption {
                        rule,
                        option: "forbid",
                        expected: "one of \"none\", \"all\", \"non-empty\"",
                    })?
            }
        };

        let defaults = Self::default();
        Ok(Self {
            forbid,
            min_spaces_inside: usize_option(
                rule,
                config,
                "min-spaces-inside",
                defaults.min_spaces_inside,
            )?,
            max_spaces_inside: usize_option(
                rule,
                config,
                "max-spaces-inside",
                defaults.max_spaces_inside,
            )?,
            min_spaces_inside_empty: usize_option(
                rule,
                config,
                "min-spaces-inside-empty",
                defaults.min_spaces_inside_empty,
            )?,
            max_spaces_inside_empty: usize_option(
                rule,
                config,
                "max-spaces-inside-empty",
                defaults.max_spaces_inside_empty,
            )?,
        })
    }
}

/// Runs the presence check, then the spacing check, for one token.
pub(crate) fn check(
    pair: FlowPair,
    options: &FlowPairOptions,
    ctx: &TokenContext<'_>,
    emit: &mut Emit<'_>,
) -> ControlFlow<()> {
    let current = ctx.current;
    let is_start = is_start(pair, current);
    let is_end = is_end(pair, current);
    if !is_start && !is_end {
        return ControlFlow::Continue(());
    }

    match options.forbid {
        Forbid::None => {}
        Forbid::All => {
            emit(Problem::at(current.position, LintError::Forbidden(pair)))?;
            return ControlFlow::Continue(());
        }
        Forbid::NonEmpty => {
            let next_end = ctx.next.filter(|next| is_start && is_end_type(pair, next));
            let last_start = ctx.last.filter(|last| is_end && is_start_type(pair, last));

            if let Some(end) = next_end {
                if gap(current, end) > 0 {
                    emit(Problem::at(end.position, LintError::NonEmptyForbidden(pair)))?;
                    return ControlFlow::Continue(());
                }
            } else if let Some(start) = last_start {
                if gap(start, current) > 0 {
                    emit(Problem::at(current.position, LintError::NonEmptyForbidden(pair)))?;
                    return ControlFlow::Continue(());
                }
            } else {
                // Content inside the pair, reported from both delimiters.
                emit(Problem::at(current.position, LintError::NonEmptyForbidden(pair)))?;
                return ControlFlow::Continue(());
            }
        }
    }

    if is_start {
        check_start(pair, options, ctx, emit)
    } else {
        check_end(pair, options, ctx, emit)
    }
}

fn check_start(
    pair: FlowPair,
    options: &FlowPairOptions,
    ctx: &TokenContext<'_>,
    emit: &mut Emit<'_>,
) -> ControlFlow<()> {
    let Some(next) = ctx.next else {
        return ControlFlow::Continue(());
    };
    let current = ctx.current;

    if is_end_type(pair, next) {
        let spaces = gap(current, next);
        if spaces < options.min_spaces_inside_empty {
            emit(Problem::at(next.position, LintError::TooFewSpacesEmpty(pair)))?;
        }
        if spaces > options.max_spaces_inside_empty {
            emit(Problem::at(next.position, LintError::TooManySpacesEmpty(pair)))?;
        }
        return ControlFlow::Continue(());
    }

    if next.position.line != current.position.line {
        return ControlFlow::Continue(());
    }

    let spaces = gap(current, next);
    if spaces < options.min_spaces_inside {
        emit(Problem::at(current.position, LintError::TooFewSpaces(pair)))?;
    }
    if spaces > options.max_spaces_inside {
        emit(Problem::at(current.position, LintError::TooManySpaces(pair)))?;
    }
    ControlFlow::Continue(())
}

fn check_end(
    pair: FlowPair,
    options: &FlowPairOptions,
    ctx: &TokenContext<'_>,
    emit: &mut Emit<'_>,
) -> ControlFlow<()> {
    let Some(last) = ctx.last else {
        return ControlFlow::Continue(());
    };
    let current = ctx.current;

    // Empty pairs were measured from the opening side.
    if is_start_type(pair, last) || last.position.line != current.position.line {
        return ControlFlow::Continue(());
    }

    let spaces = gap(last, current);
    if spaces < options.min_spaces_inside {
        emit(Problem::at(current.position, LintError::TooFewSpaces(pair)))?;
    }
    if spaces > options.max_spaces_inside {
        emit(Problem::at(current.position, LintError::TooManySpaces(pair)))?;
    }
    ControlFlow::Continue(())
}

/// Spaces between two adjacent tokens, wherever the lexer attributed them.
fn gap(left: &Token, right: &Token) -> usize {
    trailing_spaces(&left.origin) + leading_spaces(&right.origin)
}

fn is_start_type(pair: FlowPair, token: &Token) -> bool {
    token.kind == pair.start_type()
}

fn is_end_type(pair: FlowPair, token: &Token) -> bool {
    token.kind == pair.end_type()
}

fn is_start(pair: FlowPair, token: &Token) -> bool {
    is_start_type(pair, token) && token.value == pair.open()
}

fn is_end(pair: FlowPair, token: &Token) -> bool {
    is_end_type(pair, token) && token.value == pair.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbid_parses_from_string_or_bool() {
        let config: RuleConfig =
            toml::from_str("forbid = \"non-empty\"\nmax-spaces-inside = 2").expect("toml");
        let options = FlowPairOptions::from_config("braces", &config).expect("options");
        assert_eq!(options.forbid, Forbid::NonEmpty);
        assert_eq!(options.max_spaces_inside, 2);
        assert_eq!(options.min_spaces_inside_empty, 0);

        let config: RuleConfig = toml::from_str("forbid = true").expect("toml");
        let options = FlowPairOptions::from_config("braces", &config).expect("options");
        assert_eq!(options.forbid, Forbid::All);
    }

    #[test]
    fn rejects_bad_options() {
        let config: RuleConfig = toml::from_str("forbid = \"sometimes\"").expect("toml");
        let err = FlowPairOptions::from_config("brackets", &config).expect_err("invalid");
        assert!(err.to_string().contains("forbid"));

        let config: RuleConfig = toml::from_str("min-spaces-inside = -1").expect("toml");
        assert!(FlowPairOptions::from_config("brackets", &config).is_err());
    }
}
