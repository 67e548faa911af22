//! Rule limiting spaces after a sequence entry `-`.
//!
//! # Configuration
//!
//! - `max-spaces-after` (default: 1). Zero disables the check.

use std::ops::ControlFlow;
use yamllintx_core::{
    leading_spaces, trailing_spaces, Emit, LintError, Linter, Problem, TokenContext, TokenType,
};

/// Rule name for hyphens.
pub const NAME: &str = "hyphens";

/// Limits the spaces between a `-` and the entry it introduces.
#[derive(Debug, Clone)]
pub struct Hyphens {
    max_spaces_after: usize,
}

impl Default for Hyphens {
    fn default() -> Self {
        Self::new()
    }
}

impl Hyphens {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_spaces_after: 1,
        }
    }

    /// Sets the maximum number of spaces after `-`.
    #[must_use]
    pub fn max_spaces_after(mut self, max: usize) -> Self {
        self.max_spaces_after = max;
        self
    }
}

impl Linter for Hyphens {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of spaces after a sequence entry hyphen"
    }

    fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
        if self.max_spaces_after == 0 || ctx.current.kind != TokenType::SequenceEntry {
            return ControlFlow::Continue(());
        }
        let Some(next) = ctx.next else {
            return ControlFlow::Continue(());
        };
        let hyphen = ctx.current.position;
        if next.position.line != hyphen.line {
            return ControlFlow::Continue(());
        }

        let spaces = trailing_spaces(&ctx.current.origin) + leading_spaces(&next.origin);
        if spaces > self.max_spaces_after {
            emit(Problem::new(
                next.position.line,
                hyphen.column + 1 + spaces,
                LintError::TooManySpacesAfterHyphen,
            ))?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamllintx_core::{lint_all, LinterBox};

    fn run(rule: Hyphens, source: &str) -> Vec<Problem> {
        let mut rules: Vec<LinterBox> = vec![Box::new(rule)];
        lint_all(source, &mut rules).collect()
    }

    #[test]
    fn single_space_passes() {
        assert!(run(Hyphens::new(), "- a\n- b\n").is_empty());
    }

    #[test]
    fn points_at_first_non_space() {
        assert_eq!(
            run(Hyphens::new(), "list:\n  -   item\n"),
            vec![Problem::new(2, 7, LintError::TooManySpacesAfterHyphen)]
        );
    }

    #[test]
    fn nested_entries() {
        let problems = run(Hyphens::new().max_spaces_after(2), "-  -   x\n");
        assert_eq!(
            problems,
            vec![Problem::new(1, 8, LintError::TooManySpacesAfterHyphen)]
        );
    }

    #[test]
    fn entry_on_next_line_is_ignored() {
        assert!(run(Hyphens::new(), "-\n    key: value\n").is_empty());
    }

    #[test]
    fn zero_disables() {
        assert!(run(Hyphens::new().max_spaces_after(0), "-     a\n").is_empty());
    }
}
