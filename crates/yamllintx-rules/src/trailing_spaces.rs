//! Rule forbidding spaces at the end of a line.

use std::ops::ControlFlow;
use yamllintx_core::{Emit, LineContext, LintError, Linter, Problem};

/// Rule name for trailing-spaces.
pub const NAME: &str = "trailing-spaces";

/// Forbids lines ending in ASCII spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSpaces;

impl TrailingSpaces {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Linter for TrailingSpaces {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids spaces at the end of a line"
    }

    fn check_line(&mut self, ctx: &LineContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
        let content = ctx.text.trim_end_matches(' ');
        if content.len() < ctx.text.len() {
            let column = content.chars().count() + 1;
            emit(Problem::new(ctx.line_number, column, LintError::TrailingSpaces))?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamllintx_core::{lint_all, LinterBox};

    fn positions(source: &str) -> Vec<(usize, usize)> {
        let mut rules: Vec<LinterBox> = vec![Box::new(TrailingSpaces)];
        lint_all(source, &mut rules)
            .map(|p| (p.line, p.column))
            .collect()
    }

    #[test]
    fn column_is_first_trailing_space() {
        assert_eq!(positions("foo  "), vec![(1, 4)]);
        assert!(positions("foo").is_empty());
    }

    #[test]
    fn whitespace_only_lines() {
        assert_eq!(positions("a: 1\n   \nb: 2 \n"), vec![(2, 1), (3, 5)]);
    }

    #[test]
    fn tabs_are_not_spaces() {
        assert!(positions("a: 1\t\n").is_empty());
        assert!(positions("a: 1\r\n").is_empty());
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(positions("name: café \n"), vec![(1, 11)]);
    }

    #[test]
    fn every_physical_line_of_a_block_scalar() {
        assert_eq!(positions("text: |\n  one \n  two\n"), vec![(2, 6)]);
    }
}
