//! Rule requiring a space after the `#` of a comment.
//!
//! # Configuration
//!
//! - `require-starting-space` (default: true)
//! - `ignore-shebangs` (default: true): skip a `#!` comment at 1:1

use std::ops::ControlFlow;
use yamllintx_core::{Emit, LintError, Linter, Problem, Severity, TokenContext, TokenType};

/// Rule name for comments.
pub const NAME: &str = "comments";

/// Requires comment text to be separated from its marker.
#[derive(Debug, Clone)]
pub struct Comments {
    require_starting_space: bool,
    ignore_shebangs: bool,
}

impl Default for Comments {
    fn default() -> Self {
        Self::new()
    }
}

impl Comments {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            require_starting_space: true,
            ignore_shebangs: true,
        }
    }

    /// Sets whether a space is required after `#`.
    #[must_use]
    pub fn require_starting_space(mut self, require: bool) -> Self {
        self.require_starting_space = require;
        self
    }

    /// Sets whether a shebang on the first line is exempt.
    #[must_use]
    pub fn ignore_shebangs(mut self, ignore: bool) -> Self {
        self.ignore_shebangs = ignore;
        self
    }
}

impl Linter for Comments {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires a space between the comment marker and its text"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
        let token = ctx.current;
        if !self.require_starting_space || token.kind != TokenType::Comment {
            return ControlFlow::Continue(());
        }

        let position = token.position;
        if self.ignore_shebangs && position.line == 1 && position.column == 1 {
            return ControlFlow::Continue(());
        }
        if token.value.len() < 2 {
            return ControlFlow::Continue(());
        }

        if !token.value.starts_with(' ') {
            emit(Problem::at(position, LintError::MissingStartingSpace))?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamllintx_core::{lint_all, LinterBox};

    fn positions(rule: Comments, source: &str) -> Vec<(usize, usize)> {
        let mut rules: Vec<LinterBox> = vec![Box::new(rule)];
        lint_all(source, &mut rules)
            .map(|p| (p.line, p.column))
            .collect()
    }

    #[test]
    fn spaced_comments_pass() {
        let source = "# heading\nkey: value  # trailing\n";
        assert!(positions(Comments::new(), source).is_empty());
    }

    #[test]
    fn unspaced_comments_fail() {
        let source = "#heading\nkey: value  #trailing\n";
        assert_eq!(positions(Comments::new(), source), vec![(2, 13)]);
        assert_eq!(
            positions(Comments::new().ignore_shebangs(false), source),
            vec![(1, 1), (2, 13)]
        );
    }

    #[test]
    fn shebang_only_at_origin() {
        let source = "#!/usr/bin/env yamllintx\nkey: 1\n  #!not-a-shebang\n";
        assert_eq!(positions(Comments::new(), source), vec![(3, 3)]);
    }

    #[test]
    fn short_comments_are_skipped() {
        assert!(positions(Comments::new().ignore_shebangs(false), "#\n#x\n").is_empty());
    }

    #[test]
    fn disabled() {
        let rule = Comments::new().require_starting_space(false);
        assert!(positions(rule, "#bad\n").is_empty());
    }
}
