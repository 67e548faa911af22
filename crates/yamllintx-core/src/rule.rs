//! The `Linter` trait implemented by every rule.

use crate::context::{LineContext, TokenContext};
use crate::types::{Problem, Severity};
use std::ops::ControlFlow;

/// Sink for findings.
///
/// Returns [`ControlFlow::Break`] when the consumer wants no further
/// findings. Rules must stop producing as soon as it does, which `?` on the
/// returned value takes care of.
pub type Emit<'e> = dyn FnMut(Problem) -> ControlFlow<()> + 'e;

/// A stateful style rule.
///
/// Rules see each line of a document through [`Linter::check_line`], then
/// each token through [`Linter::check_token`]. A rule that only cares about
/// one of the two leaves the other at its no-op default.
///
/// A rule instance may keep state across tokens of one document. Construct a
/// fresh instance (or chain) for every document.
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
/// use yamllintx_core::{Emit, LintError, Linter, Problem, TokenContext, TokenType};
///
/// struct NoOctal;
///
/// impl Linter for NoOctal {
///     fn name(&self) -> &'static str {
///         "no-octal"
///     }
///
///     fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
///         if ctx.current.kind == TokenType::OctalInteger {
///             emit(Problem::at(ctx.current.position, LintError::ImplicitOctal))?;
///         }
///         ControlFlow::Continue(())
///     }
/// }
/// ```
pub trait Linter: Send {
    /// Returns the kebab-case name of this rule (e.g., "trailing-spaces").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Inspects one token in the context of its neighbours.
    fn check_token(&mut self, _ctx: &TokenContext<'_>, _emit: &mut Emit<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Inspects one line of source text.
    fn check_line(&mut self, _ctx: &LineContext<'_>, _emit: &mut Emit<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Type alias for boxed `Linter` trait objects.
pub type LinterBox = Box<dyn Linter>;

/// An ordered set of rules applied to one document.
pub type Chain = Vec<LinterBox>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::types::LintError;

    struct Silent;

    impl Linter for Silent {
        fn name(&self) -> &'static str {
            "silent"
        }
    }

    #[test]
    fn defaults_are_noops() {
        let mut rule = Silent;
        let tokens = tokenize("a: 1");
        let ctx = TokenContext::at(&tokens, 0).expect("token");
        let mut seen = Vec::new();
        let mut emit = |p: Problem| {
            seen.push(p);
            ControlFlow::Continue(())
        };

        assert!(rule.check_token(&ctx, &mut emit).is_continue());
        assert!(rule
            .check_line(&LineContext::new("a: 1", 1), &mut emit)
            .is_continue());
        assert!(seen.is_empty());
        assert_eq!(rule.default_severity(), Severity::Error);
        assert_eq!(rule.description(), "");
    }

    #[test]
    fn question_mark_propagates_break() {
        fn two(emit: &mut Emit<'_>) -> ControlFlow<()> {
            emit(Problem::new(1, 1, LintError::TrailingSpaces))?;
            emit(Problem::new(2, 1, LintError::TrailingSpaces))?;
            ControlFlow::Continue(())
        }

        let mut count = 0;
        let flow = two(&mut |_| {
            count += 1;
            ControlFlow::Break(())
        });
        assert!(flow.is_break());
        assert_eq!(count, 1);
    }
}
