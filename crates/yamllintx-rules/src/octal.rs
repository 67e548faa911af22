//! Rule forbidding octal integer literals.
//!
//! # Configuration
//!
//! - `forbid-implicit-octal` (default: true): `0755`
//! - `forbid-explicit-octal` (default: true): `0o755`

use std::ops::ControlFlow;
use yamllintx_core::{Emit, LintError, Linter, Problem, TokenContext, TokenType};

/// Rule name for octal.
pub const NAME: &str = "octal";

/// Forbids implicit and/or explicit octal literals.
#[derive(Debug, Clone)]
pub struct Octal {
    forbid_implicit: bool,
    forbid_explicit: bool,
}

impl Default for Octal {
    fn default() -> Self {
        Self::new()
    }
}

impl Octal {
    /// Creates a new rule forbidding both forms.
    #[must_use]
    pub fn new() -> Self {
        Self {
            forbid_implicit: true,
            forbid_explicit: true,
        }
    }

    /// Sets whether `0755`-style literals are reported.
    #[must_use]
    pub fn forbid_implicit(mut self, forbid: bool) -> Self {
        self.forbid_implicit = forbid;
        self
    }

    /// Sets whether `0o755`-style literals are reported.
    #[must_use]
    pub fn forbid_explicit(mut self, forbid: bool) -> Self {
        self.forbid_explicit = forbid;
        self
    }
}

impl Linter for Octal {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids implicit and explicit octal integer literals"
    }

    fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
        let token = ctx.current;
        if token.kind != TokenType::OctalInteger {
            return ControlFlow::Continue(());
        }

        let bytes = token.value.as_bytes();
        let [b'0', second, ..] = bytes else {
            return ControlFlow::Continue(());
        };

        let explicit = *second == b'o';
        if self.forbid_implicit && !explicit {
            emit(Problem::at(token.position, LintError::ImplicitOctal))?;
        }
        if self.forbid_explicit && explicit {
            emit(Problem::at(token.position, LintError::ExplicitOctal))?;
        }
        ControlFlow::Continue(())
    }
}
