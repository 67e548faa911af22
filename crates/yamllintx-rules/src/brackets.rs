//! Rule controlling flow sequences (`[ ... ]`).
//!
//! Accepts the same options as [`Braces`](crate::Braces).

use crate::flow_pair::{self, FlowPairOptions};
use std::ops::ControlFlow;
use yamllintx_core::{Emit, FlowPair, Linter, TokenContext};

/// Rule name for brackets.
pub const NAME: &str = "brackets";

/// Controls presence of and spacing inside flow sequences.
#[derive(Debug, Clone, Default)]
pub struct Brackets {
    options: FlowPairOptions,
}

impl Brackets {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule with the given options.
    #[must_use]
    pub fn with_options(options: FlowPairOptions) -> Self {
        Self { options }
    }
}

impl Linter for Brackets {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Controls the use of and spacing inside flow sequences"
    }

    fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
        flow_pair::check(FlowPair::Brackets, &self.options, ctx, emit)
    }
}
