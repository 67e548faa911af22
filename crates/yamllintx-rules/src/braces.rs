//! Rule controlling flow mappings (`{ ... }`).
//!
//! # Configuration
//!
//! - `forbid`: `"none"` (default), `"all"` or `"non-empty"`
//! - `min-spaces-inside` / `max-spaces-inside` (default: 0 / 0)
//! - `min-spaces-inside-empty` / `max-spaces-inside-empty` (default: 0 / 0)

use crate::flow_pair::{self, FlowPairOptions};
use std::ops::ControlFlow;
use yamllintx_core::{Emit, FlowPair, Linter, TokenContext};

/// Rule name for braces.
pub const NAME: &str = "braces";

/// Controls presence of and spacing inside flow mappings.
#[derive(Debug, Clone, Default)]
pub struct Braces {
    options: FlowPairOptions,
}

impl Braces {
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

impl Linter for Braces {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Controls the use of and spacing inside flow mappings"
    }

    fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
        flow_pair::check(FlowPair::Braces, &self.options, ctx, emit)
    }
}
