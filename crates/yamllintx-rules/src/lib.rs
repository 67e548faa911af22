//! # yamllintx-rules
//!
//! Built-in style rules for yamllintx.
//!
//! ## Available Rules
//!
//! | Name | Description |
//! |------|-------------|
//! | `anchors` | Undeclared aliases, duplicated and unused anchors |
//! | `braces` | Presence of and spacing inside `{ }` |
//! | `brackets` | Presence of and spacing inside `[ ]` |
//! | `comments` | Space after the `#` marker |
//! | `hyphens` | Spaces after a sequence entry `-` |
//! | `octal` | Implicit (`0755`) and explicit (`0o755`) octal literals |
//! | `trailing-spaces` | Spaces at the end of a line |
//!
//! ## Usage
//!
//! ```
//! use yamllintx_core::{lint, LinterBox};
//! use yamllintx_rules::{Anchors, TrailingSpaces};
//!
//! let mut rules: Vec<LinterBox> = vec![
//!     Box::new(Anchors::new().forbid_unused_anchors(true)),
//!     Box::new(TrailingSpaces::new()),
//! ];
//! let problem = lint("base: &base 1\n", &mut rules).expect("unused anchor");
//! assert_eq!(problem.to_string(), "1:7: lint error: anchor \"base\" is declared but not used");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anchors;
mod braces;
mod brackets;
mod comments;
mod flow_pair;
mod hyphens;
mod octal;
mod presets;
mod registry;
mod trailing_spaces;

pub use anchors::Anchors;
pub use braces::Braces;
pub use brackets::Brackets;
pub use comments::Comments;
pub use flow_pair::{FlowPairOptions, Forbid};
pub use hyphens::Hyphens;
pub use octal::Octal;
pub use presets::{all_rules, relaxed_rules, Preset};
pub use registry::{
    chain_from_config, chain_from_names, rule_from_config, RuleConfigError, RULE_NAMES,
};
pub use trailing_spaces::TrailingSpaces;

/// Re-export core types for convenience.
pub use yamllintx_core::{Linter, Problem, Severity};
