//! # yamllintx
//!
//! Style linter for YAML documents.
//!
//! This is the main facade crate that re-exports the engine and the
//! built-in rules.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! yamllintx = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/yaml_style.rs
//! yamllintx::check!();
//! ```
//!
//! This lints every YAML file in the workspace as part of `cargo test`.
//! Configure via `yamllintx.toml`. The macro accepts `preset`, `config`,
//! `fail_on` and `path` overrides:
//!
//! ```rust,ignore
//! yamllintx::check!(preset = "relaxed", path = "deploy");
//! ```
//!
//! ## Suppression Comments
//!
//! A comment on the offending line, or the line above, suppresses a rule:
//!
//! ```yaml
//! # yamllintx: allow(octal) reason="file modes"
//! mode: 0755
//! ```
//!
//! ## Programmatic Usage
//!
//! ```
//! use yamllintx::{lint_all, rules::all_rules};
//!
//! let mut chain = all_rules();
//! let found: Vec<String> = lint_all("key: value \n", &mut chain)
//!     .map(|p| p.to_string())
//!     .collect();
//! assert_eq!(found, ["1:11: lint error: trailing spaces are forbidden"]);
//! ```

#![forbid(unsafe_code)]

pub use yamllintx_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use yamllintx_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::{run_check, run_check_in, CheckOptions};
}

/// Generates a `#[test]` that lints the workspace's YAML files.
///
/// Accepts optional `preset`, `config`, `fail_on` and `path` string
/// arguments. `config` and `path` are relative to the workspace root.
#[macro_export]
macro_rules! check {
    ($($key:ident = $value:literal),* $(,)?) => {
        #[test]
        fn yamllintx_check() {
            #[allow(unused_mut)]
            let mut options = $crate::__internal::CheckOptions::default();
            $( options.$key = Some($value); )*
            $crate::__internal::run_check(&options);
        }
    };
}
