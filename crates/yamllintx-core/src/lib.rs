//! # yamllintx-core
//!
//! Core engine for YAML style linting.
//!
//! This crate provides the foundational pieces shared by every rule:
//!
//! - [`tokenize`] turns YAML source into [`Token`]s carrying their raw
//!   origin text, so spacing can be measured between neighbours
//! - [`Linter`] trait for per-token and per-line rules
//! - [`lint_all`] / [`lint`] drive a rule chain over one document
//! - [`Analyzer`] discovers files on disk and turns findings into
//!   [`Violation`]s
//!
//! ## Example
//!
//! ```
//! use yamllintx_core::{lint_all, LinterBox};
//!
//! let mut rules: Vec<LinterBox> = Vec::new();
//! assert_eq!(lint_all("key: value\n", &mut rules).count(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allowance;
mod analyzer;
mod config;
mod context;
mod driver;
mod lexer;
mod lines;
mod rule;
mod token;
mod types;

pub use allowance::{check_allow, AllowCheck};
pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, ChainFactory};
pub use config::{Config, ConfigError, RuleConfig};
pub use context::{LineContext, TokenContext};
pub use driver::{lint, lint_all, try_for_each_problem, Problems};
pub use lexer::tokenize;
pub use lines::split_lines;
pub use rule::{Chain, Emit, Linter, LinterBox};
pub use token::{leading_spaces, trailing_spaces, Position, Token, TokenType};
pub use types::{
    FlowPair, LintError, LintResult, Location, Problem, ProblemDiagnostic, ProblemKind, Severity,
    Violation,
};
