//! Core types for lint findings and results.

use crate::token::{Position, TokenType};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The two flow collection delimiter pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowPair {
    /// `{` / `}` flow mappings.
    Braces,
    /// `[` / `]` flow sequences.
    Brackets,
}

impl FlowPair {
    /// Token type of the opening delimiter.
    #[must_use]
    pub fn start_type(self) -> TokenType {
        match self {
            Self::Braces => TokenType::MappingStart,
            Self::Brackets => TokenType::SequenceStart,
        }
    }

    /// Token type of the closing delimiter.
    #[must_use]
    pub fn end_type(self) -> TokenType {
        match self {
            Self::Braces => TokenType::MappingEnd,
            Self::Brackets => TokenType::SequenceEnd,
        }
    }

    /// Literal opening delimiter.
    #[must_use]
    pub fn open(self) -> &'static str {
        match self {
            Self::Braces => "{",
            Self::Brackets => "[",
        }
    }

    /// Literal closing delimiter.
    #[must_use]
    pub fn close(self) -> &'static str {
        match self {
            Self::Braces => "}",
            Self::Brackets => "]",
        }
    }

    /// Name of the rule that polices this pair.
    #[must_use]
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::Braces => "braces",
            Self::Brackets => "brackets",
        }
    }
}

impl std::fmt::Display for FlowPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rule_name())
    }
}

/// Broad classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    /// Anchor/alias integrity.
    Referential,
    /// Spacing inside flow collections.
    StructuralSpacing,
    /// Presence of flow collections.
    StructuralPresence,
    /// Hyphens, octal literals, comments, trailing whitespace.
    LexicalStyle,
}

/// A style violation. Every variant belongs to the "lint error" category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LintError {
    /// Alias refers to an anchor that has not been declared yet.
    #[error("alias \"{name}\" references an undeclared anchor")]
    UndeclaredAlias {
        /// Referenced anchor name.
        name: String,
    },

    /// Anchor name declared more than once.
    #[error("anchor \"{name}\" is duplicated")]
    DuplicatedAnchor {
        /// Anchor name.
        name: String,
    },

    /// Anchor never referenced by an alias.
    #[error("anchor \"{name}\" is declared but not used")]
    UnusedAnchor {
        /// Anchor name.
        name: String,
    },

    /// Flow collection delimiters are forbidden outright.
    #[error("{0} are forbidden")]
    Forbidden(FlowPair),

    /// Flow collection delimiters are only allowed when empty.
    #[error("non empty {0} are forbidden")]
    NonEmptyForbidden(FlowPair),

    /// Fewer spaces than allowed inside a non-empty pair.
    #[error("too few spaces inside {0}")]
    TooFewSpaces(FlowPair),

    /// More spaces than allowed inside a non-empty pair.
    #[error("too many spaces inside {0}")]
    TooManySpaces(FlowPair),

    /// Fewer spaces than allowed inside an empty pair.
    #[error("too few spaces inside empty {0}")]
    TooFewSpacesEmpty(FlowPair),

    /// More spaces than allowed inside an empty pair.
    #[error("too many spaces inside empty {0}")]
    TooManySpacesEmpty(FlowPair),

    /// Sequence entry followed by too much whitespace.
    #[error("too many spaces after hyphen")]
    TooManySpacesAfterHyphen,

    /// Octal literal written as `0755`.
    #[error("implicit octal literals are forbidden")]
    ImplicitOctal,

    /// Octal literal written as `0o755`.
    #[error("explicit octal literals are forbidden")]
    ExplicitOctal,

    /// Comment text not separated from the `#` marker.
    #[error("comment must start with a space")]
    MissingStartingSpace,

    /// Line ends in spaces.
    #[error("trailing spaces are forbidden")]
    TrailingSpaces,
}

impl LintError {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ProblemKind {
        match self {
            Self::UndeclaredAlias { .. }
            | Self::DuplicatedAnchor { .. }
            | Self::UnusedAnchor { .. } => ProblemKind::Referential,
            Self::Forbidden(_) | Self::NonEmptyForbidden(_) => ProblemKind::StructuralPresence,
            Self::TooFewSpaces(_)
            | Self::TooManySpaces(_)
            | Self::TooFewSpacesEmpty(_)
            | Self::TooManySpacesEmpty(_) => ProblemKind::StructuralSpacing,
            Self::TooManySpacesAfterHyphen
            | Self::ImplicitOctal
            | Self::ExplicitOctal
            | Self::MissingStartingSpace
            | Self::TrailingSpaces => ProblemKind::LexicalStyle,
        }
    }

    /// Name of the rule that reports this error.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        match self {
            Self::UndeclaredAlias { .. }
            | Self::DuplicatedAnchor { .. }
            | Self::UnusedAnchor { .. } => "anchors",
            Self::Forbidden(pair)
            | Self::NonEmptyForbidden(pair)
            | Self::TooFewSpaces(pair)
            | Self::TooManySpaces(pair)
            | Self::TooFewSpacesEmpty(pair)
            | Self::TooManySpacesEmpty(pair) => pair.rule_name(),
            Self::TooManySpacesAfterHyphen => "hyphens",
            Self::ImplicitOctal | Self::ExplicitOctal => "octal",
            Self::MissingStartingSpace => "comments",
            Self::TrailingSpaces => "trailing-spaces",
        }
    }
}

/// One finding: a position and the violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: lint error: {error}")]
pub struct Problem {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// What was violated.
    #[source]
    pub error: LintError,
}

impl Problem {
    /// Creates a new problem.
    #[must_use]
    pub fn new(line: usize, column: usize, error: LintError) -> Self {
        Self {
            line,
            column,
            error,
        }
    }

    /// Creates a problem at a token position.
    #[must_use]
    pub fn at(position: Position, error: LintError) -> Self {
        Self::new(position.line, position.column, error)
    }
}

/// Source location of a violation within a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the lint root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A finding attributed to a file, rule and severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule name (e.g., "trailing-spaces").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Classification of the finding.
    pub kind: ProblemKind,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a violation from a driver finding.
    ///
    /// `source` is used to turn the line/column pair into a one-character
    /// byte span for diagnostic rendering.
    #[must_use]
    pub fn from_problem(
        file: PathBuf,
        problem: &Problem,
        severity: Severity,
        source: &str,
    ) -> Self {
        let offset = offset_for(source, problem.line, problem.column);
        let length = source[offset..].chars().next().map_or(0, char::len_utf8);
        Self {
            rule: problem.error.rule().to_string(),
            severity,
            kind: problem.error.kind(),
            location: Location::new(file, problem.line, problem.column).with_span(offset, length),
            message: problem.error.to_string(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.rule,
            self.message
        )
    }
}

/// Byte offset of a 1-indexed line/column pair, clamped to the source.
fn offset_for(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map_or(text.trim_end_matches(['\n', '\r']).len(), |(idx, _)| idx);
            return line_start + within;
        }
        line_start += text.len();
    }
    source.len()
}

/// A violation rendered through miette with its source context.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ProblemDiagnostic {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{rule}")]
    span: SourceSpan,
    rule: String,
    #[help]
    help: Option<String>,
}

impl ProblemDiagnostic {
    /// Builds a diagnostic for `violation` against the file's contents.
    #[must_use]
    pub fn new(violation: &Violation, source: &str) -> Self {
        Self {
            message: format!("[{}] {}", violation.severity, violation.message),
            source_code: NamedSource::new(
                violation.location.file.display().to_string(),
                source.to_string(),
            ),
            span: SourceSpan::from((violation.location.offset, violation.location.length)),
            rule: violation.rule.clone(),
            help: help_for(&violation.rule),
        }
    }
}

fn help_for(rule: &str) -> Option<String> {
    let text = match rule {
        "anchors" => "declare each anchor once and reference it with an alias",
        "braces" | "brackets" => "adjust the spacing just inside the delimiters",
        "trailing-spaces" => "remove the spaces at the end of the line",
        _ => return None,
    };
    Some(text.to_string())
}

/// Result of running lint analysis over one or more files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, grouped by file in discovery order.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |s: Severity| self.violations.iter().filter(|v| v.severity == s).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Formats violations as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Violation> = self
            .violations
            .iter()
            .filter(|v| v.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== yamllintx: {} violation(s) ===\n",
            failing.len()
        );
        for v in &failing {
            let _ = writeln!(report, "{v}");
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "\nTotal: {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        );

        report
    }
}
