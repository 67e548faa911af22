//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! # yamllintx: allow(trailing-spaces, braces) reason="generated file"
//! ```
//!
//! A directive covers findings on its own line and on the line below it.

use std::collections::HashSet;

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

/// Checks whether `rule_name` is allowed at `line` (1-indexed).
#[must_use]
pub fn check_allow(lines: &[&str], line: usize, rule_name: &str) -> AllowCheck {
    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 {
            continue;
        }
        let Some(text) = lines.get(check_line - 1) else {
            continue;
        };
        if let Some(directive) = parse_allow_directive(text) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive out of a line's comment, if any.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let hash = line.find("# yamllintx:").or_else(|| line.find("#yamllintx:"))?;
    let comment = line[hash + 1..].trim_start();
    let directive = comment.strip_prefix("yamllintx:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rules_and_reason() {
        let directive =
            parse_allow_directive("# yamllintx: allow(braces, octal) reason=\"legacy mode\"")
                .expect("directive");
        assert!(directive.rules.contains("braces"));
        assert!(directive.rules.contains("octal"));
        assert_eq!(directive.reason.as_deref(), Some("legacy mode"));
    }

    #[test]
    fn trailing_directive_after_content() {
        let directive = parse_allow_directive("mode: 0755  # yamllintx: allow(octal)")
            .expect("directive");
        assert!(directive.rules.contains("octal"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn rejects_non_directives() {
        assert!(parse_allow_directive("# just a comment").is_none());
        assert!(parse_allow_directive("# yamllintx: allow()").is_none());
        assert!(parse_allow_directive("# yamllintx: deny(octal)").is_none());
    }

    #[test]
    fn covers_own_line_and_next() {
        let lines = ["# yamllintx: allow(octal)", "mode: 0755", "other: 0644"];
        assert!(check_allow(&lines, 1, "octal").is_allowed());
        assert!(check_allow(&lines, 2, "octal").is_allowed());
        assert!(!check_allow(&lines, 3, "octal").is_allowed());
        assert!(!check_allow(&lines, 2, "braces").is_allowed());
    }

    #[test]
    fn allow_all() {
        let lines = ["key: value   # yamllintx: allow(all) reason=\"fixture\""];
        let check = check_allow(&lines, 1, "trailing-spaces");
        assert_eq!(check.reason(), Some("fixture"));
        assert_eq!(check_allow(&lines, 5, "anchors"), AllowCheck::Denied);
    }
}
