//! Rule enforcing anchor/alias integrity.
//!
//! # Detected Patterns
//!
//! - Aliases (`*name`) referring to an anchor not declared earlier
//! - Anchors (`&name`) declared twice
//! - Anchors never referenced by an alias
//!
//! # Configuration
//!
//! - `forbid-undeclared-aliases` (default: true)
//! - `forbid-duplicated-anchors` (default: false)
//! - `forbid-unused-anchors` (default: false)
//!
//! The rule tracks anchors across one pass over a document. Use a fresh
//! instance per document unless cross-document tracking is wanted.

use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;
use yamllintx_core::{Emit, LintError, Linter, Position, Problem, TokenContext, TokenType};

/// Rule name for anchors.
pub const NAME: &str = "anchors";

/// Enforces anchor/alias integrity.
#[derive(Debug, Clone)]
pub struct Anchors {
    forbid_undeclared_aliases: bool,
    forbid_duplicated_anchors: bool,
    forbid_unused_anchors: bool,
    /// Anchor name to the position of its latest declaration.
    declared: HashMap<String, Position>,
    used: HashSet<String>,
}

impl Default for Anchors {
    fn default() -> Self {
        Self::new()
    }
}

impl Anchors {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            forbid_undeclared_aliases: true,
            forbid_duplicated_anchors: false,
            forbid_unused_anchors: false,
            declared: HashMap::new(),
            used: HashSet::new(),
        }
    }

    /// Sets whether aliases to undeclared anchors are reported.
    #[must_use]
    pub fn forbid_undeclared_aliases(mut self, forbid: bool) -> Self {
        self.forbid_undeclared_aliases = forbid;
        self
    }

    /// Sets whether anchors declared twice are reported.
    #[must_use]
    pub fn forbid_duplicated_anchors(mut self, forbid: bool) -> Self {
        self.forbid_duplicated_anchors = forbid;
        self
    }

    /// Sets whether anchors without aliases are reported.
    #[must_use]
    pub fn forbid_unused_anchors(mut self, forbid: bool) -> Self {
        self.forbid_unused_anchors = forbid;
        self
    }

    fn check_unused(&self, emit: &mut Emit<'_>) -> ControlFlow<()> {
        let mut unused: Vec<(&String, &Position)> = self
            .declared
            .iter()
            .filter(|(name, _)| !self.used.contains(*name))
            .collect();
        unused.sort_by_key(|(_, position)| (position.line, position.column));

        for (name, position) in unused {
            emit(Problem::at(
                *position,
                LintError::UnusedAnchor { name: name.clone() },
            ))?;
        }
        ControlFlow::Continue(())
    }
}

impl Linter for Anchors {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Reports undeclared aliases, duplicated anchors and unused anchors"
    }

    fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
        let current = ctx.current;

        match (current.kind, ctx.next) {
            (TokenType::Anchor, Some(next)) => {
                let name = next.value.clone();
                if self.forbid_duplicated_anchors && self.declared.contains_key(&name) {
                    emit(Problem::at(
                        current.position,
                        LintError::DuplicatedAnchor { name: name.clone() },
                    ))?;
                }
                self.declared.insert(name, current.position);
            }
            (TokenType::Alias, Some(next)) => {
                let name = next.value.clone();
                if self.forbid_undeclared_aliases && !self.declared.contains_key(&name) {
                    emit(Problem::at(
                        current.position,
                        LintError::UndeclaredAlias { name: name.clone() },
                    ))?;
                }
                self.used.insert(name);
            }
            _ => {}
        }

        if ctx.is_final() && self.forbid_unused_anchors {
            self.check_unused(emit)?;
        }

        ControlFlow::Continue(())
    }
}
