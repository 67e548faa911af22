//! Runs a chain of rules over one document.
//!
//! Findings come out ordered by rule (chain order), then by phase (every
//! line before any token), then by position within the phase, then by the
//! order a single rule emitted them.

use crate::context::{LineContext, TokenContext};
use crate::lexer::tokenize;
use crate::lines::split_lines;
use crate::rule::LinterBox;
use crate::token::Token;
use crate::types::Problem;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::ops::ControlFlow;

/// A tokenized and line-split document.
#[derive(Debug, Clone)]
struct Document<'s> {
    tokens: Vec<Token>,
    lines: Vec<&'s str>,
}

impl<'s> Document<'s> {
    fn parse(source: &'s str) -> Self {
        Self {
            tokens: tokenize(source),
            lines: split_lines(source),
        }
    }

    fn token_context(&self, index: usize) -> Option<TokenContext<'_>> {
        TokenContext::at(&self.tokens, index)
    }

    fn line_context(&self, index: usize) -> Option<LineContext<'s>> {
        self.lines
            .get(index)
            .map(|text| LineContext::new(text, index + 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Lines,
    Tokens,
}

/// Lazy sequence of findings produced by [`lint_all`].
///
/// Rule work happens only while the iterator is advanced. Dropping it early
/// stops all further work; at most the findings of one rule invocation are
/// buffered ahead of the consumer.
pub struct Problems<'r, 's> {
    document: Document<'s>,
    rules: &'r mut [LinterBox],
    rule: usize,
    phase: Phase,
    index: usize,
    buffer: VecDeque<Problem>,
}

impl Iterator for Problems<'_, '_> {
    type Item = Problem;

    fn next(&mut self) -> Option<Problem> {
        loop {
            if let Some(problem) = self.buffer.pop_front() {
                return Some(problem);
            }

            let rule = self.rules.get_mut(self.rule)?;
            let buffer = &mut self.buffer;
            let mut collect = |problem: Problem| {
                buffer.push_back(problem);
                ControlFlow::Continue(())
            };

            match self.phase {
                Phase::Lines => match self.document.line_context(self.index) {
                    Some(ctx) => {
                        self.index += 1;
                        let _ = rule.check_line(&ctx, &mut collect);
                    }
                    None => {
                        self.phase = Phase::Tokens;
                        self.index = 0;
                    }
                },
                Phase::Tokens => match self.document.token_context(self.index) {
                    Some(ctx) => {
                        self.index += 1;
                        let _ = rule.check_token(&ctx, &mut collect);
                    }
                    None => {
                        self.rule += 1;
                        self.phase = Phase::Lines;
                        self.index = 0;
                    }
                },
            }
        }
    }
}

impl FusedIterator for Problems<'_, '_> {}

/// Lints `source` with `rules`, producing findings lazily.
///
/// Rules are borrowed mutably for the lifetime of the iterator; pass a
/// fresh chain per document.
#[must_use]
pub fn lint_all<'r, 's>(source: &'s str, rules: &'r mut [LinterBox]) -> Problems<'r, 's> {
    Problems {
        document: Document::parse(source),
        rules,
        rule: 0,
        phase: Phase::Lines,
        index: 0,
        buffer: VecDeque::new(),
    }
}

/// Pushes every finding to `f` in driver order until `f` breaks.
///
/// Unlike [`lint_all`] this stops inside a rule invocation, so no rule does
/// any work after the consumer has asked to stop.
pub fn try_for_each_problem<F>(source: &str, rules: &mut [LinterBox], mut f: F) -> ControlFlow<()>
where
    F: FnMut(Problem) -> ControlFlow<()>,
{
    let document = Document::parse(source);

    for rule in rules.iter_mut() {
        for index in 0..document.lines.len() {
            if let Some(ctx) = document.line_context(index) {
                rule.check_line(&ctx, &mut f)?;
            }
        }
        for index in 0..document.tokens.len() {
            if let Some(ctx) = document.token_context(index) {
                rule.check_token(&ctx, &mut f)?;
            }
        }
    }

    ControlFlow::Continue(())
}

/// Returns the first finding, if any.
#[must_use]
pub fn lint(source: &str, rules: &mut [LinterBox]) -> Option<Problem> {
    let mut first = None;
    let _ = try_for_each_problem(source, rules, |problem| {
        first = Some(problem);
        ControlFlow::Break(())
    });
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Emit, Linter};
    use crate::token::TokenType;
    use crate::types::LintError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Reports every line and every string token, counting invocations.
    struct Everything {
        calls: Arc<AtomicUsize>,
    }

    impl Linter for Everything {
        fn name(&self) -> &'static str {
            "everything"
        }

        fn check_line(&mut self, ctx: &LineContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            emit(Problem::new(ctx.line_number, 1, LintError::TrailingSpaces))
        }

        fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if ctx.current.kind == TokenType::String {
                emit(Problem::at(ctx.current.position, LintError::ImplicitOctal))?;
                emit(Problem::at(ctx.current.position, LintError::ExplicitOctal))?;
            }
            ControlFlow::Continue(())
        }
    }

    fn everything() -> (LinterBox, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(Everything {
                calls: Arc::clone(&calls),
            }),
            calls,
        )
    }

    fn render(problems: impl Iterator<Item = Problem>) -> String {
        problems
            .map(|p| format!("{}:{} {:?}", p.line, p.column, p.error))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let (rule, _) = everything();
        let mut rules = vec![rule];
        assert_eq!(lint_all("", &mut rules).count(), 0);
        assert_eq!(lint_all("a: b", &mut []).count(), 0);
        assert!(lint("", &mut rules).is_none());
    }

    #[test]
    fn lines_before_tokens_rules_in_order() {
        let (first, _) = everything();
        let (second, _) = everything();
        let mut rules = vec![first, second];

        insta::assert_snapshot!(render(lint_all("a: b\nc", &mut rules)), @r"
        1:1 TrailingSpaces
        2:1 TrailingSpaces
        1:1 ImplicitOctal
        1:1 ExplicitOctal
        1:4 ImplicitOctal
        1:4 ExplicitOctal
        2:1 ImplicitOctal
        2:1 ExplicitOctal
        1:1 TrailingSpaces
        2:1 TrailingSpaces
        1:1 ImplicitOctal
        1:1 ExplicitOctal
        1:4 ImplicitOctal
        1:4 ExplicitOctal
        2:1 ImplicitOctal
        2:1 ExplicitOctal
        ");
    }

    #[test]
    fn lint_is_first_of_lint_all() {
        let source = "key: value\nlist:\n  - a\n";
        let (rule, _) = everything();
        let mut rules = vec![rule];
        let first = lint(source, &mut rules);

        let (rule, _) = everything();
        let mut rules = vec![rule];
        assert_eq!(first, lint_all(source, &mut rules).next());
    }

    #[test]
    fn lint_stops_all_rule_work_after_first_finding() {
        let (first, first_calls) = everything();
        let (second, second_calls) = everything();
        let mut rules = vec![first, second];

        let problem = lint("a\nb\nc\n", &mut rules).expect("finding");
        assert_eq!(problem.line, 1);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn pull_iterator_does_work_on_demand() {
        let (first, first_calls) = everything();
        let (second, second_calls) = everything();
        let mut rules = vec![first, second];

        let mut problems = lint_all("a\nb\nc\n", &mut rules);
        assert_eq!(first_calls.load(Ordering::SeqCst), 0);

        let taken: Vec<_> = problems.by_ref().take(2).collect();
        assert_eq!(taken.len(), 2);
        assert_eq!(first_calls.load(Ordering::SeqCst), 2);
        drop(problems);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn push_variant_breaks_mid_invocation() {
        let (rule, _) = everything();
        let mut rules = vec![rule];
        let mut seen = Vec::new();

        let flow = try_for_each_problem("a", &mut rules, |problem| {
            seen.push(problem.error.clone());
            if problem.error == LintError::ImplicitOctal {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert!(flow.is_break());
        assert_eq!(
            seen,
            vec![LintError::TrailingSpaces, LintError::ImplicitOctal]
        );
    }

    #[test]
    fn iterator_is_fused() {
        let (rule, _) = everything();
        let mut rules = vec![rule];
        let mut problems = lint_all("a", &mut rules);
        assert_eq!(problems.by_ref().count(), 3);
        assert!(problems.next().is_none());
        assert!(problems.next().is_none());
    }
}
