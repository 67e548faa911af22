//! Read-only views handed to rules.

use crate::token::Token;

/// A token together with its immediate neighbours in the stream.
#[derive(Debug, Clone, Copy)]
pub struct TokenContext<'a> {
    /// Preceding token, absent for the first token.
    pub last: Option<&'a Token>,
    /// Token under inspection.
    pub current: &'a Token,
    /// Following token, absent for the final token.
    pub next: Option<&'a Token>,
}

impl<'a> TokenContext<'a> {
    /// Builds the context for `tokens[index]`, or `None` when out of range.
    #[must_use]
    pub fn at(tokens: &'a [Token], index: usize) -> Option<Self> {
        let current = tokens.get(index)?;
        Some(Self {
            last: index.checked_sub(1).and_then(|i| tokens.get(i)),
            current,
            next: tokens.get(index + 1),
        })
    }

    /// True when this is the last token of the document.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.next.is_none()
    }
}

/// One source line with its 1-indexed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineContext<'a> {
    /// Line text without its terminator.
    pub text: &'a str,
    /// Line number (1-indexed).
    pub line_number: usize,
}

impl<'a> LineContext<'a> {
    /// Creates a line context.
    #[must_use]
    pub fn new(text: &'a str, line_number: usize) -> Self {
        Self { text, line_number }
    }
}
