//! Token model produced by the lexer and consumed by rules.

use serde::{Deserialize, Serialize};

/// Classification of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// `-` introducing a sequence entry.
    SequenceEntry,
    /// `?` introducing an explicit mapping key.
    MappingKey,
    /// `:` separating a key from its value.
    MappingValue,
    /// `{` opening a flow mapping.
    MappingStart,
    /// `}` closing a flow mapping.
    MappingEnd,
    /// `[` opening a flow sequence.
    SequenceStart,
    /// `]` closing a flow sequence.
    SequenceEnd,
    /// `,` separating flow collection entries.
    CollectEntry,
    /// `&` marker; the following token carries the anchor name.
    Anchor,
    /// `*` marker; the following token carries the referenced name.
    Alias,
    /// Node tag such as `!!str` or `!custom`.
    Tag,
    /// `#` comment. The value is the text after the marker.
    Comment,
    /// `%YAML` / `%TAG` directive line.
    Directive,
    /// `---` document start marker.
    DocumentHeader,
    /// `...` document end marker.
    DocumentEnd,
    /// `<<` merge key.
    MergeKey,
    /// `|` or `>` block scalar header, including chomping/indent indicators.
    BlockScalarHeader,
    /// Body of a block scalar, spanning one or more lines.
    BlockScalar,
    /// Plain (unquoted) string scalar.
    String,
    /// Single-quoted scalar.
    SingleQuote,
    /// Double-quoted scalar.
    DoubleQuote,
    /// Decimal integer.
    Integer,
    /// Octal integer, implicit (`0755`) or explicit (`0o755`).
    OctalInteger,
    /// Hexadecimal integer (`0x1F`).
    HexInteger,
    /// Floating point number, including `.inf` and `.nan`.
    Float,
    /// Boolean literal.
    Bool,
    /// Null literal (`~`, `null`).
    Null,
}

impl TokenType {
    /// Whether whitespace following a token of this type is attributed to it.
    ///
    /// Indicators hand their trailing whitespace to the next token instead.
    #[must_use]
    pub fn is_scalar_like(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::SingleQuote
                | Self::DoubleQuote
                | Self::Integer
                | Self::OctalInteger
                | Self::HexInteger
                | Self::Float
                | Self::Bool
                | Self::Null
                | Self::Tag
                | Self::MergeKey
                | Self::BlockScalar
        )
    }
}

/// Source position of a token's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in characters (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the source.
    pub offset: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A classified lexical unit.
///
/// `origin` is the exact source text of the token together with the
/// whitespace attributed to it, so spacing rules can measure gaps between
/// neighbours without re-reading the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token classification.
    pub kind: TokenType,
    /// Decoded literal value (anchor name, comment text, unquoted scalar).
    pub value: String,
    /// Raw source substring including attributed whitespace.
    pub origin: String,
    /// Position of the first character of the token text.
    pub position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        kind: TokenType,
        value: impl Into<String>,
        origin: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            origin: origin.into(),
            position,
        }
    }
}

/// Counts ASCII spaces at the start of `s`. Tabs stop the count.
#[must_use]
pub fn leading_spaces(s: &str) -> usize {
    s.len() - s.trim_start_matches(' ').len()
}

/// Counts ASCII spaces at the end of `s`. Tabs stop the count.
#[must_use]
pub fn trailing_spaces(s: &str) -> usize {
    s.len() - s.trim_end_matches(' ').len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_ascii_spaces() {
        assert_eq!(leading_spaces("  foo"), 2);
        assert_eq!(leading_spaces("\t foo"), 0);
        assert_eq!(trailing_spaces("foo   "), 3);
        assert_eq!(trailing_spaces("foo \t"), 0);
        assert_eq!(leading_spaces(""), 0);
        assert_eq!(trailing_spaces("   "), 3);
    }

    #[test]
    fn indicators_are_not_scalar_like() {
        assert!(TokenType::String.is_scalar_like());
        assert!(TokenType::OctalInteger.is_scalar_like());
        assert!(!TokenType::MappingStart.is_scalar_like());
        assert!(!TokenType::Anchor.is_scalar_like());
        assert!(!TokenType::Comment.is_scalar_like());
    }
}
