//! Tolerant single-pass YAML lexer.
//!
//! This is not a YAML parser. It produces a flat token stream that is good
//! enough for style rules: every indicator, scalar and comment becomes a
//! [`Token`] carrying its raw `origin` text and position. Malformed input
//! never fails; unknown constructs degrade to plain [`TokenType::String`]
//! tokens.
//!
//! ## Whitespace attribution
//!
//! - Whitespace between two tokens on one line goes to the preceding token
//!   when that token is scalar-like, otherwise to the following token.
//! - Whitespace at the end of a line goes to the last token on that line.
//! - Indentation at the start of a line belongs to no token.
//!
//! So in `{ a: 1   }` the `1` has origin `" 1   "` and in `{   }` the
//! closing brace has origin `"   }"`.

use crate::token::{Position, Token, TokenType};

/// Tokenizes `src` into a vector of tokens in source order.
#[must_use]
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).run()
}

/// Start of a token being scanned.
#[derive(Debug, Clone, Copy)]
struct Mark {
    origin_start: usize,
    start: usize,
    position: Position,
}

struct Lexer<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    line_indent: usize,
    flow_depth: usize,
    /// Whitespace seen after the last token but not yet attributed.
    pending_ws: Option<usize>,
    /// Index of the first token emitted on the current line.
    line_first_token: usize,
    /// Indentation of the line holding a block scalar header whose body
    /// starts on the next line.
    block_scalar_parent: Option<usize>,
    tokens: Vec<Token>,
}

impl<'s> Lexer<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
            line_indent: 0,
            flow_depth: 0,
            pending_ws: None,
            line_first_token: 0,
            block_scalar_parent: None,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            self.scan_line();
        }
        self.tokens
    }

    fn scan_line(&mut self) {
        self.line_first_token = self.tokens.len();
        self.pending_ws = None;

        if let Some(parent) = self.block_scalar_parent.take() {
            self.scan_block_body(parent);
        }

        if self.pos == self.line_start {
            while matches!(self.peek(), Some(b' ' | b'\t')) {
                self.pos += 1;
            }
            self.line_indent = self.pos - self.line_start;
        }

        while let Some(b) = self.peek() {
            match b {
                b'\n' => {
                    self.finish_line();
                    self.advance_to(self.pos + 1);
                    return;
                }
                b'\r' if self.bytes.get(self.pos + 1) == Some(&b'\n') => {
                    self.finish_line();
                    self.advance_to(self.pos + 2);
                    return;
                }
                b' ' | b'\t' => {
                    self.pending_ws.get_or_insert(self.pos);
                    self.pos += 1;
                }
                _ => self.scan_token(),
            }
        }

        self.finish_line();
    }

    /// Hands end-of-line whitespace to the last token on the line.
    fn finish_line(&mut self) {
        let Some(ws) = self.pending_ws.take() else {
            return;
        };
        if self.tokens.len() > self.line_first_token {
            if let Some(last) = self.tokens.last_mut() {
                last.origin.push_str(&self.src[ws..self.pos]);
            }
        }
    }

    fn scan_token(&mut self) {
        let start = self.pos;
        let mark = self.mark(start);
        let b = self.bytes[start];
        let next = self.bytes.get(start + 1).copied();
        let in_flow = self.flow_depth > 0;

        if start == self.line_start {
            if self.src[start..].starts_with("---") && self.followed_by_ws(start + 3) {
                self.flow_depth = 0;
                self.emit(TokenType::DocumentHeader, "---", mark, start + 3);
                return;
            }
            if self.src[start..].starts_with("...") && self.followed_by_ws(start + 3) {
                self.flow_depth = 0;
                self.emit(TokenType::DocumentEnd, "...", mark, start + 3);
                return;
            }
            if b == b'%' {
                let end = self.line_end(start);
                let text = self.src[start..end].to_string();
                self.emit(TokenType::Directive, text, mark, end);
                return;
            }
        }

        match b {
            b'#' if self.comment_allowed(start) => self.scan_comment(mark),
            b'-' if self.followed_by_ws(start + 1) => {
                self.emit(TokenType::SequenceEntry, "-", mark, start + 1);
            }
            b'?' if self.followed_by_ws(start + 1) => {
                self.emit(TokenType::MappingKey, "?", mark, start + 1);
            }
            b':' if self.followed_by_ws(start + 1) || (in_flow && is_flow_indicator(next)) => {
                self.emit(TokenType::MappingValue, ":", mark, start + 1);
            }
            b'{' => {
                self.flow_depth += 1;
                self.emit(TokenType::MappingStart, "{", mark, start + 1);
            }
            b'}' => {
                self.flow_depth = self.flow_depth.saturating_sub(1);
                self.emit(TokenType::MappingEnd, "}", mark, start + 1);
            }
            b'[' => {
                self.flow_depth += 1;
                self.emit(TokenType::SequenceStart, "[", mark, start + 1);
            }
            b']' => {
                self.flow_depth = self.flow_depth.saturating_sub(1);
                self.emit(TokenType::SequenceEnd, "]", mark, start + 1);
            }
            b',' if in_flow => self.emit(TokenType::CollectEntry, ",", mark, start + 1),
            b'&' => self.scan_node_property(TokenType::Anchor, "&", mark),
            b'*' => self.scan_node_property(TokenType::Alias, "*", mark),
            b'!' => self.scan_tag(mark),
            b'|' | b'>' if !in_flow && self.block_header_end(start).is_some() => {
                self.scan_block_header(mark);
            }
            b'\'' => self.scan_single_quoted(mark),
            b'"' => self.scan_double_quoted(mark),
            _ => self.scan_plain(mark),
        }
    }

    fn scan_comment(&mut self, mark: Mark) {
        let end = self.line_end(mark.start);
        let value = self.src[mark.start + 1..end].to_string();
        self.emit(TokenType::Comment, value, mark, end);
    }

    /// Scans an anchor or alias marker followed by its name.
    fn scan_node_property(&mut self, kind: TokenType, marker: &str, mark: Mark) {
        let name_start = mark.start + 1;
        self.emit(kind, marker, mark, name_start);

        let mut end = name_start;
        while let Some(&c) = self.bytes.get(end) {
            if is_ws_or_eol(c) || is_flow_indicator(Some(c)) {
                break;
            }
            end += 1;
        }
        if end > name_start {
            let name_mark = self.mark(name_start);
            let name = self.src[name_start..end].to_string();
            self.emit(TokenType::String, name, name_mark, end);
        }
    }

    fn scan_tag(&mut self, mark: Mark) {
        let in_flow = self.flow_depth > 0;
        let mut end = mark.start + 1;
        while let Some(&c) = self.bytes.get(end) {
            if is_ws_or_eol(c) || (in_flow && is_flow_indicator(Some(c))) {
                break;
            }
            end += 1;
        }
        let text = self.src[mark.start..end].to_string();
        self.emit(TokenType::Tag, text, mark, end);
    }

    /// Returns the end of a `|`/`>` header if one starts at `start`.
    fn block_header_end(&self, start: usize) -> Option<usize> {
        let mut end = start + 1;
        while let Some(&c) = self.bytes.get(end) {
            if c.is_ascii_digit() || c == b'+' || c == b'-' {
                end += 1;
            } else {
                break;
            }
        }
        self.followed_by_ws(end).then_some(end)
    }

    fn scan_block_header(&mut self, mark: Mark) {
        let Some(end) = self.block_header_end(mark.start) else {
            return self.scan_plain(mark);
        };
        let text = self.src[mark.start..end].to_string();
        self.emit(TokenType::BlockScalarHeader, text, mark, end);
        self.block_scalar_parent = Some(self.line_indent);
    }

    /// Consumes the lines of a block scalar body as one token.
    ///
    /// The body runs until the first non-blank line indented at or below
    /// `parent`. Trailing blank lines are left to the caller.
    fn scan_block_body(&mut self, parent: usize) {
        let mut cursor = self.pos;
        let mut first: Option<(usize, usize)> = None;
        let mut end = self.pos;
        let mut lines = Vec::new();

        while cursor < self.bytes.len() {
            let line_end = self.line_end(cursor);
            let text = &self.src[cursor..line_end];
            let indent = text.len() - text.trim_start_matches([' ', '\t']).len();

            if !text.trim().is_empty() {
                if indent <= parent {
                    break;
                }
                first.get_or_insert((cursor, cursor + indent));
                end = line_end;
            }
            lines.push(text);

            cursor = match self.bytes.get(line_end) {
                Some(b'\r') => line_end + 2,
                Some(_) => line_end + 1,
                None => line_end,
            };
        }

        let Some((first_line_start, text_start)) = first else {
            return;
        };

        let min_indent = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
            .min()
            .unwrap_or(0);
        let body = &self.src[first_line_start..end];
        let value = body
            .lines()
            .map(|l| l.get(min_indent..).unwrap_or("").trim_end_matches('\r'))
            .collect::<Vec<_>>()
            .join("\n");

        self.advance_to(text_start);
        let mark = Mark {
            origin_start: first_line_start,
            start: text_start,
            position: self.position_at(text_start),
        };
        self.advance_to(end);
        self.emit(TokenType::BlockScalar, value, mark, end);
    }

    fn scan_single_quoted(&mut self, mark: Mark) {
        let mut value = String::new();
        let mut i = mark.start + 1;
        while i < self.bytes.len() {
            if self.bytes[i] == b'\'' {
                if self.bytes.get(i + 1) == Some(&b'\'') {
                    value.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                break;
            }
            let ch = self.char_at(i);
            value.push(ch);
            i += ch.len_utf8();
        }
        self.advance_to(i);
        self.emit(TokenType::SingleQuote, value, mark, i);
    }

    fn scan_double_quoted(&mut self, mark: Mark) {
        let mut value = String::new();
        let mut i = mark.start + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'"' => {
                    i += 1;
                    break;
                }
                b'\\' if i + 1 < self.bytes.len() => {
                    let escaped = self.char_at(i + 1);
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        '0' => value.push('\0'),
                        '"' | '\\' | '/' => value.push(escaped),
                        other => {
                            value.push('\\');
                            value.push(other);
                        }
                    }
                    i += 1 + escaped.len_utf8();
                }
                _ => {
                    let ch = self.char_at(i);
                    value.push(ch);
                    i += ch.len_utf8();
                }
            }
        }
        self.advance_to(i);
        self.emit(TokenType::DoubleQuote, value, mark, i);
    }

    fn scan_plain(&mut self, mark: Mark) {
        let in_flow = self.flow_depth > 0;
        let mut i = mark.start;
        while let Some(&c) = self.bytes.get(i) {
            let stop = match c {
                b'\n' => true,
                b'\r' => self.bytes.get(i + 1) == Some(&b'\n'),
                b':' => {
                    self.followed_by_ws(i + 1)
                        || (in_flow && is_flow_indicator(self.bytes.get(i + 1).copied()))
                }
                b'#' => i > mark.start && matches!(self.bytes[i - 1], b' ' | b'\t'),
                b',' | b'[' | b']' | b'{' | b'}' => in_flow,
                _ => false,
            };
            if stop {
                break;
            }
            i += 1;
        }

        let text = self.src[mark.start..i].trim_end_matches([' ', '\t']);
        let mut end = mark.start + text.len();
        if end == mark.start {
            end += self.char_at(mark.start).len_utf8();
        }
        let text = self.src[mark.start..end].to_string();
        let kind = classify_plain(&text);
        self.pos = end;
        self.emit(kind, text, mark, end);
    }

    /// Records a token start and settles any pending whitespace before it.
    fn mark(&mut self, start: usize) -> Mark {
        let mut origin_start = start;
        if let Some(ws) = self.pending_ws.take() {
            let on_line = self.tokens.len() > self.line_first_token;
            match self.tokens.last_mut() {
                Some(prev) if on_line && prev.kind.is_scalar_like() => {
                    prev.origin.push_str(&self.src[ws..start]);
                }
                _ => origin_start = ws,
            }
        }
        Mark {
            origin_start,
            start,
            position: self.position_at(start),
        }
    }

    fn emit(&mut self, kind: TokenType, value: impl Into<String>, mark: Mark, end: usize) {
        if self.pos < end {
            self.advance_to(end);
        }
        self.tokens.push(Token::new(
            kind,
            value,
            &self.src[mark.origin_start..end],
            mark.position,
        ));
    }

    /// Moves to `target`, keeping line bookkeeping in sync.
    fn advance_to(&mut self, target: usize) {
        let target = target.min(self.bytes.len());
        for i in self.pos..target {
            if self.bytes[i] == b'\n' {
                self.line += 1;
                self.line_start = i + 1;
                self.line_first_token = self.tokens.len();
            }
        }
        self.pos = target;
    }

    fn position_at(&self, offset: usize) -> Position {
        let column = self.src[self.line_start..offset].chars().count() + 1;
        Position::new(self.line, column, offset)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn char_at(&self, i: usize) -> char {
        self.src[i..].chars().next().unwrap_or(' ')
    }

    /// End of the line containing `from`, excluding `\n` and `\r\n`.
    fn line_end(&self, from: usize) -> usize {
        let end = self.bytes[from..]
            .iter()
            .position(|&c| c == b'\n')
            .map_or(self.bytes.len(), |p| from + p);
        if end > from && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        }
    }

    fn followed_by_ws(&self, i: usize) -> bool {
        self.bytes.get(i).map_or(true, |&c| is_ws_or_eol(c))
    }

    fn comment_allowed(&self, start: usize) -> bool {
        start == self.line_start || matches!(self.bytes[start - 1], b' ' | b'\t')
    }
}

fn is_ws_or_eol(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_flow_indicator(c: Option<u8>) -> bool {
    matches!(c, Some(b',' | b'[' | b']' | b'{' | b'}'))
}

/// Classifies a trimmed plain scalar.
fn classify_plain(text: &str) -> TokenType {
    match text {
        "~" | "null" | "Null" | "NULL" => return TokenType::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => return TokenType::Bool,
        ".inf" | ".Inf" | ".INF" | "-.inf" | "+.inf" | ".nan" | ".NaN" | ".NAN" => {
            return TokenType::Float
        }
        "<<" => return TokenType::MergeKey,
        _ => {}
    }

    if is_octal(text) {
        return TokenType::OctalInteger;
    }
    if let Some(hex) = text.strip_prefix("0x") {
        if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return TokenType::HexInteger;
        }
    }

    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    if !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit()) {
        return TokenType::Integer;
    }
    if unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && unsigned.contains(['.', 'e', 'E'])
        && text.parse::<f64>().is_ok()
    {
        return TokenType::Float;
    }

    TokenType::String
}

/// `0o17` (explicit) or `017` (implicit).
fn is_octal(text: &str) -> bool {
    let digits = if let Some(rest) = text.strip_prefix("0o") {
        rest
    } else if text.len() >= 2 && text.starts_with('0') {
        &text[1..]
    } else {
        return false;
    };
    !digits.is_empty() && digits.chars().all(|c| ('0'..='7').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenType> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    fn find(tokens: &[Token], kind: TokenType) -> &Token {
        tokens
            .iter()
            .find(|t| t.kind == kind)
            .unwrap_or_else(|| panic!("no {kind:?} token"))
    }

    #[test]
    fn block_mapping() {
        assert_eq!(
            kinds("key: value\n"),
            vec![TokenType::String, TokenType::MappingValue, TokenType::String]
        );
    }

    #[test]
    fn flow_mapping_origins_carry_spacing() {
        let tokens = tokenize("object: { key1: 4, key2: 8   }");
        let open = find(&tokens, TokenType::MappingStart);
        assert_eq!(open.origin, " {");
        assert_eq!(open.position, Position::new(1, 9, 8));

        let key1 = &tokens[3];
        assert_eq!(key1.value, "key1");
        assert_eq!(key1.origin, " key1");

        let eight = tokens
            .iter()
            .find(|t| t.value == "8")
            .expect("scalar 8");
        assert_eq!(eight.kind, TokenType::Integer);
        assert_eq!(eight.origin, " 8   ");

        let close = find(&tokens, TokenType::MappingEnd);
        assert_eq!(close.origin, "}");
        assert_eq!(close.position.column, 30);
    }

    #[test]
    fn empty_flow_pair_keeps_inner_spaces_on_end_token() {
        let tokens = tokenize("object: {   }");
        let close = find(&tokens, TokenType::MappingEnd);
        assert_eq!(close.origin, "   }");
        assert_eq!(close.position.column, 13);
    }

    #[test]
    fn anchors_and_aliases_are_split_from_names() {
        let tokens = tokenize("- &a\n  foo: bar\n- *a");
        let anchor_idx = tokens
            .iter()
            .position(|t| t.kind == TokenType::Anchor)
            .expect("anchor");
        assert_eq!(tokens[anchor_idx].position, Position::new(1, 3, 2));
        assert_eq!(tokens[anchor_idx + 1].value, "a");

        let alias_idx = tokens
            .iter()
            .position(|t| t.kind == TokenType::Alias)
            .expect("alias");
        assert_eq!(tokens[alias_idx].position.line, 3);
        assert_eq!(tokens[alias_idx + 1].value, "a");
    }

    #[test]
    fn hyphen_hands_spaces_to_following_token() {
        let tokens = tokenize("-   item");
        assert_eq!(tokens[0].kind, TokenType::SequenceEntry);
        assert_eq!(tokens[1].origin, "   item");
        assert_eq!(tokens[1].position.column, 5);
    }

    #[test]
    fn indentation_is_not_part_of_origin() {
        let tokens = tokenize("a:\n  - x");
        let entry = find(&tokens, TokenType::SequenceEntry);
        assert_eq!(entry.origin, "-");
        assert_eq!(entry.position, Position::new(2, 3, 5));
    }

    #[test]
    fn classifies_numbers() {
        assert_eq!(classify_plain("0755"), TokenType::OctalInteger);
        assert_eq!(classify_plain("0o755"), TokenType::OctalInteger);
        assert_eq!(classify_plain("0"), TokenType::Integer);
        assert_eq!(classify_plain("0789"), TokenType::Integer);
        assert_eq!(classify_plain("-12"), TokenType::Integer);
        assert_eq!(classify_plain("0x1F"), TokenType::HexInteger);
        assert_eq!(classify_plain("1.5"), TokenType::Float);
        assert_eq!(classify_plain("1e3"), TokenType::Float);
        assert_eq!(classify_plain("true"), TokenType::Bool);
        assert_eq!(classify_plain("~"), TokenType::Null);
        assert_eq!(classify_plain("e3"), TokenType::String);
        assert_eq!(classify_plain("1.2.3"), TokenType::String);
    }

    #[test]
    fn comments_need_preceding_whitespace() {
        let tokens = tokenize("key: a#b # note");
        assert_eq!(tokens[2].value, "a#b");
        let comment = find(&tokens, TokenType::Comment);
        assert_eq!(comment.value, " note");
        assert_eq!(comment.position.column, 10);
    }

    #[test]
    fn shebang_is_a_comment_at_origin() {
        let tokens = tokenize("#!/usr/bin/env yq\nkey: 1\n");
        assert_eq!(tokens[0].kind, TokenType::Comment);
        assert_eq!(tokens[0].value, "!/usr/bin/env yq");
        assert_eq!(tokens[0].position, Position::new(1, 1, 0));
    }

    #[test]
    fn document_markers_and_directives() {
        assert_eq!(
            kinds("%YAML 1.2\n---\na: 1\n...\n"),
            vec![
                TokenType::Directive,
                TokenType::DocumentHeader,
                TokenType::String,
                TokenType::MappingValue,
                TokenType::Integer,
                TokenType::DocumentEnd,
            ]
        );
    }

    #[test]
    fn block_scalar_body_is_one_token() {
        let tokens = tokenize("text: |\n  line one\n  line two\nnext: 1\n");
        let header = find(&tokens, TokenType::BlockScalarHeader);
        assert_eq!(header.value, "|");
        let body = find(&tokens, TokenType::BlockScalar);
        assert_eq!(body.value, "line one\nline two");
        assert_eq!(body.position, Position::new(2, 3, 10));
        let next = tokens.iter().find(|t| t.value == "next").expect("next key");
        assert_eq!(next.position.line, 4);
    }

    #[test]
    fn quoted_scalars_are_decoded() {
        let tokens = tokenize(r#"a: 'it''s'
b: "say \"hi\""
"#);
        assert_eq!(tokens[2].kind, TokenType::SingleQuote);
        assert_eq!(tokens[2].value, "it's");
        let double = find(&tokens, TokenType::DoubleQuote);
        assert_eq!(double.value, "say \"hi\"");
        assert_eq!(double.position.line, 2);
    }

    #[test]
    fn multiline_quoted_scalar_advances_lines() {
        let tokens = tokenize("a: \"one\n  two\"\nb: 1\n");
        let b = tokens.iter().find(|t| t.value == "b").expect("b key");
        assert_eq!(b.position, Position::new(3, 1, 15));
    }

    #[test]
    fn commas_are_plain_outside_flow() {
        let tokens = tokenize("a: x, y\nb: [x, y]\n");
        assert_eq!(tokens[2].value, "x, y");
        assert_eq!(
            tokens
                .iter()
                .filter(|t| t.kind == TokenType::CollectEntry)
                .count(),
            1
        );
    }

    #[test]
    fn trailing_whitespace_goes_to_last_token() {
        let tokens = tokenize("key:   \nother: 1");
        assert_eq!(tokens[1].origin, ":   ");
    }

    #[test]
    fn merge_key() {
        let tokens = tokenize("- <<: *base\n");
        assert_eq!(tokens[1].kind, TokenType::MergeKey);
        assert_eq!(tokens[3].kind, TokenType::Alias);
        assert_eq!(tokens[4].value, "base");
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n").is_empty());
    }
}
