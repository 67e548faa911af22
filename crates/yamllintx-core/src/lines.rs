//! Line splitting for line-oriented rules.

/// Splits `source` into lines without their terminators.
///
/// Both `\n` and `\r\n` terminate a line. A final terminator does not
/// introduce an extra empty line, so `"a\n"` yields `["a"]` and `""` yields
/// nothing.
#[must_use]
pub fn split_lines(source: &str) -> Vec<&str> {
    source.lines().collect()
}
