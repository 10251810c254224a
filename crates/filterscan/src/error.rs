use core::fmt;

use thiserror::Error;

use crate::scanner::END_OF_INPUT;

/// The diagnostic attached to a rejected byte.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A predicate must start with a path, `(` or `not`.
    #[error("invalid character at the start of the predicate")]
    InvalidPredicateStart,
    /// A byte that can neither continue nor terminate an attribute path.
    #[error("invalid character in attribute path")]
    InvalidPathCharacter,
    /// Misspelled or unterminated operator keyword.
    #[error("invalid operator")]
    InvalidOperator,
    /// The byte after a relational operator cannot begin a literal.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A backslash followed by something other than a known escape.
    #[error("invalid escape character in string literal")]
    InvalidEscape,
    /// One of the four digits after `\u` is not hexadecimal.
    #[error("invalid hexadecimal escape digit")]
    InvalidUnicodeEscape,
    /// End of input inside a quoted string.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// The closing quote of a string must be followed by a delimiter.
    #[error("invalid character trailing string literal")]
    InvalidStringTrailer,
    /// A completed predicate must be followed by `)`, `and`, `or` or the end.
    #[error("invalid character at the end of the predicate")]
    InvalidPredicateEnd,
    /// An unmatched `)`, or end of input with groups still open.
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    /// A bare attribute path where bare paths are disabled.
    #[error("missing operator after attribute path")]
    MissingOperator,
    /// Opening a group would exceed the configured depth limit.
    #[error("nesting deeper than {0} groups")]
    NestingTooDeep(usize),
    /// A byte fed after the filter already ended.
    #[error("unexpected input after end of filter")]
    TrailingInput,
}

/// The first (and only) failure of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    /// Zero-based offset of the offending byte. The sentinel sits at the
    /// length of the filter text.
    pub position: usize,
    /// The offending byte; [`END_OF_INPUT`] when the input ended too early.
    pub byte: u8,
    /// What went wrong.
    pub kind: ErrorKind,
}

impl ScanError {
    /// Returns `true` if the failure was detected on the end-of-input sentinel.
    #[must_use]
    pub fn at_end_of_input(&self) -> bool {
        self.byte == END_OF_INPUT
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.at_end_of_input() {
            write!(f, "{} at end of input (offset {})", self.kind, self.position)
        } else {
            write!(
                f,
                "{} at '{}' (offset {})",
                self.kind,
                self.byte.escape_ascii(),
                self.position
            )
        }
    }
}

impl core::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}
