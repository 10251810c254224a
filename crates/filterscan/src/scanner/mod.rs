//! Scanner: the byte-at-a-time transition table.
//!
//! What it does
//! - Consumes one byte per call to [`Scanner::step`] and answers with one
//!   [`Action`]. The caller tracks token boundaries from those actions; the
//!   scanner itself never buffers input.
//! - Resolves the `not`/path ambiguity speculatively: `n`, `no` and `not` are
//!   their own states, and any byte that cannot continue the keyword is
//!   handled exactly as the path state would handle it.
//! - Resolves abutting punctuation (`not(`, `"x")`, `b)`) by returning
//!   [`Action::InsertSpaceAndReplay`]: the byte is not consumed, the caller
//!   feeds a synthetic space through [`Scanner::insert_space`] and then feeds
//!   the same byte again.
//!
//! Invariants
//! - `depth` never underflows; a `)` at depth zero is an error.
//! - [`Action::EndOfFilter`] is produced exactly once, at depth zero, and only
//!   from the operator-start or predicate-end states. The end sentinel seen in
//!   any state with a pending lexeme is replayed behind a space first, so every
//!   lexeme is closed by an explicit space transition.
//! - After [`Action::Error`] the scanner is terminal: further bytes keep
//!   returning [`Action::Error`] and the recorded error is never replaced.
//!
//! Example
//! ```rust
//! use filterscan::{Action, END_OF_INPUT, Scanner};
//!
//! let mut scanner = Scanner::new();
//! let mut actions = Vec::new();
//! for &byte in b"a pr".iter().chain(&[END_OF_INPUT]) {
//!     loop {
//!         match scanner.step(byte) {
//!             Action::InsertSpaceAndReplay => actions.push(scanner.insert_space()),
//!             action => {
//!                 actions.push(action);
//!                 break;
//!             }
//!         }
//!     }
//! }
//! assert_eq!(actions.last(), Some(&Action::EndOfFilter));
//! assert_eq!(scanner.depth(), 0);
//! ```

use tracing::debug;

use crate::{
    classify::{
        is_hex_digit, is_non_string_literal_start, is_path_byte, is_path_start, is_simple_escape,
    },
    error::{ErrorKind, ScanError},
    options::ScannerOptions,
    token::{Operator, Token},
};

/// The byte appended after the filter text to mark the end of input.
pub const END_OF_INPUT: u8 = 0;

const SPACE: u8 = b' ';

/// What the caller should do with the byte it just fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The byte belongs to the lexeme in progress.
    Continue,
    /// Insignificant whitespace between lexemes.
    SkipSpace,
    /// The byte is a `(` that opened a group.
    BeginGroup,
    /// The byte is a `)` that closed a group.
    EndGroup,
    /// The attribute path ended just before this byte.
    EndPathToken,
    /// The literal ended just before this byte.
    EndLiteralToken,
    /// The byte was not consumed. Feed a space with
    /// [`Scanner::insert_space`], then feed the same byte again.
    InsertSpaceAndReplay,
    /// The end sentinel was accepted; the filter is complete.
    EndOfFilter,
    /// The byte was rejected; see [`Scanner::error`].
    Error,
}

/// Which transition logic handles the next byte.
///
/// Operator states are named after the bytes consumed so far, e.g. `OpGe`
/// means `ge` has been read and a delimiter is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScannerState {
    /// Expecting a path, `(` or `not`.
    BeginPredicate,
    /// Read `n`: either `not` or a path.
    KeywordN,
    /// Read `no`: either `not` or a path.
    KeywordNo,
    /// Read `not`: the keyword if a delimiter follows, a path otherwise.
    KeywordNot,
    /// Inside an attribute path.
    Path,
    /// After a path and a space: expecting an operator.
    BeginOperator,
    /// `a`
    OpA,
    /// `an`
    OpAn,
    /// `and`
    OpAnd,
    /// `o`
    OpO,
    /// `or`
    OpOr,
    /// `c`
    OpC,
    /// `co`
    OpCo,
    /// `e`
    OpE,
    /// `eq`
    OpEq,
    /// `ew`
    OpEw,
    /// `g`
    OpG,
    /// `gt`
    OpGt,
    /// `ge`
    OpGe,
    /// `l`
    OpL,
    /// `lt`
    OpLt,
    /// `le`
    OpLe,
    /// `n` in operator position
    OpN,
    /// `ne`
    OpNe,
    /// `s`
    OpS,
    /// `sw`
    OpSw,
    /// `p`
    OpP,
    /// `pr`
    OpPr,
    /// After a relational operator: expecting a literal.
    BeginLiteral,
    /// Inside a quoted string.
    String,
    /// After a backslash in a string.
    StringEscape,
    /// After `\u`.
    StringEscapeU,
    /// After `\uX`.
    StringEscapeU1,
    /// After `\uXX`.
    StringEscapeU12,
    /// After `\uXXX`.
    StringEscapeU123,
    /// After the closing quote of a string.
    EndString,
    /// Inside an unquoted literal.
    NonString,
    /// After a complete predicate: expecting `)`, `and`, `or` or the end.
    EndPredicate,
    /// The filter has ended.
    End,
    /// A byte was rejected.
    Error,
}

impl ScannerState {
    /// Returns `true` for [`ScannerState::End`] and [`ScannerState::Error`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, ScannerState::End | ScannerState::Error)
    }

    /// The keyword a space completes when read in this state.
    pub(crate) const fn keyword(self) -> Option<Token> {
        let op = match self {
            ScannerState::KeywordNot => return Some(Token::Not),
            ScannerState::OpAnd => return Some(Token::And),
            ScannerState::OpOr => return Some(Token::Or),
            ScannerState::OpCo => Operator::Co,
            ScannerState::OpEq => Operator::Eq,
            ScannerState::OpEw => Operator::Ew,
            ScannerState::OpGt => Operator::Gt,
            ScannerState::OpGe => Operator::Ge,
            ScannerState::OpLt => Operator::Lt,
            ScannerState::OpLe => Operator::Le,
            ScannerState::OpNe => Operator::Ne,
            ScannerState::OpSw => Operator::Sw,
            ScannerState::OpPr => Operator::Pr,
            _ => return None,
        };
        Some(Token::Operator(op))
    }
}

/// A filter scanner for a single filter string.
///
/// Feed every byte of the filter to [`step`](Scanner::step), followed by one
/// [`END_OF_INPUT`] byte. The scanner is a plain value: create one per filter
/// and drop it when done.
#[derive(Debug, Clone)]
pub struct Scanner {
    state: ScannerState,
    depth: usize,
    /// Offset of the next real byte. Synthetic spaces do not advance it.
    position: usize,
    error: Option<ScanError>,
    options: ScannerOptions,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Creates a scanner with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ScannerOptions::default())
    }

    /// Creates a scanner with the given options.
    #[must_use]
    pub fn with_options(options: ScannerOptions) -> Self {
        Self {
            state: ScannerState::BeginPredicate,
            depth: 0,
            position: 0,
            error: None,
            options,
        }
    }

    /// The state that will handle the next byte.
    #[must_use]
    pub fn state(&self) -> ScannerState {
        self.state
    }

    /// Number of currently open groups.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Offset of the next byte to be fed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The error recorded by the first rejected byte, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    /// Returns `true` once the filter has ended or failed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Feeds the next byte of the filter.
    ///
    /// The byte counts towards [`position`](Scanner::position) unless it is
    /// rejected or must be replayed.
    pub fn step(&mut self, byte: u8) -> Action {
        let action = self.transition(byte);
        if !matches!(action, Action::InsertSpaceAndReplay | Action::Error) {
            self.position += 1;
        }
        action
    }

    /// Feeds the synthetic space requested by
    /// [`Action::InsertSpaceAndReplay`].
    ///
    /// The space advances the state exactly as a real one would, but does not
    /// count towards [`position`](Scanner::position). The caller must then
    /// feed the replayed byte again through [`step`](Scanner::step).
    pub fn insert_space(&mut self) -> Action {
        let action = self.transition(SPACE);
        debug_assert_ne!(action, Action::InsertSpaceAndReplay);
        action
    }

    fn transition(&mut self, byte: u8) -> Action {
        use ScannerState as S;

        match self.state {
            S::BeginPredicate => self.begin_predicate(byte),
            S::KeywordN => self.keyword_or_path(byte, b'o', S::KeywordNo),
            S::KeywordNo => self.keyword_or_path(byte, b't', S::KeywordNot),
            S::KeywordNot => self.end_not(byte),
            S::Path => self.in_path(byte),

            S::BeginOperator => self.begin_operator(byte),
            S::OpA => self.operator_byte(byte, b'n', S::OpAn),
            S::OpAn => self.operator_byte(byte, b'd', S::OpAnd),
            S::OpO => self.operator_byte(byte, b'r', S::OpOr),
            S::OpAnd | S::OpOr => self.end_logical(byte),
            S::OpC => self.operator_byte(byte, b'o', S::OpCo),
            S::OpE => self.operator_fork(byte, (b'q', S::OpEq), (b'w', S::OpEw)),
            S::OpG => self.operator_fork(byte, (b't', S::OpGt), (b'e', S::OpGe)),
            S::OpL => self.operator_fork(byte, (b't', S::OpLt), (b'e', S::OpLe)),
            S::OpN => self.operator_byte(byte, b'e', S::OpNe),
            S::OpS => self.operator_byte(byte, b'w', S::OpSw),
            S::OpP => self.operator_byte(byte, b'r', S::OpPr),
            S::OpCo
            | S::OpEq
            | S::OpEw
            | S::OpGt
            | S::OpGe
            | S::OpLt
            | S::OpLe
            | S::OpNe
            | S::OpSw => self.end_relational(byte),
            S::OpPr => self.end_presence(byte),

            S::BeginLiteral => self.begin_literal(byte),
            S::String => self.in_string(byte),
            S::StringEscape => self.string_escape(byte),
            S::StringEscapeU => self.unicode_escape(byte, S::StringEscapeU1),
            S::StringEscapeU1 => self.unicode_escape(byte, S::StringEscapeU12),
            S::StringEscapeU12 => self.unicode_escape(byte, S::StringEscapeU123),
            S::StringEscapeU123 => self.unicode_escape(byte, S::String),
            S::EndString => self.end_string(byte),
            S::NonString => self.in_non_string(byte),

            S::EndPredicate => self.end_predicate(byte),
            S::End => self.fail(byte, ErrorKind::TrailingInput),
            S::Error => Action::Error,
        }
    }

    #[inline]
    fn advance(&mut self, next: ScannerState) -> Action {
        self.state = next;
        Action::Continue
    }

    // ---------------------------------------------------------------------
    // Predicates and paths
    // ---------------------------------------------------------------------

    fn begin_predicate(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => Action::SkipSpace,
            b'(' => self.open_group(byte),
            // `not`, or a path that merely starts with `n`
            b'n' | b'N' => self.advance(ScannerState::KeywordN),
            _ if is_path_start(byte) => self.advance(ScannerState::Path),
            _ => self.fail(byte, ErrorKind::InvalidPredicateStart),
        }
    }

    fn keyword_or_path(&mut self, byte: u8, expected: u8, next: ScannerState) -> Action {
        if byte.to_ascii_lowercase() == expected {
            self.advance(next)
        } else {
            self.in_path(byte)
        }
    }

    fn end_not(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => self.advance(ScannerState::BeginPredicate),
            b'(' => Action::InsertSpaceAndReplay,
            // `notes`, `not.x`, or `not` standing alone as a path
            _ => self.in_path(byte),
        }
    }

    fn in_path(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => {
                self.state = ScannerState::BeginOperator;
                Action::EndPathToken
            }
            b')' | END_OF_INPUT => {
                // Also reached from the `not` chain, which must not see the
                // synthetic space.
                self.state = ScannerState::Path;
                Action::InsertSpaceAndReplay
            }
            _ if is_path_byte(byte) => self.advance(ScannerState::Path),
            _ => self.fail(byte, ErrorKind::InvalidPathCharacter),
        }
    }

    fn open_group(&mut self, byte: u8) -> Action {
        if let Some(max) = self.options.max_depth {
            if self.depth >= max {
                return self.fail(byte, ErrorKind::NestingTooDeep(max));
            }
        }
        self.depth += 1;
        self.state = ScannerState::BeginPredicate;
        Action::BeginGroup
    }

    fn close_group(&mut self, byte: u8) -> Action {
        if self.depth == 0 {
            return self.fail(byte, ErrorKind::UnbalancedParenthesis);
        }
        self.depth -= 1;
        self.state = ScannerState::EndPredicate;
        Action::EndGroup
    }

    fn end_of_filter(&mut self, byte: u8) -> Action {
        if self.depth != 0 {
            return self.fail(byte, ErrorKind::UnbalancedParenthesis);
        }
        self.state = ScannerState::End;
        Action::EndOfFilter
    }

    fn end_predicate(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => Action::SkipSpace,
            b')' => self.close_group(byte),
            b'a' | b'A' => self.advance(ScannerState::OpA),
            b'o' | b'O' => self.advance(ScannerState::OpO),
            END_OF_INPUT => self.end_of_filter(byte),
            _ => self.fail(byte, ErrorKind::InvalidPredicateEnd),
        }
    }

    // ---------------------------------------------------------------------
    // Operators
    // ---------------------------------------------------------------------

    fn begin_operator(&mut self, byte: u8) -> Action {
        use ScannerState as S;

        let next = match byte.to_ascii_lowercase() {
            SPACE => return Action::SkipSpace,
            // The path just read is the whole predicate.
            b')' | END_OF_INPUT | b'a' | b'o' if !self.options.allow_bare_paths => {
                return self.fail(byte, ErrorKind::MissingOperator);
            }
            b')' => return self.close_group(byte),
            END_OF_INPUT => return self.end_of_filter(byte),
            b'a' => S::OpA,
            b'o' => S::OpO,
            b'c' => S::OpC,
            b'e' => S::OpE,
            b'g' => S::OpG,
            b'l' => S::OpL,
            b'n' => S::OpN,
            b'p' => S::OpP,
            b's' => S::OpS,
            _ => return self.fail(byte, ErrorKind::InvalidOperator),
        };
        self.advance(next)
    }

    fn operator_byte(&mut self, byte: u8, expected: u8, next: ScannerState) -> Action {
        if byte.to_ascii_lowercase() == expected {
            self.advance(next)
        } else {
            self.fail(byte, ErrorKind::InvalidOperator)
        }
    }

    fn operator_fork(
        &mut self,
        byte: u8,
        (first, first_next): (u8, ScannerState),
        (second, second_next): (u8, ScannerState),
    ) -> Action {
        match byte.to_ascii_lowercase() {
            b if b == first => self.advance(first_next),
            b if b == second => self.advance(second_next),
            _ => self.fail(byte, ErrorKind::InvalidOperator),
        }
    }

    fn end_relational(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => self.advance(ScannerState::BeginLiteral),
            // Let the literal state report the missing literal.
            END_OF_INPUT => Action::InsertSpaceAndReplay,
            _ => self.fail(byte, ErrorKind::InvalidOperator),
        }
    }

    fn end_presence(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => self.advance(ScannerState::EndPredicate),
            b')' | END_OF_INPUT => Action::InsertSpaceAndReplay,
            _ => self.fail(byte, ErrorKind::InvalidOperator),
        }
    }

    fn end_logical(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => self.advance(ScannerState::BeginPredicate),
            b'(' => Action::InsertSpaceAndReplay,
            _ => self.fail(byte, ErrorKind::InvalidOperator),
        }
    }

    // ---------------------------------------------------------------------
    // Literals
    // ---------------------------------------------------------------------

    fn begin_literal(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => Action::SkipSpace,
            b'"' => self.advance(ScannerState::String),
            _ if is_non_string_literal_start(byte) => self.advance(ScannerState::NonString),
            _ => self.fail(byte, ErrorKind::InvalidLiteral),
        }
    }

    fn in_string(&mut self, byte: u8) -> Action {
        match byte {
            b'\\' => self.advance(ScannerState::StringEscape),
            b'"' => self.advance(ScannerState::EndString),
            END_OF_INPUT => self.fail(byte, ErrorKind::UnterminatedString),
            _ => Action::Continue,
        }
    }

    fn string_escape(&mut self, byte: u8) -> Action {
        match byte {
            b'u' => self.advance(ScannerState::StringEscapeU),
            _ if is_simple_escape(byte) => self.advance(ScannerState::String),
            _ => self.fail(byte, ErrorKind::InvalidEscape),
        }
    }

    fn unicode_escape(&mut self, byte: u8, next: ScannerState) -> Action {
        if is_hex_digit(byte) {
            self.advance(next)
        } else {
            self.fail(byte, ErrorKind::InvalidUnicodeEscape)
        }
    }

    fn end_string(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => {
                self.state = ScannerState::EndPredicate;
                Action::EndLiteralToken
            }
            b')' | END_OF_INPUT => Action::InsertSpaceAndReplay,
            _ => self.fail(byte, ErrorKind::InvalidStringTrailer),
        }
    }

    fn in_non_string(&mut self, byte: u8) -> Action {
        match byte {
            SPACE => {
                self.state = ScannerState::EndPredicate;
                Action::EndLiteralToken
            }
            b')' | END_OF_INPUT => Action::InsertSpaceAndReplay,
            _ => Action::Continue,
        }
    }

    #[cold]
    fn fail(&mut self, byte: u8, kind: ErrorKind) -> Action {
        debug!(
            position = self.position,
            byte,
            state = ?self.state,
            depth = self.depth,
            %kind,
            "filter scan failed"
        );
        self.error = Some(ScanError {
            position: self.position,
            byte,
            kind,
        });
        self.state = ScannerState::Error;
        Action::Error
    }
}
