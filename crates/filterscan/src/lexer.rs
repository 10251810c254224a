//! The reference driving loop over [`Scanner`].
//!
//! The lexer owns the three obligations every caller of the scanner has:
//! appending the end-of-input sentinel, honouring
//! [`Action::InsertSpaceAndReplay`] (synthetic space first, then the very same
//! byte again), and stopping at the first error. On top of that it remembers
//! where the lexeme in progress started, so each boundary action can be turned
//! into a borrowed [`Lexeme`].

use alloc::vec::Vec;
use core::ops::Range;

use bstr::BStr;
use tracing::trace;

use crate::{
    error::ScanError,
    options::ScannerOptions,
    scanner::{Action, END_OF_INPUT, Scanner, ScannerState},
    token::{LiteralKind, Token},
};

/// One completed lexeme, borrowed from the filter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'src> {
    /// What was scanned.
    pub token: Token,
    /// The exact source bytes. String literals keep their quotes and escapes;
    /// [`Token::End`] is empty.
    pub text: &'src BStr,
    /// Byte offsets of `text` within the filter.
    pub span: Range<usize>,
}

/// An iterator of [`Lexeme`]s over one filter string.
///
/// Yields `Ok` lexemes up to and including [`Token::End`], or stops after the
/// first `Err`.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    src: &'src [u8],
    pos: usize,
    scanner: Scanner,
    /// Start of the lexeme in progress.
    start: Option<usize>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer with default [`ScannerOptions`].
    pub fn new<S: AsRef<[u8]> + ?Sized>(src: &'src S) -> Self {
        Self::with_options(src, ScannerOptions::default())
    }

    /// Creates a lexer with the given options.
    pub fn with_options<S: AsRef<[u8]> + ?Sized>(src: &'src S, options: ScannerOptions) -> Self {
        Self {
            src: src.as_ref(),
            pos: 0,
            scanner: Scanner::with_options(options),
            start: None,
            finished: false,
        }
    }

    /// The underlying scanner, e.g. to read the current depth.
    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    #[inline]
    fn current(&self) -> u8 {
        self.src.get(self.pos).copied().unwrap_or(END_OF_INPUT)
    }

    fn lexeme(&self, token: Token, span: Range<usize>) -> Lexeme<'src> {
        let lexeme = Lexeme {
            token,
            text: BStr::new(&self.src[span.clone()]),
            span,
        };
        trace!(token = %lexeme.token, text = %lexeme.text, start = lexeme.span.start, "lexeme");
        lexeme
    }

    /// Closes the lexeme in progress at the current position.
    fn close(&mut self, token: Token) -> Lexeme<'src> {
        let start = self.start.take().unwrap_or(self.pos);
        self.lexeme(token, start..self.pos)
    }

    fn fail(&mut self) -> Option<Result<Lexeme<'src>, ScanError>> {
        self.finished = true;
        self.scanner.error().cloned().map(Err)
    }

    /// Interprets one action for a byte read in state `prior`.
    fn interpret(
        &mut self,
        prior: ScannerState,
        byte: u8,
        action: Action,
    ) -> Option<Result<Lexeme<'src>, ScanError>> {
        let at = self.pos;
        let lexeme = match action {
            Action::Continue if byte == b' ' => prior.keyword().map(|token| self.close(token)),
            Action::Continue => {
                self.start.get_or_insert(at);
                None
            }
            Action::SkipSpace | Action::InsertSpaceAndReplay => None,
            Action::BeginGroup => Some(self.lexeme(Token::GroupOpen, at..at + 1)),
            Action::EndGroup => Some(self.lexeme(Token::GroupClose, at..at + 1)),
            Action::EndPathToken => Some(self.close(Token::Path)),
            Action::EndLiteralToken => {
                let kind = if prior == ScannerState::NonString {
                    LiteralKind::NonString
                } else {
                    LiteralKind::String
                };
                Some(self.close(Token::Literal(kind)))
            }
            Action::EndOfFilter => {
                let rest = self.src.get(at + 1..).unwrap_or_default();
                if at < self.src.len() && rest.iter().any(|&b| b != END_OF_INPUT) {
                    // A NUL inside the text ended the filter early; the next
                    // byte is trailing input. NUL padding alone is accepted.
                    self.scanner.step(rest[0]);
                    return self.fail();
                }
                self.finished = true;
                Some(self.lexeme(Token::End, at..at))
            }
            Action::Error => return self.fail(),
        };
        lexeme.map(Ok)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Lexeme<'src>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            #[cfg(any(test, feature = "fuzzing"))]
            assert_eq!(
                self.scanner.position(),
                self.pos,
                "scanner and lexer disagree on the offset"
            );
            let byte = self.current();
            let prior = self.scanner.state();
            let item = match self.scanner.step(byte) {
                Action::InsertSpaceAndReplay => {
                    // `pos` stays put so the same byte is fed again next round.
                    let prior = self.scanner.state();
                    let action = self.scanner.insert_space();
                    self.interpret(prior, b' ', action)
                }
                action => {
                    let item = self.interpret(prior, byte, action);
                    self.pos += 1;
                    item
                }
            };
            if item.is_some() {
                return item;
            }
        }
        None
    }
}

impl core::iter::FusedIterator for Lexer<'_> {}

/// Scans a whole filter, returning every lexeme up to and including
/// [`Token::End`].
///
/// # Errors
///
/// Returns the first [`ScanError`] the scanner records.
pub fn tokenize<S: AsRef<[u8]> + ?Sized>(src: &S) -> Result<Vec<Lexeme<'_>>, ScanError> {
    Lexer::new(src).collect()
}
