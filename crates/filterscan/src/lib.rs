//! A single-pass scanner for directory-service filter expressions such as
//! `userName sw "J" and not(active eq false)`.
//!
//! The core is [`Scanner`], a byte-at-a-time state machine: feed it one byte,
//! get back one [`Action`]. It never looks ahead and never backtracks, which is
//! why keyword/path ambiguity (`not` vs. `notes.title`) and punctuation that
//! abuts a keyword (`not(`) are resolved inside the transition table, the
//! latter by asking the caller to insert a space and replay the byte
//! ([`Action::InsertSpaceAndReplay`]).
//!
//! [`Lexer`] is the reference driver built on top of it: it appends the
//! end-of-input sentinel, honours the replay contract and yields borrowed
//! [`Lexeme`]s.
//!
//! ```rust
//! use filterscan::{Lexer, Operator, Token};
//!
//! let tokens: Vec<Token> = Lexer::new("not(active eq true)")
//!     .map(|lexeme| lexeme.map(|l| l.token))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(
//!     tokens,
//!     [
//!         Token::Not,
//!         Token::GroupOpen,
//!         Token::Path,
//!         Token::Operator(Operator::Eq),
//!         Token::Literal(filterscan::LiteralKind::NonString),
//!         Token::GroupClose,
//!         Token::End,
//!     ]
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod classify;
mod error;
mod lexer;
mod options;
mod scanner;
mod token;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ScanError};
pub use lexer::{Lexeme, Lexer, tokenize};
pub use options::ScannerOptions;
pub use scanner::{Action, END_OF_INPUT, Scanner, ScannerState};
pub use token::{LiteralKind, Operator, Token};
