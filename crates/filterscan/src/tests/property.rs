use alloc::vec::Vec;

use quickcheck::{QuickCheck, TestResult};

use super::{arbitrary::Filter, utils::tokens};
use crate::{Lexer, Token, tokenize};

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: every rendered filter scans cleanly, ends with exactly one
/// `End`, and reports the paths, groups and operators it was built from.
#[test]
fn valid_filters_scan_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(filter: Filter) -> TestResult {
        let src = filter.render(false);
        let mut lexer = Lexer::new(&src);
        let lexemes: Vec<_> = match lexer.by_ref().collect::<Result<Vec<_>, _>>() {
            Ok(lexemes) => lexemes,
            Err(err) => return TestResult::error(alloc::format!("{src:?}: {err}")),
        };
        let toks: Vec<Token> = lexemes.iter().map(|l| l.token).collect();

        let count = |wanted: Token| toks.iter().filter(|&&t| t == wanted).count();
        let operators: Vec<_> = toks
            .iter()
            .filter_map(|t| match t {
                Token::Operator(op) => Some(*op),
                _ => None,
            })
            .collect();

        TestResult::from_bool(
            toks.last() == Some(&Token::End)
                && count(Token::End) == 1
                && count(Token::Path) == filter.paths()
                && count(Token::GroupOpen) == filter.groups()
                && count(Token::GroupClose) == filter.groups()
                && operators == filter.operators()
                && lexer.scanner().depth() == 0,
        )
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Filter) -> TestResult);
}

/// Property: the optional space between `not`, `and` or `or` and a following
/// `(` never changes the token stream.
#[test]
fn optional_spaces_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(filter: Filter) -> bool {
        tokens(&filter.render(false)) == tokens(&filter.render(true))
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Filter) -> bool);
}

/// Property: spans are in bounds, ordered, and index the lexeme text.
#[test]
fn spans_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(filter: Filter) -> bool {
        let src = filter.render(false);
        let Ok(lexemes) = tokenize(&src) else {
            return false;
        };
        let mut last_end = 0;
        lexemes.iter().all(|l| {
            let ok = l.span.start >= last_end
                && l.span.end <= src.len()
                && src.as_bytes()[l.span.clone()] == **l.text;
            last_end = l.span.end;
            ok
        })
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Filter) -> bool);
}

/// Property: arbitrary bytes never panic, scan the same way twice, and any
/// error points inside the input or at the sentinel right after it.
#[test]
fn arbitrary_bytes_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>) -> bool {
        let first = tokenize(&bytes);
        let second = tokenize(&bytes);
        let bounded = match &first {
            Ok(lexemes) => lexemes.last().map(|l| l.token) == Some(Token::End),
            Err(err) => err.position <= bytes.len(),
        };
        first == second && bounded
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: cutting a valid filter short either still scans (the prefix is a
/// filter of its own) or fails no later than the sentinel.
#[test]
fn truncated_filters_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(filter: Filter, cut: usize) -> TestResult {
        let src = filter.render(false);
        if src.is_empty() {
            return TestResult::discard();
        }
        let prefix = &src.as_bytes()[..cut % src.len()];
        TestResult::from_bool(match tokenize(prefix) {
            Ok(lexemes) => lexemes.last().map(|l| l.token) == Some(Token::End),
            Err(err) => err.position <= prefix.len(),
        })
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Filter, usize) -> TestResult);
}
