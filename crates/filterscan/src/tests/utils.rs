use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::{Lexer, ScanError, Token, tokenize};

/// `(token, text)` pairs for a filter that must scan cleanly.
pub(crate) fn lex(src: &str) -> Vec<(Token, String)> {
    tokenize(src)
        .unwrap_or_else(|err| panic!("{src:?} failed to scan: {err}"))
        .into_iter()
        .map(|lexeme| (lexeme.token, lexeme.text.to_string()))
        .collect()
}

/// Tokens only, spans and text dropped.
pub(crate) fn tokens(src: &str) -> Result<Vec<Token>, ScanError> {
    Lexer::new(src).map(|lexeme| lexeme.map(|l| l.token)).collect()
}

/// The error a filter must fail with.
pub(crate) fn scan_err(src: &str) -> ScanError {
    match tokenize(src) {
        Ok(lexemes) => panic!("{src:?} scanned without error: {lexemes:?}"),
        Err(err) => err,
    }
}

/// One lexeme per line, `token text`, for inline snapshots.
pub(crate) fn render(src: &str) -> String {
    let mut out = String::new();
    for lexeme in Lexer::new(src) {
        match lexeme {
            Ok(l) if l.text.is_empty() => out.push_str(&format!("{}\n", l.token)),
            Ok(l) => out.push_str(&format!("{} {} @{}..{}\n", l.token, l.text, l.span.start, l.span.end)),
            Err(err) => out.push_str(&format!("error: {err}\n")),
        }
    }
    out
}
