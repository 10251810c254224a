#![allow(missing_docs)]
use filterscan::{
    ErrorKind, Lexeme, Lexer, LiteralKind, Operator, ScannerOptions, Token, tokenize,
};

fn texts(lexemes: &[Lexeme<'_>]) -> Vec<String> {
    lexemes.iter().map(|l| l.text.to_string()).collect()
}

#[test]
fn std_tokenize_filter() {
    let lexemes = tokenize(r#"title pr and userType eq "Employee""#).unwrap();
    let tokens: Vec<Token> = lexemes.iter().map(|l| l.token).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Path,
            Token::Operator(Operator::Pr),
            Token::And,
            Token::Path,
            Token::Operator(Operator::Eq),
            Token::Literal(LiteralKind::String),
            Token::End,
        ]
    );
    assert_eq!(
        texts(&lexemes),
        vec!["title", "pr", "and", "userType", "eq", "\"Employee\"", ""]
    );
}

#[test]
fn std_bytes_and_strings_agree() {
    let src = "emails.value ew \"@example.org\"";
    assert_eq!(tokenize(src), tokenize(src.as_bytes()));
    assert_eq!(tokenize(src), tokenize(&String::from(src)));
}

#[test]
fn std_error_is_a_std_error() {
    let err = tokenize("a eq").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLiteral);
    assert!(err.at_end_of_input());

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!(boxed.to_string(), "invalid literal at end of input (offset 4)");
    assert_eq!(
        boxed.source().map(ToString::to_string).as_deref(),
        Some("invalid literal")
    );
}

#[test]
fn std_options_are_honoured() {
    let options = ScannerOptions {
        max_depth: Some(3),
        allow_bare_paths: false,
    };
    let ok: Result<Vec<_>, _> = Lexer::with_options("((a pr) and (b pr))", options).collect();
    assert!(ok.is_ok());

    let err = Lexer::with_options("a", options)
        .find_map(Result::err)
        .unwrap();
    assert_eq!(err.kind, ErrorKind::MissingOperator);
}
