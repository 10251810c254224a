#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use filterscan::{Action, END_OF_INPUT, Lexer, Scanner, ScannerOptions, Token};
use libfuzzer_sys::fuzz_target;

static PATHS: &[&str] = &[
    "a", "n", "no", "notes", "andy", "order", "emails.value", "members.$ref",
    "urn:ietf:params:scim:schemas:core:2.0:User:userName",
];
static OPERATORS: &[&str] = &["eq", "NE", "co", "sw", "Ew", "gt", "ge", "lt", "le"];
static LITERALS: &[&str] = &["true", "null", "-1.5", r#""x""#, r#""a \"b\" é""#, r#""(""#];

/// A filter that should always scan, rendered straight to text.
#[derive(Debug)]
struct ArbitraryFilter(String);

fn filter(u: &mut Unstructured<'_>, depth: u8, out: &mut String) -> arbitrary::Result<()> {
    let node = if depth == 0 { u.choose_index(3)? } else { u.choose_index(6)? };
    match node {
        0 => {
            out.push_str(u.choose(PATHS)?);
            out.push(' ');
            out.push_str(u.choose(OPERATORS)?);
            out.push(' ');
            out.push_str(u.choose(LITERALS)?);
        }
        1 => {
            out.push_str(u.choose(PATHS)?);
            out.push_str(" pr");
        }
        2 => out.push_str(u.choose(PATHS)?),
        3 => {
            out.push_str(if u.arbitrary()? { "not(" } else { "not (" });
            filter(u, depth - 1, out)?;
            out.push(')');
        }
        _ => {
            filter(u, depth - 1, out)?;
            out.push_str(if u.arbitrary()? { " and " } else { " or " });
            filter(u, depth - 1, out)?;
        }
    }
    Ok(())
}

impl<'a> Arbitrary<'a> for ArbitraryFilter {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut out = String::new();
        filter(u, 4, &mut out)?;
        Ok(ArbitraryFilter(out))
    }
}

#[derive(Debug, Arbitrary)]
enum Input {
    /// Raw bytes: anything may fail, nothing may panic.
    Bytes {
        max_depth: Option<u8>,
        allow_bare_paths: bool,
        data: Vec<u8>,
    },
    /// Generated filter: must scan to a single `End`.
    Filter(ArbitraryFilter),
}

/// Drive the scanner by hand and return the first error, if any.
fn drive(src: &[u8], options: ScannerOptions) -> Option<filterscan::ScanError> {
    let mut scanner = Scanner::with_options(options);
    for &byte in src.iter().chain(&[END_OF_INPUT]) {
        loop {
            match scanner.step(byte) {
                Action::InsertSpaceAndReplay => {
                    assert_ne!(scanner.insert_space(), Action::InsertSpaceAndReplay);
                }
                Action::Error => return scanner.error().cloned(),
                Action::EndOfFilter => return None,
                _ => break,
            }
        }
    }
    None
}

fn scan(input: Input) {
    match input {
        Input::Bytes {
            max_depth,
            allow_bare_paths,
            data,
        } => {
            let options = ScannerOptions {
                max_depth: max_depth.map(usize::from),
                allow_bare_paths,
            };
            let lexed = Lexer::with_options(&data, options).find_map(Result::err);
            let driven = drive(&data, options);
            // An interior NUL ends the hand-driven loop early; the lexer
            // reports what follows it.
            if !data.contains(&END_OF_INPUT) {
                assert_eq!(lexed, driven);
            }
            if let Some(err) = lexed {
                assert!(err.position <= data.len());
            }
        }
        Input::Filter(ArbitraryFilter(src)) => {
            let lexemes: Vec<_> = Lexer::new(&src)
                .collect::<Result<_, _>>()
                .unwrap_or_else(|err| panic!("{src:?}: {err}"));
            assert_eq!(lexemes.last().map(|l| l.token), Some(Token::End));
            assert_eq!(
                lexemes.iter().filter(|l| l.token == Token::End).count(),
                1
            );
        }
    }
}

fuzz_target!(|input: Input| scan(input));
