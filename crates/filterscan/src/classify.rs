//! Byte classes used by the transition table.
//!
//! Every predicate is a pure `const fn` over a single byte. The scanner never
//! decodes UTF-8: attribute paths are ASCII-only, and non-ASCII bytes are only
//! meaningful inside string literals, where they are passed through untouched.

/// Legal first byte of an attribute path: an ASCII letter, `_` or `$`.
#[inline]
#[must_use]
pub const fn is_path_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b'$')
}

/// Legal continuation byte of an attribute path segment.
///
/// Adds ASCII digits and `-` to the leading set.
#[inline]
#[must_use]
pub const fn is_path_continue(b: u8) -> bool {
    is_path_start(b) || b.is_ascii_digit() || b == b'-'
}

/// `.` separates a sub-attribute, `:` qualifies a name with its schema URN.
#[inline]
#[must_use]
pub const fn is_path_separator(b: u8) -> bool {
    matches!(b, b'.' | b':')
}

/// Any byte the path state accepts without completing the path.
#[inline]
#[must_use]
pub const fn is_path_byte(b: u8) -> bool {
    is_path_continue(b) || is_path_separator(b)
}

/// Case-insensitive hexadecimal digit, as used by `\uXXXX` escapes.
#[inline]
#[must_use]
pub const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// First byte of an unquoted literal: `true`, `false`, `null` or a number.
///
/// Only the leading byte is checked; the rest of the literal is left to the
/// consumer to coerce.
#[inline]
#[must_use]
pub const fn is_non_string_literal_start(b: u8) -> bool {
    matches!(b, b't' | b'T' | b'f' | b'F' | b'n' | b'N' | b'-' | b'+') || b.is_ascii_digit()
}

/// Single-byte escapes allowed after a backslash in a string literal.
#[inline]
#[must_use]
pub const fn is_simple_escape(b: u8) -> bool {
    matches!(b, b'b' | b'f' | b'n' | b'r' | b't' | b'\\' | b'/' | b'"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_start_excludes_digits_and_punctuation() {
        for b in [b'a', b'Z', b'_', b'$'] {
            assert!(is_path_start(b), "{:?}", b as char);
        }
        for b in [b'0', b'9', b'-', b'.', b':', b' ', b'(', b'"', 0u8, 0xC3] {
            assert!(!is_path_start(b), "{:?}", b as char);
        }
    }

    #[test]
    fn path_continue_is_a_superset_of_path_start() {
        for b in 0..=u8::MAX {
            if is_path_start(b) {
                assert!(is_path_continue(b));
            }
        }
        assert!(is_path_continue(b'7'));
        assert!(is_path_continue(b'-'));
        assert!(!is_path_continue(b'.'));
        assert!(is_path_byte(b'.'));
        assert!(is_path_byte(b':'));
    }

    #[test]
    fn sentinel_is_outside_every_class() {
        assert!(!is_path_byte(0));
        assert!(!is_hex_digit(0));
        assert!(!is_non_string_literal_start(0));
        assert!(!is_simple_escape(0));
    }

    #[test]
    fn hex_digits_are_case_insensitive() {
        let digits = b"0123456789abcdefABCDEF";
        for b in 0..=u8::MAX {
            assert_eq!(is_hex_digit(b), digits.contains(&b));
        }
    }
}
