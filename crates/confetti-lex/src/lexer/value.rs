//! Value materialization.
//!
//! An argument token's value is its lexeme with the enclosing delimiters
//! trimmed and escapes resolved: the backslash is dropped and the escaped
//! scalar is copied verbatim. In a single-quoted argument a backslash
//! followed by a new line elides both (soft line continuation).
//!
//! Materialization is two-pass: the parser first measures every argument
//! of a directive with [`Lexer::value_len`], reserves one exactly-sized
//! buffer, then rewinds and copies with [`Lexer::append_value`].

use confetti_util::{Error, Result};

use crate::token::{Token, TokenFlags};
use crate::unicode::newline_len;
use crate::utf8::{decode, Decoded};

use super::Lexer;

impl Lexer<'_> {
    /// Returns the decoded length of the token's value in bytes.
    pub fn value_len(&self, tok: &Token) -> Result<usize> {
        self.walk_value(tok, |_| {})
    }

    /// Appends the token's decoded value to `out` and returns its length
    /// in bytes.
    pub fn append_value(&self, tok: &Token, out: &mut String) -> Result<usize> {
        self.walk_value(tok, |ch| out.push(ch))
    }

    /// Walks the trimmed lexeme resolving escapes, feeding each value
    /// scalar to `emit`.
    fn walk_value(&self, tok: &Token, mut emit: impl FnMut(char)) -> Result<usize> {
        let src = self.cursor.source();
        let trim = tok.trim as usize;
        let mut at = tok.span.start + trim;
        let stop = tok.span.end - trim;
        let mut nbytes = 0;

        while at < stop {
            if src[at] == b'\\' {
                at += 1;
                if tok.flags.contains(TokenFlags::QUOTED) {
                    if let Some(nl) = newline_len(src, at)? {
                        at += nl;
                        continue;
                    }
                }
            }
            match decode(src, at) {
                Decoded::Scalar { ch, len } => {
                    emit(ch);
                    nbytes += len;
                    at += len;
                }
                // The scanner validated this lexeme already.
                Decoded::End | Decoded::Malformed => {
                    return Err(Error::illegal_byte_sequence(at))
                }
            }
        }
        Ok(nbytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confetti_util::Options;

    fn value_of(source: &[u8]) -> String {
        let options = Options::default();
        let mut lexer = Lexer::new(source, &options).unwrap();
        let tok = lexer.peek().unwrap();
        let mut out = String::new();
        let n = lexer.append_value(&tok, &mut out).unwrap();
        assert_eq!(n, out.len());
        assert_eq!(lexer.value_len(&tok).unwrap(), out.len());
        out
    }

    #[test]
    fn test_unquoted_value_is_lexeme() {
        assert_eq!(value_of(b"plain"), "plain");
    }

    #[test]
    fn test_unquoted_escapes_resolved() {
        assert_eq!(value_of(br"a\;b\{c\}d"), "a;b{c}d");
        assert_eq!(value_of(br"back\\slash"), r"back\slash");
        // Escaping an ordinary character copies it verbatim.
        assert_eq!(value_of(br"a\nb"), "anb");
    }

    #[test]
    fn test_quoted_value_trims_quotes() {
        assert_eq!(value_of(b"\"hello world\""), "hello world");
        assert_eq!(value_of(br#""he said \"hi\"""#), "he said \"hi\"");
    }

    #[test]
    fn test_quoted_soft_continuation_elided() {
        assert_eq!(value_of(b"\"ab\\\ncd\""), "abcd");
        assert_eq!(value_of(b"\"ab\\\r\ncd\""), "abcd");
    }

    #[test]
    fn test_triple_quoted_preserves_newlines() {
        assert_eq!(value_of(b"\"\"\"line1\nline2\"\"\""), "line1\nline2");
    }

    #[test]
    fn test_triple_quoted_escapes() {
        assert_eq!(value_of(b"\"\"\"a\\\"b\"\"\""), "a\"b");
    }

    #[test]
    fn test_empty_quoted_value() {
        assert_eq!(value_of(b"\"\""), "");
        assert_eq!(value_of(br#""""""""#), "");
    }

    #[test]
    fn test_multibyte_value() {
        assert_eq!(value_of("\"日本語\"".as_bytes()), "日本語");
    }
}
