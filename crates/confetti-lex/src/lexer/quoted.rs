//! Quoted argument scanning.
//!
//! A single-quoted argument `"..."` must close on the same line; a
//! backslash-newline pair inside it is a soft line continuation, elided
//! from the value. A triple-quoted argument `"""..."""` may span lines
//! and preserves its embedded terminators.

use confetti_util::{Error, Result, Span};

use crate::token::{Token, TokenFlags};
use crate::unicode::{char_flags, is_line_terminator, newline_len, CharFlags};
use crate::utf8::{decode, Decoded};

use super::Lexer;

impl Lexer<'_> {
    /// Scans a single-quoted argument starting at the opening `"`.
    pub(super) fn scan_single_quoted(&self, start: usize) -> Result<Token> {
        let src = self.cursor.source();
        let mut at = start + 1;
        loop {
            let (ch, len) = match decode(src, at) {
                Decoded::End => return Err(Error::bad_syntax(at, "unclosed quoted")),
                Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                Decoded::Scalar { ch, len } => (ch, len),
            };
            if is_line_terminator(ch) {
                return Err(Error::bad_syntax(at, "unclosed quoted"));
            }

            if ch == '\\' {
                at += 1;

                // A new line after the backslash is a soft continuation;
                // both are elided from the value.
                if let Some(nl) = newline_len(src, at)? {
                    at += nl;
                    continue;
                }

                let (esc, esc_len) = match decode(src, at) {
                    Decoded::End => {
                        return Err(Error::bad_syntax(at, "incomplete escape sequence"))
                    }
                    Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                    Decoded::Scalar { ch, len } => (ch, len),
                };
                if !char_flags(esc).intersects(CharFlags::ESCAPABLE) {
                    return Err(Error::bad_syntax(at, "illegal escape character"));
                }
                self.check_bidi(esc, at)?;
                at += esc_len;
            } else {
                if !char_flags(ch).intersects(CharFlags::ESCAPABLE | CharFlags::SPACE) {
                    return Err(Error::bad_syntax(at, "illegal character"));
                }
                self.check_bidi(ch, at)?;
                at += len;
                if ch == '"' {
                    break;
                }
            }
        }
        Ok(Token::argument(
            Span::new(start, at),
            TokenFlags::QUOTED,
            1,
        ))
    }

    /// Scans a triple-quoted argument starting at the opening `"""`.
    pub(super) fn scan_triple_quoted(&self, start: usize) -> Result<Token> {
        let src = self.cursor.source();
        let mut at = start + 3;
        loop {
            if src[at.min(src.len())..].starts_with(b"\"\"\"") {
                at += 3;
                break;
            }

            let (ch, len) = match decode(src, at) {
                Decoded::End => return Err(Error::bad_syntax(at, "unclosed quoted")),
                Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                Decoded::Scalar { ch, len } => (ch, len),
            };
            self.check_bidi(ch, at)?;

            if ch == '\\' {
                at += 1;
                let (esc, esc_len) = match decode(src, at) {
                    Decoded::End => {
                        return Err(Error::bad_syntax(at, "incomplete escape sequence"))
                    }
                    Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                    Decoded::Scalar { ch, len } => (ch, len),
                };
                if !char_flags(esc).intersects(CharFlags::ESCAPABLE) {
                    if is_line_terminator(esc) {
                        return Err(Error::bad_syntax(at, "incomplete escape sequence"));
                    }
                    return Err(Error::bad_syntax(at, "illegal escape character"));
                }
                self.check_bidi(esc, at)?;
                at += esc_len;
            } else if is_line_terminator(ch) {
                at += len;
            } else {
                if !char_flags(ch).intersects(CharFlags::ESCAPABLE | CharFlags::SPACE) {
                    return Err(Error::bad_syntax(at, "illegal character"));
                }
                at += len;
            }
        }
        Ok(Token::argument(
            Span::new(start, at),
            TokenFlags::TRIPLE_QUOTED,
            3,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use confetti_util::{ErrorCode, Options};

    fn scan(source: &[u8]) -> Result<Token> {
        let options = Options::default();
        Lexer::new(source, &options)?.peek()
    }

    #[test]
    fn test_simple_quoted() {
        let tok = scan(b"\"hello world\"").unwrap();
        assert_eq!(tok.kind, TokenKind::Argument);
        assert!(tok.flags.contains(TokenFlags::QUOTED));
        assert_eq!(tok.span, Span::new(0, 13));
        assert_eq!(tok.trim, 1);
    }

    #[test]
    fn test_escaped_quote() {
        let tok = scan(br#""he said \"hi\"""#).unwrap();
        assert_eq!(tok.span.len(), 16);
    }

    #[test]
    fn test_unclosed_quoted_at_eof() {
        let err = scan(b"\"abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::BadSyntax);
        assert_eq!(err.offset, 4);
        assert_eq!(err.message, "unclosed quoted");
    }

    #[test]
    fn test_raw_newline_closes_nothing() {
        let err = scan(b"\"abc\ndef\"").unwrap_err();
        assert_eq!(err.message, "unclosed quoted");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_backslash_newline_is_soft_continuation() {
        let tok = scan(b"\"ab\\\ncd\"").unwrap();
        assert_eq!(tok.kind, TokenKind::Argument);
        assert_eq!(tok.span, Span::new(0, 8));
    }

    #[test]
    fn test_incomplete_escape_at_eof() {
        let err = scan(b"\"ab\\").unwrap_err();
        assert_eq!(err.message, "incomplete escape sequence");
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_illegal_escape() {
        // Escaping a tab is not allowed: only argument characters and
        // reserved punctuators may follow a backslash.
        let err = scan(b"\"a\\\tb\"").unwrap_err();
        assert_eq!(err.message, "illegal escape character");
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_triple_quoted_basic() {
        let tok = scan(br#""""abc""""#).unwrap();
        assert!(tok.flags.contains(TokenFlags::TRIPLE_QUOTED));
        assert_eq!(tok.span, Span::new(0, 9));
        assert_eq!(tok.trim, 3);
    }

    #[test]
    fn test_triple_quoted_embedded_newline() {
        let tok = scan(b"\"\"\"line1\nline2\"\"\"").unwrap();
        assert_eq!(tok.span.len(), 17);
    }

    #[test]
    fn test_triple_quoted_embedded_quotes() {
        let tok = scan(b"\"\"\"say \"hi\" now\"\"\"").unwrap();
        assert_eq!(tok.span.len(), 18);
    }

    #[test]
    fn test_triple_quoted_unterminated() {
        let err = scan(b"\"\"\"abc").unwrap_err();
        assert_eq!(err.message, "unclosed quoted");
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn test_triple_quoted_escaped_newline_is_error() {
        let err = scan(b"\"\"\"a\\\nb\"\"\"").unwrap_err();
        assert_eq!(err.message, "incomplete escape sequence");
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn test_bidi_inside_quoted() {
        let err = scan("\"a\u{202E}b\"".as_bytes()).unwrap_err();
        assert_eq!(err.message, "illegal bidirectional character");
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_escaped_bidi_inside_quoted() {
        let err = scan("\"\\\u{202E}\"".as_bytes()).unwrap_err();
        assert_eq!(err.message, "illegal bidirectional character");
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_forbidden_control_inside_quoted() {
        let err = scan(b"\"a\x07b\"").unwrap_err();
        assert_eq!(err.message, "illegal character");
        assert_eq!(err.offset, 2);
    }
}
