//! Comment scanning.
//!
//! `# ...` comments are part of the core language. `// ...` and
//! `/* ... */` are recognized only with the C-style comments extension.
//! Comment lexemes include their delimiters; single-line comments stop
//! before the terminating new line.

use confetti_util::{Error, Result, Span};

use crate::token::{Token, TokenKind};
use crate::unicode::{char_flags, is_line_terminator, CharFlags};
use crate::utf8::{decode, Decoded};

use super::Lexer;

impl Lexer<'_> {
    /// Scans a `#` or `//` comment up to (not including) the line end.
    pub(super) fn scan_single_line_comment(&self, start: usize) -> Result<Token> {
        let src = self.cursor.source();
        let mut at = start;
        loop {
            match decode(src, at) {
                Decoded::End => break,
                Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                Decoded::Scalar { ch, len } => {
                    if is_line_terminator(ch) {
                        break;
                    }
                    if char_flags(ch).contains(CharFlags::FORBIDDEN) {
                        return Err(Error::bad_syntax(at, "illegal character"));
                    }
                    self.check_bidi(ch, at)?;
                    at += len;
                }
            }
        }
        Ok(Token::new(TokenKind::Comment, Span::new(start, at)))
    }

    /// Scans a `/* ... */` comment, including the terminator.
    pub(super) fn scan_multi_line_comment(&self, start: usize) -> Result<Token> {
        let src = self.cursor.source();
        let mut at = start;
        loop {
            if matches!(decode(src, at), Decoded::End) {
                return Err(Error::bad_syntax(start, "unterminated multi-line comment"));
            }
            if src[at..].starts_with(b"*/") {
                at += 2;
                break;
            }
            match decode(src, at) {
                Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                Decoded::End => return Err(Error::bad_syntax(start, "unterminated multi-line comment")),
                Decoded::Scalar { ch, len } => {
                    if char_flags(ch).contains(CharFlags::FORBIDDEN) {
                        return Err(Error::bad_syntax(at, "illegal character"));
                    }
                    self.check_bidi(ch, at)?;
                    at += len;
                }
            }
        }
        Ok(Token::new(TokenKind::Comment, Span::new(start, at)))
    }
}
