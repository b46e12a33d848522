//! Expression argument scanning.
//!
//! With the expression-arguments extension, a parenthesized group forms a
//! single argument. Parentheses nest via a depth counter; the token ends
//! at the parenthesis that brings the depth back to zero.

use confetti_util::{Error, Result, Span};

use crate::token::{Token, TokenFlags};
use crate::unicode::{char_flags, CharFlags};
use crate::utf8::{decode, Decoded};

use super::Lexer;

impl Lexer<'_> {
    /// Scans an expression argument starting at the opening `(`.
    pub(super) fn scan_expression(&self, start: usize) -> Result<Token> {
        let src = self.cursor.source();
        let mut at = start + 1;
        let mut depth = 1usize;
        loop {
            match src.get(at).copied() {
                None | Some(0) => {
                    return Err(Error::bad_syntax(start, "incomplete expression"))
                }
                Some(b'(') => {
                    depth += 1;
                    at += 1;
                }
                Some(b')') => {
                    depth -= 1;
                    at += 1;
                    if depth == 0 {
                        break;
                    }
                }
                Some(_) => match decode(src, at) {
                    Decoded::End => {
                        return Err(Error::bad_syntax(start, "incomplete expression"))
                    }
                    Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                    Decoded::Scalar { ch, len } => {
                        if char_flags(ch).contains(CharFlags::FORBIDDEN) {
                            return Err(Error::bad_syntax(at, "illegal character"));
                        }
                        self.check_bidi(ch, at)?;
                        at += len;
                    }
                },
            }
        }
        Ok(Token::argument(
            Span::new(start, at),
            TokenFlags::EXPRESSION,
            1,
        ))
    }
}
