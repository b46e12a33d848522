//! Unquoted argument scanning.

use confetti_util::{Error, Result, Span};

use crate::token::{Token, TokenFlags};
use crate::unicode::{char_flags, CharFlags};
use crate::utf8::{decode, Decoded};

use super::Lexer;

impl Lexer<'_> {
    /// Scans an unquoted argument starting at an argument character or a
    /// leading escape.
    ///
    /// The run stops, without consuming the stopping scalar, at the first
    /// non-argument character, at `(` when expression arguments are
    /// enabled, and at any position where a user-declared punctuator
    /// matches.
    pub(super) fn scan_unquoted(&self, start: usize) -> Result<Token> {
        let src = self.cursor.source();
        let mut at = start;
        loop {
            let (ch, len) = match decode(src, at) {
                Decoded::End => break,
                Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                Decoded::Scalar { ch, len } => (ch, len),
            };

            if ch == '\\' {
                at += 1;
                let (esc, esc_len) = match decode(src, at) {
                    Decoded::End => {
                        return Err(Error::bad_syntax(at, "illegal escape character"))
                    }
                    Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                    Decoded::Scalar { ch, len } => (ch, len),
                };
                if !char_flags(esc).intersects(CharFlags::ESCAPABLE) {
                    return Err(Error::bad_syntax(at, "illegal escape character"));
                }
                self.check_bidi(esc, at)?;
                at += esc_len;
                continue;
            }

            let flags = char_flags(ch);
            if !flags.contains(CharFlags::ARGUMENT) {
                break;
            }
            self.check_bidi(ch, at)?;

            // The expression extension reserves '(' as a token of its own.
            if self.options.extensions.expression_arguments && ch == '(' {
                break;
            }

            // A user-declared punctuator beginning here ends this
            // argument; the punctuator becomes the next token.
            if let Some(index) = &self.punctuators {
                if index.longest_match(&src[at..], ch).is_some() {
                    break;
                }
            }

            at += len;
        }
        Ok(Token::argument(Span::new(start, at), TokenFlags::empty(), 0))
    }
}
