//! Token types produced by the lexer.

use bitflags::bitflags;
use confetti_util::Span;
use static_assertions::const_assert;

/// The kind of a lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// An argument in any of its forms; see [`TokenFlags`].
    Argument,
    /// A comment. Never surfaced to the parser; routed to the comment
    /// side channel instead.
    Comment,
    /// A maximal run of inline white space. Never surfaced to the parser.
    Whitespace,
    /// A line terminator (`CR LF` counts as one token).
    Newline,
    /// A backslash immediately followed by a line terminator.
    Continuation,
    /// The `;` directive terminator.
    Semicolon,
    /// The `{` subdirective opener.
    LBrace,
    /// The `}` subdirective closer.
    RBrace,
    /// End of input.
    Eof,
}

bitflags! {
    /// Flags describing the surface form of an argument token.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u8 {
        /// Single-quoted argument.
        const QUOTED = 0x1;
        /// Triple-quoted argument.
        const TRIPLE_QUOTED = 0x2;
        /// Parenthesized expression argument.
        const EXPRESSION = 0x4;
    }
}

/// A single token.
///
/// Tokens are ephemeral: the lexer holds at most one of look-ahead, and
/// the parser copies out what it needs. `trim` is the number of bytes to
/// strip from each end of the lexeme when the token is materialized into
/// a value (the enclosing quotes or parentheses).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// The lexeme's byte range in the source.
    pub span: Span,
    /// Token classification.
    pub kind: TokenKind,
    /// Surface-form flags; empty for non-argument tokens.
    pub flags: TokenFlags,
    /// Bytes to strip from each end during value materialization.
    pub trim: u8,
}

// Tokens are copied on every peek; keep them register-friendly.
const_assert!(std::mem::size_of::<Token>() <= 32);

impl Token {
    /// Creates a token with no flags and no trim.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            span,
            kind,
            flags: TokenFlags::empty(),
            trim: 0,
        }
    }

    /// Creates an argument token.
    pub fn argument(span: Span, flags: TokenFlags, trim: u8) -> Self {
        Self {
            span,
            kind: TokenKind::Argument,
            flags,
            trim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_token() {
        let tok = Token::new(TokenKind::Semicolon, Span::new(4, 5));
        assert_eq!(tok.kind, TokenKind::Semicolon);
        assert_eq!(tok.span.len(), 1);
        assert_eq!(tok.flags, TokenFlags::empty());
        assert_eq!(tok.trim, 0);
    }

    #[test]
    fn test_argument_token() {
        let tok = Token::argument(Span::new(0, 5), TokenFlags::QUOTED, 1);
        assert_eq!(tok.kind, TokenKind::Argument);
        assert!(tok.flags.contains(TokenFlags::QUOTED));
        assert_eq!(tok.trim, 1);
    }
}
