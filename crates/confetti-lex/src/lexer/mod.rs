//! The Confetti lexer.
//!
//! The lexer produces a lazy, rewindable single-token look-ahead over the
//! source bytes. [`Lexer::peek`] is idempotent and never surfaces white
//! space or comments: white space is skipped silently, and comments are
//! routed to a side channel ([`Lexer::take_comments`]) at most once per
//! source position.
//!
//! The parser rewinds the lexer when it pre-scans a directive's argument
//! run to size buffers. [`Lexer::save`] / [`Lexer::restore`] capture the
//! position and the look-ahead slot; the comment high-water mark is
//! deliberately not part of that state, which is what keeps a replayed
//! comment from being reported twice.

mod argument;
mod comment;
mod expression;
mod quoted;
mod value;

use confetti_util::{Error, Options, Result, Span};

use crate::cursor::Cursor;
use crate::punctuator::PunctuatorIndex;
use crate::token::{Token, TokenFlags, TokenKind};
use crate::unicode::{char_flags, newline_len, CharFlags};
use crate::utf8::{decode, Decoded};

/// A saved lexer position for rewinding.
#[derive(Clone, Copy, Debug)]
pub struct LexerState {
    pos: usize,
    peeked: Option<Token>,
}

/// Tokenizer over a Confetti source buffer.
///
/// The input is raw bytes: a NUL byte terminates it early, and a leading
/// UTF-8 byte-order mark is skipped on construction.
pub struct Lexer<'a> {
    /// Cursor over the source bytes.
    cursor: Cursor<'a>,
    /// Caller-supplied configuration.
    options: &'a Options,
    /// Index of user-declared punctuator arguments, when that extension
    /// supplies any.
    punctuators: Option<PunctuatorIndex>,
    /// Single-slot look-ahead.
    peeked: Option<Token>,
    /// Comments seen but not yet drained by the parser.
    pending_comments: Vec<Span>,
    /// End offset of the last comment surfaced. Comments starting below
    /// this mark are replays after a rewind and are skipped.
    comment_mark: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    ///
    /// Punctuator-argument validation happens here, before any scanning,
    /// so an unusable extension list fails fast with `InvalidOperation`.
    pub fn new(source: &'a [u8], options: &'a Options) -> Result<Self> {
        let punctuators = PunctuatorIndex::build(
            &options.extensions.punctuator_arguments,
            options.extensions.expression_arguments,
        )?;

        let mut cursor = Cursor::new(source);
        if cursor.starts_with(b"\xEF\xBB\xBF") {
            cursor.advance(3);
        }

        Ok(Self {
            cursor,
            options,
            punctuators,
            peeked: None,
            pending_comments: Vec::new(),
            comment_mark: 0,
        })
    }

    /// Returns the current byte offset: the start of the peeked token, or
    /// the next position to scan.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor.pos()
    }

    /// Returns the source buffer.
    #[inline]
    pub fn source(&self) -> &'a [u8] {
        self.cursor.source()
    }

    /// Returns the next significant token without consuming it.
    ///
    /// White space tokens are skipped; comment tokens are recorded on the
    /// side channel (once per source position) and skipped.
    pub fn peek(&mut self) -> Result<Token> {
        if let Some(tok) = self.peeked {
            return Ok(tok);
        }
        loop {
            let tok = self.scan_token()?;
            match tok.kind {
                TokenKind::Whitespace => {
                    self.cursor.set_pos(tok.span.end);
                }
                TokenKind::Comment => {
                    if self.comment_mark <= tok.span.start {
                        self.pending_comments.push(tok.span);
                        self.comment_mark = tok.span.end;
                    }
                    self.cursor.set_pos(tok.span.end);
                }
                _ => {
                    self.peeked = Some(tok);
                    return Ok(tok);
                }
            }
        }
    }

    /// Consumes and returns the next significant token.
    pub fn bump(&mut self) -> Result<Token> {
        let tok = self.peek()?;
        self.cursor.set_pos(tok.span.end);
        self.peeked = None;
        Ok(tok)
    }

    /// Captures the current position and look-ahead slot.
    pub fn save(&self) -> LexerState {
        LexerState {
            pos: self.cursor.pos(),
            peeked: self.peeked,
        }
    }

    /// Rewinds to a previously captured state.
    ///
    /// The comment high-water mark survives the rewind, so comments the
    /// replayed region already surfaced stay surfaced exactly once.
    pub fn restore(&mut self, state: LexerState) {
        self.cursor.set_pos(state.pos);
        self.peeked = state.peeked;
    }

    /// Drains the comments recorded since the last call, in source order.
    pub fn take_comments(&mut self) -> Vec<Span> {
        std::mem::take(&mut self.pending_comments)
    }

    /// Scans one raw token at the current position without consuming it.
    fn scan_token(&self) -> Result<Token> {
        let start = self.cursor.pos();
        let src = self.cursor.source();

        if self.cursor.byte_at(0) == Some(b'#') {
            return self.scan_single_line_comment(start);
        }
        if self.options.extensions.c_style_comments {
            if self.cursor.starts_with(b"//") {
                return self.scan_single_line_comment(start);
            }
            if self.cursor.starts_with(b"/*") {
                return self.scan_multi_line_comment(start);
            }
        }

        if let Some(len) = newline_len(src, start)? {
            return Ok(Token::new(TokenKind::Newline, Span::new(start, start + len)));
        }

        let ch = match self.cursor.decode() {
            Decoded::Scalar { ch, .. } => ch,
            Decoded::End => return Ok(Token::new(TokenKind::Eof, Span::point(start))),
            Decoded::Malformed => return Err(Error::illegal_byte_sequence(start)),
        };
        let flags = char_flags(ch);

        if flags.contains(CharFlags::SPACE) {
            return self.scan_whitespace(start);
        }

        if flags.contains(CharFlags::BIDI) && !self.options.allow_bidi {
            return Err(Error::bad_syntax(start, "illegal bidirectional character"));
        }

        // User-declared punctuators take priority over every argument
        // form, including the expression extension.
        if let Some(index) = &self.punctuators {
            if let Some(len) = index.longest_match(&src[start..], ch) {
                return Ok(Token::argument(
                    Span::new(start, start + len),
                    TokenFlags::empty(),
                    0,
                ));
            }
        }

        if self.options.extensions.expression_arguments && ch == '(' {
            return self.scan_expression(start);
        }

        match ch {
            '{' => return Ok(Token::new(TokenKind::LBrace, Span::new(start, start + 1))),
            '}' => return Ok(Token::new(TokenKind::RBrace, Span::new(start, start + 1))),
            '"' => {
                return if self.cursor.starts_with(b"\"\"\"") {
                    self.scan_triple_quoted(start)
                } else {
                    self.scan_single_quoted(start)
                };
            }
            ';' => return Ok(Token::new(TokenKind::Semicolon, Span::new(start, start + 1))),
            _ => {}
        }

        if ch == '\\' {
            if let Some(len) = newline_len(src, start + 1)? {
                return Ok(Token::new(
                    TokenKind::Continuation,
                    Span::new(start, start + 1 + len),
                ));
            }
        }

        if flags.contains(CharFlags::ARGUMENT) {
            return self.scan_unquoted(start);
        }

        // A Control-Z as the very last character is a legacy end-of-file
        // marker and is treated as end of input.
        if ch == '\u{1A}' && matches!(self.cursor.byte_at(1), None | Some(0)) {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        }

        Err(Error::bad_syntax(
            start,
            format!("illegal character U+{:04X}", ch as u32),
        ))
    }

    /// Scans a maximal run of inline white space.
    fn scan_whitespace(&self, start: usize) -> Result<Token> {
        let src = self.cursor.source();
        let mut at = start;
        loop {
            match decode(src, at) {
                Decoded::Scalar { ch, len } if char_flags(ch).contains(CharFlags::SPACE) => {
                    at += len;
                }
                Decoded::Malformed => return Err(Error::illegal_byte_sequence(at)),
                _ => break,
            }
        }
        Ok(Token::new(TokenKind::Whitespace, Span::new(start, at)))
    }

    /// Reports a bidi character at `at` unless the options allow them.
    fn check_bidi(&self, ch: char, at: usize) -> Result<()> {
        if char_flags(ch).contains(CharFlags::BIDI) && !self.options.allow_bidi {
            return Err(Error::bad_syntax(at, "illegal bidirectional character"));
        }
        Ok(())
    }
}
