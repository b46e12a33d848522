//! Recursive-descent parser for the Confetti grammar.
//!
//! The grammar over the lexer's token stream:
//!
//! ```ebnf
//! document  = body EOF ;
//! body      = { NEWLINE | directive } ;
//! directive = ARGUMENT { ARGUMENT | CONTINUATION } rest ;
//! rest      = ";"
//!           | { NEWLINE } "{" body "}" [ ";" ]
//!           | (* empty *) ;
//! ```
//!
//! Line continuations are transparent inside a directive's argument run:
//! they neither start nor end it. A `}` ends the body it appears in; at
//! the top level there is no body to end, which is the one syntax error
//! detected after the top-level body returns.
//!
//! Directive materialization is two-pass. The argument run is first
//! scanned with the lexer rewound afterwards, counting arguments and
//! summing decoded lengths; the run is then re-scanned into one
//! exactly-sized value buffer plus one metadata vector, so every
//! directive costs two allocations regardless of its argument count.

use confetti_lex::{Lexer, Token, TokenFlags, TokenKind};
use confetti_util::{Error, Result};

use crate::document::{ArgMeta, Comment, Directive};
use crate::sink::Sink;

/// Single-pass parser driving a [`Sink`].
pub(crate) struct Parser<'a, S> {
    lexer: Lexer<'a>,
    sink: S,
    max_depth: usize,
}

impl<'a, S: Sink> Parser<'a, S> {
    pub(crate) fn new(lexer: Lexer<'a>, sink: S, max_depth: usize) -> Self {
        Self {
            lexer,
            sink,
            max_depth,
        }
    }

    /// Parses a whole document, returning the sink on success.
    pub(crate) fn parse_document(mut self) -> Result<S> {
        self.parse_body(0)?;

        // The only way parse_body returns with input left is a closer
        // that no body claims.
        let tok = self.peek()?;
        if tok.kind != TokenKind::Eof {
            return Err(Error::bad_syntax(
                self.lexer.offset(),
                "found '}' without matching '{'",
            ));
        }
        Ok(self.sink)
    }

    /// Peeks the next significant token, forwarding any comments that
    /// surfaced to the sink first.
    fn peek(&mut self) -> Result<Token> {
        let tok = self.lexer.peek()?;
        self.forward_comments()?;
        Ok(tok)
    }

    /// Consumes the next significant token.
    fn bump(&mut self) -> Result<Token> {
        let tok = self.lexer.bump()?;
        self.forward_comments()?;
        Ok(tok)
    }

    fn forward_comments(&mut self) -> Result<()> {
        for span in self.lexer.take_comments() {
            self.sink.on_comment(Comment { span })?;
        }
        Ok(())
    }

    /// Parses a run of directives: the whole document, or the inside of a
    /// `{ ... }` block.
    fn parse_body(&mut self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(Error::max_depth_exceeded(self.lexer.offset()));
        }

        loop {
            let tok = self.peek()?;
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Argument => self.parse_directive(depth)?,
                TokenKind::Newline => {
                    self.bump()?;
                }
                // The caller consumes the closer; at the top level the
                // document check reports it.
                TokenKind::RBrace => break,
                TokenKind::Continuation => {
                    return Err(Error::bad_syntax(
                        self.lexer.offset(),
                        "unexpected line continuation",
                    ));
                }
                TokenKind::Semicolon => {
                    return Err(Error::bad_syntax(self.lexer.offset(), "unexpected ';'"));
                }
                TokenKind::LBrace => {
                    return Err(Error::bad_syntax(self.lexer.offset(), "unexpected '{'"));
                }
                TokenKind::Comment | TokenKind::Whitespace => {
                    unreachable!("filtered by the lexer's peek")
                }
            }
        }
        Ok(())
    }

    /// Parses one directive: its argument run, then an optional `;` or
    /// subdirective block.
    fn parse_directive(&mut self, depth: usize) -> Result<()> {
        // Pass one: count the arguments and their total decoded size.
        let saved = self.lexer.save();
        let mut argument_count = 0;
        let mut buffer_len = 0;
        loop {
            let tok = self.peek()?;
            match tok.kind {
                TokenKind::Argument => {
                    argument_count += 1;
                    buffer_len += self.lexer.value_len(&tok)?;
                    self.bump()?;
                }
                TokenKind::Continuation => {
                    self.bump()?;
                }
                _ => break,
            }
        }
        self.lexer.restore(saved);

        // Pass two: materialize into exactly-sized storage.
        let mut values = String::with_capacity(buffer_len);
        let mut args = Vec::with_capacity(argument_count);
        let mut tok = self.peek()?;
        loop {
            match tok.kind {
                TokenKind::Argument => {
                    let start = values.len();
                    self.lexer.append_value(&tok, &mut values)?;
                    args.push(ArgMeta {
                        value: start..values.len(),
                        span: tok.span,
                        expression: tok.flags.contains(TokenFlags::EXPRESSION),
                    });
                    self.bump()?;
                }
                TokenKind::Continuation => {
                    self.bump()?;
                }
                _ => break,
            }
            tok = self.peek()?;
        }

        self.sink
            .on_directive(Directive::from_parts(values, args), self.lexer.offset())?;

        // Optional terminating semicolon: ends the directive, forbids a
        // block.
        if tok.kind == TokenKind::Semicolon {
            self.bump()?;
            return Ok(());
        }

        // The opening brace may sit on a later line.
        while tok.kind == TokenKind::Newline {
            self.bump()?;
            tok = self.peek()?;
        }

        if tok.kind == TokenKind::LBrace {
            self.bump()?;
            self.sink.on_block_enter(self.lexer.offset())?;
            self.parse_body(depth + 1)?;

            let closer = self.peek()?;
            if closer.kind != TokenKind::RBrace {
                return Err(Error::bad_syntax(self.lexer.offset(), "expected '}'"));
            }
            self.bump()?;
            self.sink.on_block_leave(self.lexer.offset())?;

            // A redundant semicolon after the block is tolerated.
            if self.peek()?.kind == TokenKind::Semicolon {
                self.bump()?;
            }
        }
        Ok(())
    }
}
