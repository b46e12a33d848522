//! confetti-par - Parser for the Confetti configuration language.
//!
//! Confetti is a Unix-shell-flavored configuration language: a document
//! is a sequence of directives, each directive an ordered list of string
//! arguments optionally followed by a `{ ... }` block of subdirectives.
//! Arguments may be unquoted, quoted, triple-quoted, or (by extension)
//! parenthesized expressions; every argument value is just a string.
//!
//! Two entry points share one parser:
//!
//! - [`parse`] builds an immutable in-memory [`Document`] tree.
//! - [`walk`] streams [`Event`]s to a callback and keeps nothing.
//!
//! The input is raw bytes in UTF-8. A leading byte-order mark is skipped,
//! a NUL byte ends the input early, and a trailing `U+001A` is ignored.
//!
//! # Examples
//!
//! Building a tree:
//!
//! ```
//! use confetti_par::{parse, Options};
//!
//! let doc = parse(b"server web-1 {\n  listen 8080;\n}", &Options::default()).unwrap();
//! let server = doc.root().directive(0).unwrap();
//! assert_eq!(server.argument(0).unwrap().value, "server");
//! assert_eq!(server.argument(1).unwrap().value, "web-1");
//! let listen = server.directive(0).unwrap();
//! assert_eq!(listen.argument(1).unwrap().value, "8080");
//! ```
//!
//! Streaming:
//!
//! ```
//! use std::ops::ControlFlow;
//! use confetti_par::{walk, Event, Options};
//!
//! let mut names = Vec::new();
//! walk(b"alpha\nbeta\n", &Options::default(), |event| {
//!     if let Event::Directive(args) = event {
//!         names.push(args[0].value.to_string());
//!     }
//!     ControlFlow::Continue(())
//! })
//! .unwrap();
//! assert_eq!(names, ["alpha", "beta"]);
//! ```

mod document;
mod edge_cases;
mod parser;
mod sink;

use std::ops::ControlFlow;

use confetti_lex::Lexer;
use confetti_util::Result;

use crate::parser::Parser;
use crate::sink::{CallbackSink, TreeBuilder};

pub use confetti_util::{Error, ErrorCode, Extensions, Options, Span};
pub use document::{Argument, Comment, Directive, Document};
pub use sink::Event;

/// Parses `source` into an in-memory document tree.
///
/// On failure no document is produced; the error carries the stable code,
/// the byte offset, and a short description.
pub fn parse(source: &[u8], options: &Options) -> Result<Document> {
    let lexer = Lexer::new(source, options)?;
    let parser = Parser::new(lexer, TreeBuilder::new(), options.effective_max_depth());
    let builder = parser.parse_document()?;
    let (top_level, comments) = builder.finish();
    Ok(Document::new(top_level, comments))
}

/// Parses `source`, streaming each element to `callback` instead of
/// building a tree.
///
/// Directive arguments passed to the callback are only valid during the
/// call. Returning [`ControlFlow::Break`] cancels the walk: the parse
/// unwinds, releases everything in flight, and reports `UserAborted` at
/// the current byte offset, and no further events are delivered.
pub fn walk<F>(source: &[u8], options: &Options, callback: F) -> Result<()>
where
    F: FnMut(Event<'_>) -> ControlFlow<()>,
{
    let lexer = Lexer::new(source, options)?;
    let parser = Parser::new(lexer, CallbackSink::new(callback), options.effective_max_depth());
    parser.parse_document()?;
    Ok(())
}
