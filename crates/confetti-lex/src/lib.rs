//! confetti-lex - Lexical analysis for the Confetti configuration
//! language.
//!
//! The lexer turns raw source bytes into a stream of tokens: arguments in
//! their four surface forms (unquoted, quoted, triple-quoted, expression),
//! the structural punctuators `{`, `}`, and `;`, new lines, line
//! continuations, and end-of-input. White space and comments never reach
//! the parser; comments are reported through a side channel instead.
//!
//! The pipeline under the hood:
//!
//! - [`utf8`]: a table-driven DFA decoder from bytes to scalars,
//! - [`unicode`]: character classification (space, punctuator, argument,
//!   forbidden, bidi),
//! - [`cursor`]: the byte cursor shared by the scanning routines,
//! - [`punctuator`]: longest-match index for user-declared punctuator
//!   arguments,
//! - [`lexer`]: the rewindable single-token look-ahead itself.

pub mod cursor;
pub mod lexer;
pub mod punctuator;
pub mod token;
pub mod unicode;
pub mod utf8;

mod edge_cases;

pub use lexer::{Lexer, LexerState};
pub use punctuator::PunctuatorIndex;
pub use token::{Token, TokenFlags, TokenKind};
