//! confetti-util - Foundation types for the Confetti parser.
//!
//! This crate provides the types shared by the lexer and parser crates:
//!
//! - [`Span`]: a byte-offset range into the source text. Confetti reports
//!   source locations as byte offsets only, so there is no line/column or
//!   file-id tracking here.
//! - [`Error`] and [`ErrorCode`]: the single error value a parse can
//!   produce. Parsing stops at the first error; there is no recovery or
//!   multi-error collection.
//! - [`Options`] and [`Extensions`]: caller-supplied configuration,
//!   including the opt-in syntax extensions.

pub mod error;
pub mod options;
pub mod span;

pub use error::{Error, ErrorCode, Result};
pub use options::{Extensions, Options, DEFAULT_MAX_DEPTH};
pub use span::Span;
