//! Core error types for the Confetti parser.
//!
//! Parsing stops at the first error. Every error carries a stable
//! [`ErrorCode`], the byte offset at which the problem was detected, and a
//! short human-readable description.

use thiserror::Error;

/// Maximum length, in bytes, of an error description.
///
/// The C API this library is wire-compatible with stores descriptions in a
/// fixed 48-byte buffer; every message produced here fits within it.
pub const MAX_DESCRIPTION_LEN: usize = 48;

/// Stable error classification.
///
/// `NO_ERROR` from the C enumeration has no variant: success is the `Ok`
/// arm of [`Result`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A memory allocation failed. Retained for parity with the stable
    /// error set; the default Rust allocator aborts instead of reporting.
    OutOfMemory,
    /// The source text violates the Confetti grammar.
    BadSyntax,
    /// The source text is not valid UTF-8.
    IllegalByteSequence,
    /// The caller-supplied configuration is unusable.
    InvalidOperation,
    /// Directive nesting exceeded the configured maximum depth.
    MaxDepthExceeded,
    /// A walk callback requested cancellation.
    UserAborted,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCode::OutOfMemory => "out of memory",
            ErrorCode::BadSyntax => "bad syntax",
            ErrorCode::IllegalByteSequence => "illegal byte sequence",
            ErrorCode::InvalidOperation => "invalid operation",
            ErrorCode::MaxDepthExceeded => "max depth exceeded",
            ErrorCode::UserAborted => "user aborted",
        };
        write!(f, "{name}")
    }
}

/// A parse failure.
///
/// # Examples
///
/// ```
/// use confetti_util::{Error, ErrorCode};
///
/// let err = Error::bad_syntax(12, "unclosed quoted");
/// assert_eq!(err.code, ErrorCode::BadSyntax);
/// assert_eq!(err.offset, 12);
/// assert_eq!(err.to_string(), "unclosed quoted at byte offset 12");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at byte offset {offset}")]
pub struct Error {
    /// Stable error classification.
    pub code: ErrorCode,
    /// Byte offset into the source at which the error was detected.
    pub offset: usize,
    /// Human-readable description, at most [`MAX_DESCRIPTION_LEN`] bytes.
    pub message: String,
}

impl Error {
    /// Creates a new error.
    pub fn new(code: ErrorCode, offset: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(message.len() <= MAX_DESCRIPTION_LEN);
        Self {
            code,
            offset,
            message,
        }
    }

    /// A grammar violation at the given offset.
    pub fn bad_syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadSyntax, offset, message)
    }

    /// Malformed UTF-8 at the given offset.
    pub fn illegal_byte_sequence(offset: usize) -> Self {
        Self::new(ErrorCode::IllegalByteSequence, offset, "malformed UTF-8")
    }

    /// Unusable caller-supplied configuration.
    pub fn invalid_operation(offset: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidOperation, offset, message)
    }

    /// Nesting depth overflow at the given offset.
    pub fn max_depth_exceeded(offset: usize) -> Self {
        Self::new(
            ErrorCode::MaxDepthExceeded,
            offset,
            "maximum nesting depth exceeded",
        )
    }

    /// Cancellation requested by a walk callback.
    pub fn user_aborted(offset: usize) -> Self {
        Self::new(ErrorCode::UserAborted, offset, "user aborted")
    }
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::bad_syntax(7, "unexpected ';'");
        assert_eq!(err.to_string(), "unexpected ';' at byte offset 7");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::BadSyntax.to_string(), "bad syntax");
        assert_eq!(
            ErrorCode::IllegalByteSequence.to_string(),
            "illegal byte sequence"
        );
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            Error::illegal_byte_sequence(3),
            Error::new(ErrorCode::IllegalByteSequence, 3, "malformed UTF-8")
        );
        assert_eq!(
            Error::max_depth_exceeded(0).message,
            "maximum nesting depth exceeded"
        );
        assert_eq!(Error::user_aborted(9).code, ErrorCode::UserAborted);
    }

    #[test]
    fn test_descriptions_fit_fixed_buffer() {
        for err in [
            Error::illegal_byte_sequence(0),
            Error::max_depth_exceeded(0),
            Error::user_aborted(0),
            Error::bad_syntax(0, "found '}' without matching '{'"),
            Error::invalid_operation(0, "illegal punctuator argument character"),
            Error::new(
                ErrorCode::IllegalByteSequence,
                0,
                "punctuator argument with malformed UTF-8",
            ),
        ] {
            assert!(err.message.len() <= MAX_DESCRIPTION_LEN);
        }
    }
}
