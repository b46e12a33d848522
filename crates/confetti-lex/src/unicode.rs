//! Character classification for the Confetti lexer.
//!
//! Every Unicode scalar maps to a small flag set that drives the scanner:
//! white space, reserved punctuators, argument characters, forbidden
//! characters, and bidirectional formatting characters. The hot ASCII
//! range is resolved with direct comparisons; only scalars outside it
//! consult the Unicode general-category tables.

use bitflags::bitflags;
use confetti_util::{Error, Result};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::utf8::{decode, Decoded};

bitflags! {
    /// Character class membership.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CharFlags: u8 {
        /// Forbidden characters: controls (other than tab and the line
        /// terminators), surrogate halves, and unassigned code points.
        const FORBIDDEN = 0x1;
        /// Inline white space: tab and space.
        const SPACE = 0x2;
        /// The reserved punctuators `"`, `#`, `;`, `{`, and `}`.
        const PUNCTUATOR = 0x4;
        /// Characters that may appear in an unquoted argument.
        const ARGUMENT = 0x8;
        /// Bidirectional formatting characters.
        const BIDI = 0x10;
        /// Characters that may follow a backslash in an escape sequence.
        const ESCAPABLE = Self::ARGUMENT.bits() | Self::PUNCTUATOR.bits();
    }
}

/// Classifies a Unicode scalar value.
///
/// The function is total: every `char` maps to a flag set, possibly empty
/// (the line terminators carry no flags and are recognized positionally).
///
/// # Examples
///
/// ```
/// use confetti_lex::unicode::{char_flags, CharFlags};
///
/// assert_eq!(char_flags(' '), CharFlags::SPACE);
/// assert_eq!(char_flags(';'), CharFlags::PUNCTUATOR);
/// assert!(char_flags('x').contains(CharFlags::ARGUMENT));
/// assert!(char_flags('\u{7}').contains(CharFlags::FORBIDDEN));
/// assert!(char_flags('\u{2066}').contains(CharFlags::BIDI));
/// ```
pub fn char_flags(c: char) -> CharFlags {
    match c {
        '\t' | ' ' => CharFlags::SPACE,
        '"' | '#' | ';' | '{' | '}' => CharFlags::PUNCTUATOR,
        // Line terminators; scanned positionally as new line tokens.
        '\n' | '\u{B}' | '\u{C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}' => CharFlags::empty(),
        // The bidirectional formatting characters are argument characters
        // when `allow_bidi` permits them at all.
        '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' => {
            CharFlags::ARGUMENT | CharFlags::BIDI
        }
        c if c.is_ascii() => {
            if c.is_ascii_control() {
                CharFlags::FORBIDDEN
            } else {
                CharFlags::ARGUMENT
            }
        }
        c => match get_general_category(c) {
            GeneralCategory::Control | GeneralCategory::Surrogate | GeneralCategory::Unassigned => {
                CharFlags::FORBIDDEN
            }
            _ => CharFlags::ARGUMENT,
        },
    }
}

/// Returns true for the single-scalar line terminators.
///
/// `CR LF` is a single two-byte terminator and is handled by
/// [`newline_len`], which checks for it before decoding.
#[inline]
pub fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{B}' | '\u{C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Returns the byte length of the line terminator at `pos`, or `None` if
/// the input does not begin a new line there.
///
/// Malformed UTF-8 at `pos` is an error, exactly as it would be when the
/// scanner decodes the same position.
pub fn newline_len(bytes: &[u8], pos: usize) -> Result<Option<usize>> {
    if bytes.get(pos..pos + 2) == Some(&b"\r\n"[..]) {
        return Ok(Some(2));
    }
    match decode(bytes, pos) {
        Decoded::Scalar { ch, len } if is_line_terminator(ch) => Ok(Some(len)),
        Decoded::Scalar { .. } | Decoded::End => Ok(None),
        Decoded::Malformed => Err(Error::illegal_byte_sequence(pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_characters() {
        assert_eq!(char_flags('\t'), CharFlags::SPACE);
        assert_eq!(char_flags(' '), CharFlags::SPACE);
        // Other Unicode spaces are argument characters in Confetti.
        assert_eq!(char_flags('\u{A0}'), CharFlags::ARGUMENT);
        assert_eq!(char_flags('\u{3000}'), CharFlags::ARGUMENT);
    }

    #[test]
    fn test_reserved_punctuators() {
        for c in ['"', '#', ';', '{', '}'] {
            assert_eq!(char_flags(c), CharFlags::PUNCTUATOR, "{c:?}");
            assert!(char_flags(c).intersects(CharFlags::ESCAPABLE));
        }
    }

    #[test]
    fn test_line_terminators_carry_no_flags() {
        for c in ['\n', '\u{B}', '\u{C}', '\r', '\u{85}', '\u{2028}', '\u{2029}'] {
            assert_eq!(char_flags(c), CharFlags::empty(), "{c:?}");
            assert!(is_line_terminator(c));
        }
    }

    #[test]
    fn test_argument_characters() {
        for c in ['a', 'Z', '0', '_', '-', '.', '/', '\\', '(', ')', 'é', '中'] {
            assert!(char_flags(c).contains(CharFlags::ARGUMENT), "{c:?}");
        }
    }

    #[test]
    fn test_backslash_is_escapable_argument() {
        let flags = char_flags('\\');
        assert!(flags.contains(CharFlags::ARGUMENT));
        assert!(flags.intersects(CharFlags::ESCAPABLE));
    }

    #[test]
    fn test_forbidden_controls() {
        assert!(char_flags('\u{0}').contains(CharFlags::FORBIDDEN));
        assert!(char_flags('\u{7}').contains(CharFlags::FORBIDDEN));
        assert!(char_flags('\u{1A}').contains(CharFlags::FORBIDDEN));
        assert!(char_flags('\u{7F}').contains(CharFlags::FORBIDDEN));
        // C1 controls, except NEL which is a line terminator.
        assert!(char_flags('\u{80}').contains(CharFlags::FORBIDDEN));
        assert!(char_flags('\u{9F}').contains(CharFlags::FORBIDDEN));
    }

    #[test]
    fn test_unassigned_is_forbidden() {
        assert!(char_flags('\u{378}').contains(CharFlags::FORBIDDEN));
        assert!(char_flags('\u{E01F0}').contains(CharFlags::FORBIDDEN));
    }

    #[test]
    fn test_bidi_characters() {
        let bidi = [
            '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}',
            '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}',
        ];
        for c in bidi {
            let flags = char_flags(c);
            assert!(flags.contains(CharFlags::BIDI), "{c:?}");
            assert!(flags.contains(CharFlags::ARGUMENT), "{c:?}");
        }
        // Non-formatting RTL text is ordinary argument text.
        assert_eq!(char_flags('א'), CharFlags::ARGUMENT);
    }

    #[test]
    fn test_newline_len() {
        assert_eq!(newline_len(b"\r\nx", 0), Ok(Some(2)));
        assert_eq!(newline_len(b"\nx", 0), Ok(Some(1)));
        assert_eq!(newline_len(b"\rx", 0), Ok(Some(1)));
        assert_eq!(newline_len("\u{85}x".as_bytes(), 0), Ok(Some(2)));
        assert_eq!(newline_len("\u{2028}".as_bytes(), 0), Ok(Some(3)));
        assert_eq!(newline_len(b"x", 0), Ok(None));
        assert_eq!(newline_len(b"", 0), Ok(None));
    }

    #[test]
    fn test_newline_len_malformed() {
        assert!(newline_len(b"\x80", 0).is_err());
    }
}
