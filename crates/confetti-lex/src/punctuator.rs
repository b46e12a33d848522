//! Index of user-declared punctuator arguments.
//!
//! When the punctuator-arguments extension is enabled, the caller supplies
//! literal byte strings that the lexer promotes to stand-alone arguments.
//! The index groups those strings by their starting scalar so the hot
//! query — "does a declared punctuator begin here?" — touches only the
//! strings sharing that starter.

use std::hash::BuildHasherDefault;

use confetti_util::{Error, ErrorCode, Result};
use indexmap::IndexMap;
use rustc_hash::FxHasher;

use crate::unicode::{char_flags, CharFlags};
use crate::utf8::{decode, Decoded};

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Longest-match lookup table for punctuator arguments.
#[derive(Clone, Debug, Default)]
pub struct PunctuatorIndex {
    /// Punctuators grouped by starting scalar, in declaration order.
    by_starter: FxIndexMap<char, Vec<Box<str>>>,
}

impl PunctuatorIndex {
    /// Builds the index from the extension's byte-string list.
    ///
    /// Each string is decoded like source text: a NUL byte ends it early,
    /// and malformed UTF-8 is rejected with `IllegalByteSequence`. Empty
    /// strings are skipped. Every remaining scalar must be an argument
    /// character; when the expression-arguments extension is also
    /// enabled, `(` and `)` are additionally reserved. Returns `None`
    /// when no usable punctuators remain.
    ///
    /// Validation failures are reported before any scanning begins, so
    /// the error offset is always zero.
    pub fn build(punctuators: &[Vec<u8>], expression_arguments: bool) -> Result<Option<Self>> {
        let mut by_starter: FxIndexMap<char, Vec<Box<str>>> = FxIndexMap::default();

        for bytes in punctuators {
            let mut text = String::new();
            let mut at = 0;
            loop {
                match decode(bytes, at) {
                    Decoded::End => break,
                    Decoded::Malformed => {
                        return Err(Error::new(
                            ErrorCode::IllegalByteSequence,
                            0,
                            "punctuator argument with malformed UTF-8",
                        ));
                    }
                    Decoded::Scalar { ch, len } => {
                        let reserved_paren = expression_arguments && (ch == '(' || ch == ')');
                        if reserved_paren || !char_flags(ch).contains(CharFlags::ARGUMENT) {
                            return Err(Error::invalid_operation(
                                0,
                                "illegal punctuator argument character",
                            ));
                        }
                        text.push(ch);
                        at += len;
                    }
                }
            }

            let starter = match text.chars().next() {
                Some(c) => c,
                None => continue,
            };
            by_starter
                .entry(starter)
                .or_default()
                .push(text.into_boxed_str());
        }

        if by_starter.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Self { by_starter }))
        }
    }

    /// Returns the byte length of the longest declared punctuator that
    /// prefixes `rest`, given the scalar that begins there.
    pub fn longest_match(&self, rest: &[u8], starter: char) -> Option<usize> {
        let bucket = self.by_starter.get(&starter)?;
        let mut longest = 0;
        for punctuator in bucket {
            if punctuator.len() > longest && rest.starts_with(punctuator.as_bytes()) {
                longest = punctuator.len();
            }
        }
        (longest > 0).then_some(longest)
    }
}
