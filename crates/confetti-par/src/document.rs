//! The in-memory document tree.
//!
//! A parsed document is a tree of directives. A directive is nothing but
//! its ordered arguments plus an optional list of subdirectives; there is
//! no distinguished "name" beyond the first argument. Each directive owns
//! one contiguous buffer holding the decoded values of all its arguments,
//! with per-argument metadata indexing into it.

use std::ops::Range;

use confetti_util::Span;

/// A comment's location in the source.
///
/// The raw text, including its `#`, `//`, or `/* */` delimiters, can be
/// recovered by slicing the source with the span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comment {
    /// The comment's byte range in the source.
    pub span: Span,
}

/// Per-argument metadata: where the value lives in the directive's shared
/// buffer and where the lexeme came from.
#[derive(Clone, Debug)]
pub(crate) struct ArgMeta {
    pub(crate) value: Range<usize>,
    pub(crate) span: Span,
    pub(crate) expression: bool,
}

/// A borrowed view of one argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Argument<'a> {
    /// The decoded value: delimiters trimmed, escapes resolved.
    pub value: &'a str,
    /// The argument's lexeme range in the source.
    pub span: Span,
    /// True for a parenthesized expression argument.
    pub is_expression: bool,
}

/// One directive: ordered arguments and ordered subdirectives.
#[derive(Debug, Default)]
pub struct Directive {
    /// Decoded values of all arguments, concatenated.
    pub(crate) values: String,
    pub(crate) args: Vec<ArgMeta>,
    pub(crate) children: Vec<Directive>,
}

impl Directive {
    pub(crate) fn from_parts(values: String, args: Vec<ArgMeta>) -> Self {
        Self {
            values,
            args,
            children: Vec::new(),
        }
    }

    /// Number of arguments.
    pub fn argument_count(&self) -> usize {
        self.args.len()
    }

    /// Returns the argument at `index`, or `None` out of bounds.
    pub fn argument(&self, index: usize) -> Option<Argument<'_>> {
        let meta = self.args.get(index)?;
        Some(Argument {
            value: &self.values[meta.value.clone()],
            span: meta.span,
            is_expression: meta.expression,
        })
    }

    /// Iterates the arguments in source order.
    pub fn arguments(&self) -> impl ExactSizeIterator<Item = Argument<'_>> + '_ {
        self.args.iter().map(|meta| Argument {
            value: &self.values[meta.value.clone()],
            span: meta.span,
            is_expression: meta.expression,
        })
    }

    /// Number of subdirectives.
    pub fn directive_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the subdirective at `index`, or `None` out of bounds.
    pub fn directive(&self, index: usize) -> Option<&Directive> {
        self.children.get(index)
    }

    /// Iterates the subdirectives in source order.
    pub fn directives(&self) -> std::slice::Iter<'_, Directive> {
        self.children.iter()
    }
}

/// A successfully parsed document.
///
/// The document owns the whole directive tree and the comment list;
/// dropping it releases everything.
#[derive(Debug, Default)]
pub struct Document {
    root: Directive,
    comments: Vec<Comment>,
}

impl Document {
    pub(crate) fn new(top_level: Vec<Directive>, comments: Vec<Comment>) -> Self {
        Self {
            root: Directive {
                values: String::new(),
                args: Vec::new(),
                children: top_level,
            },
            comments,
        }
    }

    /// The synthetic, argument-less root containing the top-level
    /// directives.
    pub fn root(&self) -> &Directive {
        &self.root
    }

    /// Number of comments in the source.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Returns the comment at `index`, or `None` out of bounds.
    pub fn comment(&self, index: usize) -> Option<Comment> {
        self.comments.get(index).copied()
    }

    /// All comments, in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_directive() -> Directive {
        Directive::from_parts(
            "foobarbaz".to_string(),
            vec![
                ArgMeta {
                    value: 0..3,
                    span: Span::new(0, 3),
                    expression: false,
                },
                ArgMeta {
                    value: 3..6,
                    span: Span::new(4, 7),
                    expression: false,
                },
                ArgMeta {
                    value: 6..9,
                    span: Span::new(8, 11),
                    expression: true,
                },
            ],
        )
    }

    #[test]
    fn test_argument_access() {
        let dir = sample_directive();
        assert_eq!(dir.argument_count(), 3);
        assert_eq!(dir.argument(0).unwrap().value, "foo");
        assert_eq!(dir.argument(1).unwrap().value, "bar");
        assert_eq!(dir.argument(2).unwrap().value, "baz");
        assert!(dir.argument(2).unwrap().is_expression);
        assert_eq!(dir.argument(3), None);
    }

    #[test]
    fn test_argument_iteration() {
        let dir = sample_directive();
        let values: Vec<&str> = dir.arguments().map(|a| a.value).collect();
        assert_eq!(values, ["foo", "bar", "baz"]);
    }

    #[test]
    fn test_directive_access_bounds_checked() {
        let mut parent = sample_directive();
        parent.children.push(sample_directive());
        assert_eq!(parent.directive_count(), 1);
        assert!(parent.directive(0).is_some());
        assert!(parent.directive(1).is_none());
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new(Vec::new(), Vec::new());
        assert_eq!(doc.root().directive_count(), 0);
        assert_eq!(doc.root().argument_count(), 0);
        assert_eq!(doc.comment_count(), 0);
        assert_eq!(doc.comment(0), None);
    }
}
