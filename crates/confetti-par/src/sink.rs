//! Parse sinks: where completed elements go.
//!
//! The parser is a single recursive descent; the only difference between
//! building a tree and streaming events is what happens when a directive
//! completes or a block opens and closes. The [`Sink`] trait captures
//! that seam, with [`TreeBuilder`] linking directives into their parents
//! and [`CallbackSink`] forwarding each element to a caller-supplied
//! closure and dropping it.

use std::ops::ControlFlow;

use confetti_util::{Error, Result};

use crate::document::{Argument, Comment, Directive};

/// An element delivered to a [`walk`](crate::walk) callback.
///
/// Argument data is only valid for the duration of the call; the walk
/// keeps nothing.
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    /// A comment, delivered once, in source order.
    Comment(Comment),
    /// A completed directive with its decoded arguments.
    Directive(&'a [Argument<'a>]),
    /// A `{` opening the previous directive's subdirective block.
    BlockEnter,
    /// The matching `}`.
    BlockLeave,
}

/// Receiver for completed parse elements.
///
/// `at` is the byte offset to attribute to a cancellation, when the sink
/// supports cancelling at all.
pub(crate) trait Sink {
    fn on_comment(&mut self, comment: Comment) -> Result<()>;
    fn on_directive(&mut self, directive: Directive, at: usize) -> Result<()>;
    fn on_block_enter(&mut self, at: usize) -> Result<()>;
    fn on_block_leave(&mut self, at: usize) -> Result<()>;
}

/// Sink that assembles the in-memory tree.
pub(crate) struct TreeBuilder {
    /// One directive list per open block; the first entry is the
    /// top level.
    stack: Vec<Vec<Directive>>,
    comments: Vec<Comment>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            stack: vec![Vec::new()],
            comments: Vec::new(),
        }
    }

    /// Consumes the builder, yielding the top-level directives and the
    /// comment list.
    pub(crate) fn finish(mut self) -> (Vec<Directive>, Vec<Comment>) {
        let top_level = self.stack.pop().unwrap_or_default();
        (top_level, self.comments)
    }
}

impl Sink for TreeBuilder {
    fn on_comment(&mut self, comment: Comment) -> Result<()> {
        self.comments.push(comment);
        Ok(())
    }

    fn on_directive(&mut self, directive: Directive, _at: usize) -> Result<()> {
        if let Some(list) = self.stack.last_mut() {
            list.push(directive);
        }
        Ok(())
    }

    fn on_block_enter(&mut self, _at: usize) -> Result<()> {
        self.stack.push(Vec::new());
        Ok(())
    }

    fn on_block_leave(&mut self, _at: usize) -> Result<()> {
        // The list just closed becomes the children of the directive
        // that opened the block: the last one in the enclosing list.
        if let Some(children) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut().and_then(|list| list.last_mut()) {
                parent.children = children;
            }
        }
        Ok(())
    }
}

/// Sink that forwards each element to a callback and frees it.
pub(crate) struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(Event<'_>) -> ControlFlow<()>,
{
    pub(crate) fn new(callback: F) -> Self {
        Self { callback }
    }

    fn deliver(&mut self, event: Event<'_>, at: usize) -> Result<()> {
        match (self.callback)(event) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => Err(Error::user_aborted(at)),
        }
    }
}

impl<F> Sink for CallbackSink<F>
where
    F: FnMut(Event<'_>) -> ControlFlow<()>,
{
    fn on_comment(&mut self, comment: Comment) -> Result<()> {
        self.deliver(Event::Comment(comment), comment.span.start)
    }

    fn on_directive(&mut self, directive: Directive, at: usize) -> Result<()> {
        let arguments: Vec<Argument<'_>> = directive.arguments().collect();
        self.deliver(Event::Directive(&arguments), at)
    }

    fn on_block_enter(&mut self, at: usize) -> Result<()> {
        self.deliver(Event::BlockEnter, at)
    }

    fn on_block_leave(&mut self, at: usize) -> Result<()> {
        self.deliver(Event::BlockLeave, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confetti_util::{ErrorCode, Span};

    fn directive(values: &str) -> Directive {
        use crate::document::ArgMeta;
        Directive::from_parts(
            values.to_string(),
            vec![ArgMeta {
                value: 0..values.len(),
                span: Span::new(0, values.len()),
                expression: false,
            }],
        )
    }

    #[test]
    fn test_tree_builder_nests_directives() {
        let mut builder = TreeBuilder::new();
        builder.on_directive(directive("outer"), 0).unwrap();
        builder.on_block_enter(5).unwrap();
        builder.on_directive(directive("inner"), 10).unwrap();
        builder.on_block_leave(15).unwrap();
        builder.on_directive(directive("after"), 20).unwrap();

        let (top, comments) = builder.finish();
        assert!(comments.is_empty());
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].directive_count(), 1);
        assert_eq!(top[0].directive(0).unwrap().argument(0).unwrap().value, "inner");
        assert_eq!(top[1].directive_count(), 0);
    }

    #[test]
    fn test_tree_builder_records_comments() {
        let mut builder = TreeBuilder::new();
        builder
            .on_comment(Comment {
                span: Span::new(0, 5),
            })
            .unwrap();
        let (_, comments) = builder.finish();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].span, Span::new(0, 5));
    }

    #[test]
    fn test_callback_sink_break_becomes_user_abort() {
        let mut sink = CallbackSink::new(|_| ControlFlow::Break(()));
        let err = sink.on_directive(directive("x"), 42).unwrap_err();
        assert_eq!(err.code, ErrorCode::UserAborted);
        assert_eq!(err.offset, 42);
        assert_eq!(err.message, "user aborted");
    }

    #[test]
    fn test_callback_sink_comment_abort_uses_comment_offset() {
        let mut sink = CallbackSink::new(|_| ControlFlow::Break(()));
        let err = sink
            .on_comment(Comment {
                span: Span::new(7, 12),
            })
            .unwrap_err();
        assert_eq!(err.offset, 7);
    }
}
