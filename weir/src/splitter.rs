//! The splitter: slicing an event stream into matched sub-streams.
//!
//! A [`Splitter`] pairs a [`ContextMatcher`] with a parser; the resulting
//! transformer watches the context stack, opens a sub-stream whenever the
//! matcher accepts the post-push stack, and feeds the sub-stream (including
//! its opening event) into a fresh inner handler through a
//! [`ContextMiddleman`]. Sub-streams close structurally: the matcher runs
//! only on entry, and the sub-stream ends when the stack depth drops below
//! the depth recorded at the match.
//!
//! ```rust,ignore
//! let dates = Splitter::new(elem("blog") / elem("post")).as_list_of(attr("date"));
//! ```
//!
//! [`ContextMiddleman`]: crate::ContextMiddleman

use std::sync::Arc;

use tracing::trace;
use weir_core::{
    BoxHandler, ContextChange, ContextMatcher, ContextTracker, ContextualEvent, Handler, Parsed,
    Parser, SourceError, Transformer,
};

use crate::combinator::{ParseFirst, ParseToList};
use crate::middleman::{ContextMiddleman, HandlerFactory};

/// A factory for sub-stream extracting transformers.
#[derive(Debug, Clone)]
pub struct Splitter<M> {
    matcher: M,
}

impl<M> Splitter<M> {
    /// A splitter opening a sub-stream wherever `matcher` accepts the
    /// context stack.
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    /// Run `parser` on every matched sub-stream, emitting one result per
    /// sub-stream.
    pub fn through<In, P>(
        self,
        parser: P,
    ) -> SplitTransformer<M, <M as ContextMatcher<In::Frame>>::Context, In, P::Output>
    where
        In: ContextualEvent,
        M: ContextMatcher<In::Frame>,
        P: Parser<In> + 'static,
    {
        SplitTransformer {
            matcher: self.matcher,
            factory: Arc::new(move |_context| parser.make_handler()),
        }
    }

    /// Like [`through`](Splitter::through), but the parser is built from the
    /// context value the matcher extracted at the sub-stream boundary.
    pub fn through_with<In, P, F>(
        self,
        make: F,
    ) -> SplitTransformer<M, <M as ContextMatcher<In::Frame>>::Context, In, P::Output>
    where
        In: ContextualEvent,
        M: ContextMatcher<In::Frame>,
        P: Parser<In> + 'static,
        F: Fn(<M as ContextMatcher<In::Frame>>::Context) -> P + Send + Sync + 'static,
    {
        SplitTransformer {
            matcher: self.matcher,
            factory: Arc::new(move |context| make(context).make_handler()),
        }
    }

    /// Run `parser` on the first matched sub-stream only; events past its
    /// end are never consumed.
    pub fn first<In, P>(
        self,
        parser: P,
    ) -> ParseFirst<SplitTransformer<M, <M as ContextMatcher<In::Frame>>::Context, In, P::Output>>
    where
        In: ContextualEvent,
        M: ContextMatcher<In::Frame>,
        P: Parser<In> + 'static,
    {
        ParseFirst::new(self.through(parser))
    }

    /// Collect the result of `parser` across every matched sub-stream, in
    /// first-seen order.
    pub fn as_list_of<In, P>(
        self,
        parser: P,
    ) -> ParseToList<SplitTransformer<M, <M as ContextMatcher<In::Frame>>::Context, In, P::Output>>
    where
        In: ContextualEvent,
        M: ContextMatcher<In::Frame>,
        P: Parser<In> + 'static,
    {
        ParseToList::new(self.through(parser))
    }
}

/// A transformer emitting one [`Parsed`] result per matched sub-stream.
///
/// Created by [`Splitter::through`] and [`Splitter::through_with`].
pub struct SplitTransformer<M, Ctx, In, T> {
    matcher: M,
    factory: HandlerFactory<Ctx, In, T>,
}

impl<M: Clone, Ctx, In, T> Clone for SplitTransformer<M, Ctx, In, T> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<M, Ctx, In, T> Transformer<In> for SplitTransformer<M, Ctx, In, T>
where
    In: ContextualEvent,
    M: ContextMatcher<In::Frame, Context = Ctx> + Clone + 'static,
    Ctx: 'static,
    T: Clone + Send + 'static,
{
    type Emitted = Parsed<T>;

    fn spawn<Out: 'static>(&self, downstream: BoxHandler<Parsed<T>, Out>) -> BoxHandler<In, Out> {
        Box::new(SplitterHandler {
            matcher: self.matcher.clone(),
            tracker: ContextTracker::new(),
            open_depth: None,
            middleman: ContextMiddleman::new(Arc::clone(&self.factory), downstream),
            finished: false,
        })
    }
}

/// The splitter's runtime: tracks the context stack, opens sub-streams at
/// matches and closes them when the stack depth drops below the depth
/// recorded at the match point.
struct SplitterHandler<M, Ctx, In, T, D>
where
    In: ContextualEvent,
{
    matcher: M,
    tracker: ContextTracker<In::Frame>,
    open_depth: Option<usize>,
    middleman: ContextMiddleman<Ctx, In, T, D>,
    finished: bool,
}

impl<M, Ctx, In, T, D> Handler<In> for SplitterHandler<M, Ctx, In, T, D>
where
    In: ContextualEvent,
    M: ContextMatcher<In::Frame, Context = Ctx>,
    T: Clone + Send + 'static,
    D: Handler<Parsed<T>>,
{
    type Out = D::Out;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        match input.context_change() {
            ContextChange::Push(frame) => {
                self.tracker.push(frame);
                if self.open_depth.is_none() {
                    if let Some(extracted) = self.matcher.apply(self.tracker.frames()) {
                        trace!(depth = self.tracker.depth(), "sub-stream opened");
                        self.open_depth = Some(self.tracker.depth());
                        if let Some(out) = self.middleman.context_start(extracted) {
                            self.finished = true;
                            return Some(out);
                        }
                    }
                }
            }
            ContextChange::Pop => {
                self.tracker.pop();
            }
            ContextChange::Stay => {}
        }

        if let Some(out) = self.middleman.relay_input(input) {
            self.finished = true;
            return Some(out);
        }

        if let Some(depth) = self.open_depth {
            if self.tracker.depth() < depth {
                trace!(depth, "sub-stream closed");
                self.open_depth = None;
                if let Some(out) = self.middleman.context_end() {
                    self.finished = true;
                    return Some(out);
                }
            }
        }
        None
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        if let Some(out) = self.middleman.relay_error(error) {
            self.finished = true;
            return Some(out);
        }
        None
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        self.middleman.finish()
    }
}
