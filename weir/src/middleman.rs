//! The context middleman: one inner handler per matched sub-stream.
//!
//! A middleman sits between a splitter and a downstream handler. Every time
//! the splitter opens a sub-stream, the middleman builds a fresh inner
//! handler from its parser factory, relays the sub-stream's events into it,
//! and forwards whatever the inner handler produces to the downstream. Events
//! arriving outside any sub-stream are dropped silently.

use std::sync::Arc;

use weir_core::{BoxHandler, Event, Handler, MatchError, Parsed, SourceError};

/// The parser factory protocol consumed by splitters: given the context
/// extracted at the sub-stream boundary, build a fresh handler for it.
pub type HandlerFactory<Ctx, In, T> =
    Arc<dyn Fn(Ctx) -> BoxHandler<In, Parsed<T>> + Send + Sync>;

/// Relays matched sub-streams into per-sub-stream handlers and funnels
/// their results into one downstream handler.
///
/// The splitter driving this middleman guarantees that sub-streams never
/// nest: `context_start` is not issued while an inner handler is active.
pub struct ContextMiddleman<Ctx, In, T, D> {
    factory: HandlerFactory<Ctx, In, T>,
    inner: Option<BoxHandler<In, Parsed<T>>>,
    downstream: D,
}

impl<Ctx, In, T, D> ContextMiddleman<Ctx, In, T, D>
where
    In: Event,
    T: Clone + Send + 'static,
    D: Handler<Parsed<T>>,
{
    /// Wire a parser factory to a downstream handler.
    pub fn new(factory: HandlerFactory<Ctx, In, T>, downstream: D) -> Self {
        Self {
            factory,
            inner: None,
            downstream,
        }
    }

    /// Whether the downstream handler has already terminated.
    pub fn downstream_finished(&self) -> bool {
        self.downstream.is_finished()
    }

    /// A sub-stream begins. On a successful match a fresh inner handler is
    /// installed; a match failure is surfaced downstream as an error value.
    pub fn context_start(&mut self, extracted: Result<Ctx, MatchError>) -> Option<D::Out> {
        assert!(
            self.inner.is_none(),
            "context_start while a sub-stream is active"
        );
        match extracted {
            Ok(context) => {
                self.inner = Some(self.factory.as_ref()(context));
                None
            }
            Err(e) => self.downstream.handle_input(Parsed::Error(e.into())),
        }
    }

    /// Relay an event into the active inner handler, if any.
    pub fn relay_input(&mut self, input: In) -> Option<D::Out> {
        let Some(inner) = self.inner.as_mut() else {
            return None;
        };
        match inner.handle_input(input) {
            Some(result) => {
                self.inner = None;
                self.downstream.handle_input(result)
            }
            None => None,
        }
    }

    /// Relay a source fault into the active inner handler, if any.
    pub fn relay_error(&mut self, error: SourceError) -> Option<D::Out> {
        let Some(inner) = self.inner.as_mut() else {
            return None;
        };
        match inner.handle_error(error) {
            Some(result) => {
                self.inner = None;
                self.downstream.handle_input(result)
            }
            None => None,
        }
    }

    /// The sub-stream ended structurally: deliver end-of-input to the inner
    /// handler and forward its result.
    pub fn context_end(&mut self) -> Option<D::Out> {
        let Some(mut inner) = self.inner.take() else {
            return None;
        };
        let result = inner.handle_end();
        self.downstream.handle_input(result)
    }

    /// The whole stream ended: finish the active inner handler, then the
    /// downstream.
    pub fn finish(&mut self) -> D::Out {
        if let Some(mut inner) = self.inner.take() {
            let result = inner.handle_end();
            if let Some(out) = self.downstream.handle_input(result) {
                return out;
            }
        }
        self.downstream.handle_end()
    }
}
