//! Handler trait for push-driven stream processing.
//!
//! A handler is the runtime half of the framework: a mutable state machine
//! that a driver pushes events into. Factories ([`Parser`], [`Consumer`],
//! [`Transformer`]) build handler trees; the driver owns the root and is the
//! only entity invoking handler methods.
//!
//! # Lifecycle
//!
//! A handler receives exactly one terminating signal over its lifetime:
//! either a `Some` return from [`handle_input`] / [`handle_error`], or the
//! return value of [`handle_end`]. Finishing is monotonic; once
//! [`is_finished`] reports `true` the owner must stop delivering. Calling a
//! `handle_*` method on a finished handler is a protocol violation on the
//! caller's side, not a recoverable error.
//!
//! [`Parser`]: crate::Parser
//! [`Consumer`]: crate::Consumer
//! [`Transformer`]: crate::Transformer
//! [`handle_input`]: Handler::handle_input
//! [`handle_error`]: Handler::handle_error
//! [`handle_end`]: Handler::handle_end
//! [`is_finished`]: Handler::is_finished

use crate::{error::SourceError, event::Event};

/// A push-driven state machine consuming a stream of `In` and emitting at
/// most one `Out`.
///
/// Handlers are single-owner and single-threaded; they never need to be
/// `Send`. All shared mutability lives inside the handler tree, never across
/// it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle input of type `{In}`",
    label = "missing `Handler<{In}>` implementation",
    note = "Handlers must implement `handle_input`, `handle_error` and `handle_end` for `{In}`."
)]
pub trait Handler<In: Event> {
    /// The result type this handler terminates with.
    type Out: 'static;

    /// Whether this handler has produced its result.
    ///
    /// Transitions `false -> true` at most once and never back.
    fn is_finished(&self) -> bool;

    /// Consume the next event. A `Some` return is the handler's final result.
    fn handle_input(&mut self, input: In) -> Option<Self::Out>;

    /// Observe an input-level fault. Returning `None` absorbs the fault and
    /// the stream continues; `Some` terminates with a result.
    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out>;

    /// The stream is exhausted; produce the final result. Called at most
    /// once, and only if no `handle_*` call returned `Some`.
    fn handle_end(&mut self) -> Self::Out;
}

/// A boxed handler for dynamic dispatch.
pub type BoxHandler<In, Out> = Box<dyn Handler<In, Out = Out>>;

// Allow boxed handlers to be used wherever a Handler is expected.
impl<In, H> Handler<In> for Box<H>
where
    In: Event,
    H: Handler<In> + ?Sized,
{
    type Out = H::Out;

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        (**self).handle_input(input)
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        (**self).handle_error(error)
    }

    fn handle_end(&mut self) -> Self::Out {
        (**self).handle_end()
    }
}
