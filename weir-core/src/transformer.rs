//! Transformer trait: factories for re-emitting handlers.

use crate::{event::Event, handler::BoxHandler};

/// An immutable factory for handlers that re-emit a derived stream.
///
/// Where a [`Parser`](crate::Parser) boils a stream down to one result, a
/// transformer emits zero or more values of [`Emitted`](Transformer::Emitted)
/// per input event into a downstream handler. Spawning attaches a fresh
/// transformation stage in front of `downstream`; the returned handler
/// terminates with whatever the downstream terminates with, so transformer
/// stages are transparent to the driver.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Transformer` for `{In}`",
    label = "missing `Transformer` implementation",
    note = "Transformers must implement `spawn`, wiring a downstream handler to an input handler."
)]
pub trait Transformer<In: Event>: Send + Sync {
    /// The derived stream's item type.
    type Emitted: Event;

    /// Build a fresh handler feeding `downstream`.
    fn spawn<Out: 'static>(
        &self,
        downstream: BoxHandler<Self::Emitted, Out>,
    ) -> BoxHandler<In, Out>;
}
