//! Consumer trait: driver-level handler factories.

use crate::{event::Event, handler::BoxHandler};

/// An immutable factory for the root handler of a driver run.
///
/// Unlike a [`Parser`](crate::Parser), a consumer's output is not forced
/// into a [`Parsed`](crate::Parsed) shape; it is whatever its handler
/// terminates with. The driver builds one handler per run, pushes the whole
/// stream into it, and returns the result.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Consumer` for `{In}`",
    label = "missing `Consumer` implementation",
    note = "Consumers must implement `make_handler` producing a root handler for `{In}`."
)]
pub trait Consumer<In: Event>: Send + Sync {
    /// The value a full driver run produces.
    type Output: 'static;

    /// Build a fresh root handler.
    fn make_handler(&self) -> BoxHandler<In, Self::Output>;
}
