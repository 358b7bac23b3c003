//! Event sources: scoped producers with guaranteed release.
//!
//! An [`EventSource`] is anything that can be opened into a finite lazy
//! sequence of events plus a release hook. The driver opens the source,
//! drains it, and releases it exactly once on every exit path, including
//! panics and short-circuit termination. Faults raised while producing the
//! next event surface as `Err(SourceError)` items.

use crate::{error::SourceError, event::Event};

/// A producer of events that must be released after use.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an event source",
    label = "missing `EventSource` implementation",
    note = "Implement `open` to produce an event iterator and a close guard."
)]
pub trait EventSource {
    /// The event type this source produces.
    type Event: Event;
    /// The iterator over produced events.
    type Iter: Iterator<Item = Result<Self::Event, SourceError>>;

    /// Open the source, yielding the event iterator and its release hook.
    fn open(self) -> Result<(Self::Iter, CloseGuard), SourceError>;
}

/// A release hook that fires exactly once.
///
/// The guard latches: the first call to [`close`](CloseGuard::close) runs
/// the hook, every later call (including the one from `Drop`) is a no-op.
/// Dropping an unclosed guard runs the hook, which is what keeps the source
/// released when a driver unwinds.
pub struct CloseGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CloseGuard {
    /// A guard running `release` on close.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Release the source. Idempotent.
    pub fn close(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Whether the release hook has already run (or never existed).
    pub fn is_closed(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CloseGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloseGuard")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Adapter wrapping an infallible iterator of events as a source with a
/// no-op release.
#[derive(Debug, Clone)]
pub struct IterSource<I>(
    /// The events to replay.
    pub I,
);

/// Iterator adapter wrapping each event in `Ok`.
#[derive(Debug)]
pub struct InfallibleEvents<I>(I);

impl<I> InfallibleEvents<I> {
    /// Wrap an iterator that cannot fault.
    pub fn new(iter: I) -> Self {
        Self(iter)
    }
}

impl<I: Iterator> Iterator for InfallibleEvents<I> {
    type Item = Result<I::Item, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Ok)
    }
}

impl<I, E> EventSource for IterSource<I>
where
    I: IntoIterator<Item = E>,
    E: Event,
{
    type Event = E;
    type Iter = InfallibleEvents<I::IntoIter>;

    fn open(self) -> Result<(Self::Iter, CloseGuard), SourceError> {
        Ok((InfallibleEvents(self.0.into_iter()), CloseGuard::noop()))
    }
}

impl<E: Event> EventSource for Vec<E> {
    type Event = E;
    type Iter = InfallibleEvents<std::vec::IntoIter<E>>;

    fn open(self) -> Result<(Self::Iter, CloseGuard), SourceError> {
        IterSource(self).open()
    }
}
