//! Testing utilities for weir.
//!
//! This module provides doubles for exercising handlers, drivers and
//! transformers:
//!
//! - [`RecordingHandler`]: a handler that records everything it receives
//! - [`ScriptedSource`]: an event source with fault injection and a close
//!   probe for release assertions

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use weir_core::{CloseGuard, Event, EventSource, Handler, SourceError};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records all inputs, faults and end signals it receives.
///
/// Terminates with the number of inputs seen. By default it only finishes at
/// end-of-input; [`finish_after`](RecordingHandler::finish_after) makes it
/// short-circuit, which is how driver cancellation is exercised.
///
/// # Example
///
/// ```rust,ignore
/// let handler = RecordingHandler::new();
/// let probe = handler.probe();
///
/// drive(events, &mut handler)?;
///
/// assert_eq!(probe.inputs().len(), 3);
/// assert_eq!(probe.end_count(), 1);
/// ```
pub struct RecordingHandler<In> {
    inputs: Arc<Mutex<Vec<In>>>,
    errors: Arc<Mutex<Vec<SourceError>>>,
    ends: Arc<AtomicUsize>,
    finish_after: Option<usize>,
    finished: bool,
}

impl<In: Event> RecordingHandler<In> {
    /// A recorder that runs to end-of-input.
    pub fn new() -> Self {
        Self {
            inputs: Arc::new(Mutex::new(Vec::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            ends: Arc::new(AtomicUsize::new(0)),
            finish_after: None,
            finished: false,
        }
    }

    /// A recorder that short-circuits after `count` inputs.
    pub fn finish_after(count: usize) -> Self {
        Self {
            finish_after: Some(count),
            ..Self::new()
        }
    }

    /// An inspection handle that survives moving the handler into a driver.
    pub fn probe(&self) -> RecordingProbe<In> {
        RecordingProbe {
            inputs: Arc::clone(&self.inputs),
            errors: Arc::clone(&self.errors),
            ends: Arc::clone(&self.ends),
        }
    }
}

impl<In: Event> Default for RecordingHandler<In> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In: Event> Handler<In> for RecordingHandler<In> {
    type Out = usize;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: In) -> Option<usize> {
        let mut inputs = self.inputs.lock().unwrap();
        inputs.push(input);
        let seen = inputs.len();
        match self.finish_after {
            Some(count) if seen >= count => {
                self.finished = true;
                Some(seen)
            }
            _ => None,
        }
    }

    fn handle_error(&mut self, error: SourceError) -> Option<usize> {
        self.errors.lock().unwrap().push(error);
        None
    }

    fn handle_end(&mut self) -> usize {
        self.finished = true;
        self.ends.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().len()
    }
}

/// Inspection handle for a [`RecordingHandler`].
pub struct RecordingProbe<In> {
    inputs: Arc<Mutex<Vec<In>>>,
    errors: Arc<Mutex<Vec<SourceError>>>,
    ends: Arc<AtomicUsize>,
}

impl<In: Event> RecordingProbe<In> {
    /// The inputs recorded so far.
    pub fn inputs(&self) -> Vec<In> {
        self.inputs.lock().unwrap().clone()
    }

    /// How many faults were delivered.
    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    /// How many times `handle_end` ran.
    pub fn end_count(&self) -> usize {
        self.ends.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Scripted Source
// ============================================================================

/// An event source replaying a prepared script of events and faults.
///
/// The attached [`CloseProbe`] counts release-hook runs, which is how the
/// exactly-once release property is asserted:
///
/// ```rust,ignore
/// let source = ScriptedSource::of(events);
/// let probe = source.close_probe();
/// drive(source, &mut handler)?;
/// assert_eq!(probe.count(), 1);
/// ```
pub struct ScriptedSource<E> {
    script: Vec<Result<E, SourceError>>,
    closes: Arc<AtomicUsize>,
}

impl<E: Event> ScriptedSource<E> {
    /// A source yielding `events` without faults.
    pub fn of(events: impl IntoIterator<Item = E>) -> Self {
        Self::from_script(events.into_iter().map(Ok).collect())
    }

    /// A source replaying an explicit script of events and faults.
    pub fn from_script(script: Vec<Result<E, SourceError>>) -> Self {
        Self {
            script,
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A handle counting how many times the source was released.
    pub fn close_probe(&self) -> CloseProbe {
        CloseProbe(Arc::clone(&self.closes))
    }
}

impl<E: Event> EventSource for ScriptedSource<E> {
    type Event = E;
    type Iter = std::vec::IntoIter<Result<E, SourceError>>;

    fn open(self) -> Result<(Self::Iter, CloseGuard), SourceError> {
        let closes = self.closes;
        let guard = CloseGuard::new(move || {
            closes.fetch_add(1, Ordering::SeqCst);
        });
        Ok((self.script.into_iter(), guard))
    }
}

/// Release counter for a [`ScriptedSource`].
pub struct CloseProbe(Arc<AtomicUsize>);

impl CloseProbe {
    /// How many times the release hook has run.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
