//! The driver loop: one forward pass from a source into a handler tree.
//!
//! The driver is the only entity invoking handler methods. It consults
//! `is_finished` before each event, stops as soon as the root handler
//! produces a result, and releases the source exactly once on every exit
//! path; release on panic is carried by the close guard's `Drop`.

use tracing::{debug, trace};
use weir_core::{Consumer, DriveError, EventSource, Handler, Parsed, SourceError};

/// Push every event of `source` into `handler` and return its result.
///
/// Iterator faults are routed to `handle_error`; a `None` return there
/// resumes the loop. When the iterator is exhausted without the handler
/// having produced a result, `handle_end` supplies it.
pub fn drive<S, H>(source: S, handler: &mut H) -> Result<H::Out, SourceError>
where
    S: EventSource,
    H: Handler<S::Event>,
{
    let (mut events, mut guard) = source.open()?;
    let mut delivered = 0usize;

    let out = loop {
        if handler.is_finished() {
            debug!(delivered, "handler finished without an end signal");
            break handler.handle_end();
        }
        match events.next() {
            Some(Ok(event)) => {
                delivered += 1;
                if let Some(out) = handler.handle_input(event) {
                    trace!(delivered, "handler short-circuited");
                    break out;
                }
            }
            Some(Err(error)) => {
                debug!(%error, "event source fault");
                if let Some(out) = handler.handle_error(error) {
                    break out;
                }
            }
            None => {
                trace!(delivered, "stream exhausted");
                break handler.handle_end();
            }
        }
    };

    guard.close();
    Ok(out)
}

/// Drive `consumer` over `source` and unwrap its [`Parsed`] result.
///
/// `Success` becomes `Ok`, `Error` a [`DriveError::Parse`], and an `Empty`
/// result at top level is [`DriveError::NoValue`].
pub fn parse<S, C, T>(source: S, consumer: &C) -> Result<T, DriveError>
where
    S: EventSource,
    C: Consumer<S::Event, Output = Parsed<T>>,
    T: 'static,
{
    let mut handler = consumer.make_handler();
    match drive(source, &mut handler)? {
        Parsed::Success(value) => Ok(value),
        Parsed::Empty => Err(DriveError::NoValue),
        Parsed::Error(e) => Err(DriveError::Parse(e)),
    }
}
