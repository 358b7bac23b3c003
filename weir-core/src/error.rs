//! Error types for weir.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SourceError`] - Faults raised by the underlying tokenizer or I/O
//! - [`MatchError`] - A context matcher failed while extracting a value
//! - [`ParseError`] - Parse mismatches and user-combinator faults
//! - [`DriveError`] - Top-level error returned by a driver run
//!
//! Recoverable errors are `Clone` so a single fault can be fanned out to
//! every sibling handler of a compound, and `PartialEq` so tests can assert
//! on exact error values.

use std::sync::Arc;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fault raised by the event source while producing the next event.
///
/// Source errors are delivered to handlers through
/// [`Handler::handle_error`](crate::Handler::handle_error); a handler may
/// absorb the fault or terminate with it. The shared cause makes the error
/// cheap to clone when it is fanned out to several children.
#[derive(Debug, Clone, Error)]
#[error("event source failed: {0}")]
pub struct SourceError(Arc<BoxError>);

impl SourceError {
    /// Wrap an underlying cause.
    pub fn new<E: Into<BoxError>>(cause: E) -> Self {
        Self(Arc::new(cause.into()))
    }

    /// A source error carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(message.into())
    }

    /// The underlying cause.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &**self.0
    }
}

/// A context matcher failed while extracting a context value.
///
/// Match failures open a sub-stream like a successful match does, but the
/// failure is surfaced downstream as a [`ParseError::Match`] instead of a
/// parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("context match failed: {0}")]
pub struct MatchError(String);

impl MatchError {
    /// Create a match error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A recoverable parse-level error.
///
/// These flow through [`Parsed`](crate::Parsed) values and compose
/// monadically: in a compound, the first child error by index poisons the
/// combined result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A mandatory attribute was absent from the matched element.
    #[error("missing mandatory attribute `{0}`")]
    MissingAttribute(String),
    /// A mandatory element never appeared in the sub-stream.
    #[error("missing mandatory element `{0}`")]
    MissingElement(String),
    /// A mandatory field never appeared in the sub-stream.
    #[error("missing mandatory field `{0}`")]
    MissingField(String),
    /// The stream held a value of the wrong kind.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        /// What the parser was built to accept.
        expected: String,
        /// What the stream actually held.
        found: String,
    },
    /// A matcher failed while opening a sub-stream.
    #[error(transparent)]
    Match(#[from] MatchError),
    /// The event source failed while a handler was waiting for input.
    #[error("event source failed: {0}")]
    Source(String),
    /// A user combinator rejected the value.
    #[error("{0}")]
    Message(String),
}

impl From<SourceError> for ParseError {
    fn from(error: SourceError) -> Self {
        ParseError::Source(error.cause().to_string())
    }
}

/// Top-level outcome of driving a consumer over an event source.
#[derive(Debug, Error)]
pub enum DriveError {
    /// The consumer terminated with a parse error.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The source could not be opened or failed fatally.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The stream ended without the consumer producing a value.
    #[error("parser finished without producing a value")]
    NoValue,
}
