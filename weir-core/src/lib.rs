//! # weir-core
//!
//! Core traits for the weir streaming parser framework.
//!
//! This crate provides the fundamental abstractions:
//! - [`Parsed`] - Three-valued parse outcome (success, empty, error)
//! - [`Handler`] - Push-driven state machine consuming events
//! - [`Event`] / [`ContextualEvent`] - Marker and context projection for event types
//! - [`Parser`] / [`Consumer`] / [`Transformer`] - Immutable handler factories
//! - [`ContextMatcher`] - Predicates over the context stack
//! - [`EventSource`] - Scoped event producers with guaranteed release
//!
//! This crate has minimal dependencies and is designed to be imported by
//! event-family crates (XML, JSON, ...) that don't need the full `weir`
//! framework.

#![warn(missing_docs)]

mod compound;
mod consumer;
mod context;
mod error;
mod event;
mod handler;
mod matcher;
mod parsed;
mod parser;
mod source;
mod transformer;

// Re-exports
pub use compound::{And, PairHandler};
pub use consumer::Consumer;
pub use context::{ContextChange, ContextTracker, ContextualEvent};
pub use error::{BoxError, DriveError, MatchError, ParseError, SourceError};
pub use event::Event;
pub use handler::{BoxHandler, Handler};
pub use matcher::{any_frame, AnyFrame, Chained, ContextMatcher, MapMatcher};
pub use parsed::Parsed;
pub use parser::{
    Catch, Constant, FilterParser, MapHandler, MapParser, Parser, ParserConsumer, RecoverParser,
    TryMapParser, UnwrapSafe, WrapSafe,
};
pub use parser::constant;
pub use source::{CloseGuard, EventSource, InfallibleEvents, IterSource};
pub use transformer::Transformer;
