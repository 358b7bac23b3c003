//! # weir - Streaming, Composable Parsers
//!
//! `weir` turns a single forward pass over a hierarchical event stream (XML,
//! JSON, or any family supplying a context projection) into a tree of small
//! handlers. You describe *what* to extract by combining parsers along
//! structural paths; the driver pushes each event exactly once, in order, in
//! one thread, and stops the moment the root handler has its answer.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use weir::{parse, Parser, Splitter};
//! use weir_xml::{attr, elem, XmlSlice};
//!
//! let dates = Splitter::new(elem("blog") / elem("post"))
//!     .as_list_of(attr("date"))
//!     .into_consumer();
//! let dates = parse(XmlSlice::new(xml), &dates)?;
//! ```
//!
//! Factories are immutable and shareable; all state lives inside the handler
//! tree a driver run builds, drives, and drops.

#![warn(missing_docs)]

pub mod combinator;
pub mod driver;
pub mod funnel;
pub mod middleman;
pub mod one_of;
pub mod splitter;
pub mod testing;

// ============================================================================
// Core Traits & Types (from weir-core)
// ============================================================================
pub use weir_core::{
    any_frame,
    constant,
    And,
    AnyFrame,
    // Handler
    BoxHandler,
    // Error
    BoxError,
    Chained,
    CloseGuard,
    // Consumer / Parser / Transformer
    Consumer,
    // Context
    ContextChange,
    ContextMatcher,
    ContextTracker,
    ContextualEvent,
    DriveError,
    // Event
    Event,
    EventSource,
    Handler,
    IterSource,
    MatchError,
    // Compound
    PairHandler,
    ParseError,
    // Result
    Parsed,
    Parser,
    ParserConsumer,
    SourceError,
    Transformer,
};

// ============================================================================
// Framework (this crate)
// ============================================================================
pub use combinator::{ParseFirst, ParseToList, TransformerExt};
pub use driver::{drive, parse};
pub use funnel::{FunnelChain, FunnelEnd, Funnelled, GuardedEnd, HCons, HNil, SharedHandler};
pub use middleman::{ContextMiddleman, HandlerFactory};
pub use one_of::OneOf;
pub use splitter::{SplitTransformer, Splitter};
