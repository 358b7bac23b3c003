//! # weir-json
//!
//! The JSON event family for [`weir`]: an event type whose field and array
//! positions are structural scopes, a matcher vocabulary for object/array
//! paths, scalar-value parsers, and a `serde_json::Value` source adapter.
//!
//! ```rust,ignore
//! use weir::{parse, Parser, Splitter};
//! use weir_json::{any_index, field, number, ValueSource};
//!
//! let prices = Splitter::new(field("prices") / any_index())
//!     .as_list_of(number())
//!     .into_consumer();
//! let prices: Vec<f64> = parse(ValueSource::from(doc), &prices)?;
//! ```
//!
//! [`weir`]: https://docs.rs/weir

mod event;
mod matcher;
mod parser;
mod value;

pub use event::{JsonEvent, JsonFrame};
pub use matcher::{any_field, any_index, field, AnyField, AnyIndex, FieldMatcher};
pub use parser::{
    boolean, null_value, number, string_value, BoolParser, NullParser, NumberParser, StringParser,
};
pub use value::ValueSource;
