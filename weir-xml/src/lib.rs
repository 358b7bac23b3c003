//! # weir-xml
//!
//! The XML event family for [`weir`]: an owned event type with its context
//! projection, a matcher vocabulary for element paths, parsers for
//! attributes and text, and a `quick-xml` backed source adapter.
//!
//! ```rust,ignore
//! use weir::{parse, Parser, Splitter};
//! use weir_xml::{attr, elem, XmlSlice};
//!
//! let dates = Splitter::new(elem("blog") / elem("post"))
//!     .as_list_of(attr("date"))
//!     .into_consumer();
//! let dates: Vec<String> = parse(XmlSlice::new(xml), &dates)?;
//! ```
//!
//! [`weir`]: https://docs.rs/weir

mod event;
mod matcher;
mod parser;
mod reader;

pub use event::{ElemStart, XmlEvent};
pub use matcher::{any_elem, elem, elem_attr, AnyElem, ElemAttrMatcher, ElemMatcher};
pub use parser::{attr, attr_opt, text, AttrParser, OptAttrParser, TextParser};
pub use reader::{XmlEvents, XmlReadOptions, XmlSlice};
