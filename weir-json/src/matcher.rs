//! Matcher vocabulary for JSON paths.
//!
//! A field segment consumes the object frame and the field frame beneath it;
//! index segments likewise consume the array frame and the index frame. Paths
//! compose with `/`:
//!
//! ```rust,ignore
//! let items = field("hello") / any_index();
//! ```

use std::ops::Div;

use weir_core::{Chained, ContextMatcher, MatchError};

use crate::event::JsonFrame;

/// Matches entering the value of a named object field.
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    name: String,
}

/// A path segment matching the value of field `name`.
pub fn field(name: impl Into<String>) -> FieldMatcher {
    FieldMatcher { name: name.into() }
}

impl ContextMatcher<JsonFrame> for FieldMatcher {
    type Context = ();

    fn apply_prefix(
        &self,
        stack: &[JsonFrame],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        match stack {
            [JsonFrame::Object, JsonFrame::Field(name), ..] if *name == self.name => {
                Some((2, Ok(())))
            }
            _ => None,
        }
    }
}

impl<Rhs> Div<Rhs> for FieldMatcher {
    type Output = Chained<FieldMatcher, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// Matches entering the value of any object field, extracting its name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyField;

/// A path segment matching any field value; the field name is the context.
pub fn any_field() -> AnyField {
    AnyField
}

impl ContextMatcher<JsonFrame> for AnyField {
    type Context = String;

    fn apply_prefix(
        &self,
        stack: &[JsonFrame],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        match stack {
            [JsonFrame::Object, JsonFrame::Field(name), ..] => Some((2, Ok(name.clone()))),
            _ => None,
        }
    }
}

impl<Rhs> Div<Rhs> for AnyField {
    type Output = Chained<AnyField, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// Matches entering any array element, extracting its index.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyIndex;

/// A path segment matching any array element; the index is the context.
pub fn any_index() -> AnyIndex {
    AnyIndex
}

impl ContextMatcher<JsonFrame> for AnyIndex {
    type Context = usize;

    fn apply_prefix(
        &self,
        stack: &[JsonFrame],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        match stack {
            [JsonFrame::Array, JsonFrame::Index(index), ..] => Some((2, Ok(*index))),
            _ => None,
        }
    }
}

impl<Rhs> Div<Rhs> for AnyIndex {
    type Output = Chained<AnyIndex, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}
