//! Matcher vocabulary for XML element paths.
//!
//! Paths are built from element names, the wildcard, and `/`:
//!
//! ```rust,ignore
//! let authors = elem("blog") / elem("post") / elem("author");
//! let any_child = elem("blog") / any_elem();
//! ```

use std::ops::Div;

use weir_core::{AnyFrame, Chained, ContextMatcher, MatchError};

use crate::event::ElemStart;

/// Matches one element frame by name.
#[derive(Debug, Clone)]
pub struct ElemMatcher {
    name: String,
}

/// A path segment matching an element with the given name.
pub fn elem(name: impl Into<String>) -> ElemMatcher {
    ElemMatcher { name: name.into() }
}

impl ContextMatcher<ElemStart> for ElemMatcher {
    type Context = ();

    fn apply_prefix(
        &self,
        stack: &[ElemStart],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        match stack.first() {
            Some(frame) if frame.name() == self.name => Some((1, Ok(()))),
            _ => None,
        }
    }
}

impl<Rhs> Div<Rhs> for ElemMatcher {
    type Output = Chained<ElemMatcher, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// Matches one element frame of any name.
pub type AnyElem = AnyFrame;

/// A wildcard path segment matching any single element.
pub fn any_elem() -> AnyElem {
    AnyFrame
}

/// Matches one element by name and extracts an attribute value as context.
///
/// The element matching with the attribute absent is a match *failure*, not
/// a non-match: the sub-stream opens and the failure is surfaced downstream.
#[derive(Debug, Clone)]
pub struct ElemAttrMatcher {
    name: String,
    attribute: String,
}

/// A path segment matching `name` and extracting `attribute` as context.
pub fn elem_attr(name: impl Into<String>, attribute: impl Into<String>) -> ElemAttrMatcher {
    ElemAttrMatcher {
        name: name.into(),
        attribute: attribute.into(),
    }
}

impl ContextMatcher<ElemStart> for ElemAttrMatcher {
    type Context = String;

    fn apply_prefix(
        &self,
        stack: &[ElemStart],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        let frame = stack.first()?;
        if frame.name() != self.name {
            return None;
        }
        let extracted = match frame.attr(&self.attribute) {
            Some(value) => Ok(value.to_owned()),
            None => Err(MatchError::new(format!(
                "element `{}` has no attribute `{}`",
                self.name, self.attribute
            ))),
        };
        Some((1, extracted))
    }
}

impl<Rhs> Div<Rhs> for ElemAttrMatcher {
    type Output = Chained<ElemAttrMatcher, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}
