//! Owned XML events and their context projection.

use weir_core::{ContextChange, ContextualEvent, Event};

/// The opening of an element: its name and attributes in document order.
///
/// Element starts double as the context-stack frame for XML, so matchers can
/// inspect both names and attributes of every open element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElemStart {
    name: String,
    attributes: Vec<(String, String)>,
}

impl ElemStart {
    /// An element start with the given name and attributes.
    pub fn new(name: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// A single XML stream event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An element opened.
    ElemStart(ElemStart),
    /// An element closed.
    ElemEnd(String),
    /// Character data.
    Text(String),
    /// A comment.
    Comment(String),
}

impl Event for XmlEvent {}

impl ContextualEvent for XmlEvent {
    type Frame = ElemStart;

    fn context_change(&self) -> ContextChange<ElemStart> {
        match self {
            XmlEvent::ElemStart(start) => ContextChange::Push(start.clone()),
            XmlEvent::ElemEnd(_) => ContextChange::Pop,
            XmlEvent::Text(_) | XmlEvent::Comment(_) => ContextChange::Stay,
        }
    }
}
