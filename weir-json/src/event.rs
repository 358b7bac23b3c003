//! JSON events and their context projection.
//!
//! Field and array positions are first-class structural scopes: entering
//! the value of `"hello"` pushes an object frame and a field frame, entering
//! the third array element pushes an array frame and an index frame. That
//! makes `field("hello") / any_index()` a plain stack path with no special
//! cases in the core.

use weir_core::{ContextChange, ContextualEvent, Event};

/// A single JSON stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonEvent {
    /// An object opened.
    ObjectStart,
    /// An object closed.
    ObjectEnd,
    /// A field's value region opened.
    FieldStart(String),
    /// A field's value region closed.
    FieldEnd,
    /// An array opened.
    ArrayStart,
    /// An array closed.
    ArrayEnd,
    /// An element's value region opened.
    IndexStart(usize),
    /// An element's value region closed.
    IndexEnd,
    /// A string value.
    Str(String),
    /// A number value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A null value.
    Null,
}

/// A frame of the JSON context stack.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonFrame {
    /// Inside an object.
    Object,
    /// Inside the value of a field.
    Field(String),
    /// Inside an array.
    Array,
    /// Inside the value at an index.
    Index(usize),
}

impl Event for JsonEvent {}

impl ContextualEvent for JsonEvent {
    type Frame = JsonFrame;

    fn context_change(&self) -> ContextChange<JsonFrame> {
        match self {
            JsonEvent::ObjectStart => ContextChange::Push(JsonFrame::Object),
            JsonEvent::FieldStart(name) => ContextChange::Push(JsonFrame::Field(name.clone())),
            JsonEvent::ArrayStart => ContextChange::Push(JsonFrame::Array),
            JsonEvent::IndexStart(index) => ContextChange::Push(JsonFrame::Index(*index)),
            JsonEvent::ObjectEnd | JsonEvent::FieldEnd | JsonEvent::ArrayEnd
            | JsonEvent::IndexEnd => ContextChange::Pop,
            JsonEvent::Str(_) | JsonEvent::Number(_) | JsonEvent::Bool(_) | JsonEvent::Null => {
                ContextChange::Stay
            }
        }
    }
}
