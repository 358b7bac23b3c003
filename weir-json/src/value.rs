//! Source adapter re-walking a `serde_json::Value`.

use serde_json::Value;

use weir_core::{CloseGuard, EventSource, InfallibleEvents, SourceError};

use crate::event::JsonEvent;

/// An already-parsed JSON document, openable as an event source.
///
/// The value is flattened into the event vocabulary in document order, with
/// field and index scopes synthesized around every nested value. This is the
/// bridge between tree-shaped JSON (fixtures, API payloads) and the
/// streaming handler model; a streaming tokenizer plugs in through
/// [`EventSource`] the same way.
#[derive(Debug, Clone)]
pub struct ValueSource {
    value: Value,
}

impl From<Value> for ValueSource {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

impl EventSource for ValueSource {
    type Event = JsonEvent;
    type Iter = InfallibleEvents<std::vec::IntoIter<JsonEvent>>;

    fn open(self) -> Result<(Self::Iter, CloseGuard), SourceError> {
        let mut events = Vec::new();
        flatten(&self.value, &mut events);
        Ok((InfallibleEvents::new(events.into_iter()), CloseGuard::noop()))
    }
}

fn flatten(value: &Value, out: &mut Vec<JsonEvent>) {
    match value {
        Value::Null => out.push(JsonEvent::Null),
        Value::Bool(b) => out.push(JsonEvent::Bool(*b)),
        Value::Number(n) => out.push(JsonEvent::Number(n.as_f64().unwrap_or(f64::NAN))),
        Value::String(s) => out.push(JsonEvent::Str(s.clone())),
        Value::Array(items) => {
            out.push(JsonEvent::ArrayStart);
            for (index, item) in items.iter().enumerate() {
                out.push(JsonEvent::IndexStart(index));
                flatten(item, out);
                out.push(JsonEvent::IndexEnd);
            }
            out.push(JsonEvent::ArrayEnd);
        }
        Value::Object(map) => {
            out.push(JsonEvent::ObjectStart);
            for (name, nested) in map {
                out.push(JsonEvent::FieldStart(name.clone()));
                flatten(nested, out);
                out.push(JsonEvent::FieldEnd);
            }
            out.push(JsonEvent::ObjectEnd);
        }
    }
}
