//! Parsers for JSON scalar values.
//!
//! Each parser reads the value at the root of its stream: the structural
//! event that opened the sub-stream is skipped, and the next event decides
//! the outcome. A scalar of the wrong kind (or a container where a scalar
//! was expected) yields `Empty` rather than an error, so alternation over
//! heterogeneous values composes with `one_of!`.

use std::marker::PhantomData;

use weir_core::{BoxHandler, Handler, Parsed, Parser, SourceError};

use crate::event::JsonEvent;

fn is_structural_start(event: &JsonEvent) -> bool {
    matches!(
        event,
        JsonEvent::ObjectStart
            | JsonEvent::ArrayStart
            | JsonEvent::FieldStart(_)
            | JsonEvent::IndexStart(_)
    )
}

struct ScalarHandler<T, F> {
    extract: F,
    seen_opener: bool,
    finished: bool,
    _value: PhantomData<fn() -> T>,
}

impl<T, F> Handler<JsonEvent> for ScalarHandler<T, F>
where
    T: Clone + Send + 'static,
    F: Fn(&JsonEvent) -> Option<T>,
{
    type Out = Parsed<T>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: JsonEvent) -> Option<Self::Out> {
        if is_structural_start(&input) {
            if self.seen_opener {
                // The root value is a container, not a scalar.
                self.finished = true;
                return Some(Parsed::Empty);
            }
            self.seen_opener = true;
            return None;
        }
        match &input {
            JsonEvent::Str(_) | JsonEvent::Number(_) | JsonEvent::Bool(_) | JsonEvent::Null => {
                self.finished = true;
                Some((self.extract)(&input).into())
            }
            _ => None,
        }
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.finished = true;
        Some(Parsed::Error(error.into()))
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        Parsed::Empty
    }
}

macro_rules! scalar_parser {
    (
        $(#[$struct_doc:meta])* $parser:ident,
        $(#[$fn_doc:meta])* $make:ident,
        $value:ty,
        $extract:expr
    ) => {
        $(#[$struct_doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $parser;

        $(#[$fn_doc])*
        pub fn $make() -> $parser {
            $parser
        }

        impl Parser<JsonEvent> for $parser {
            type Output = $value;

            fn make_handler(&self) -> BoxHandler<JsonEvent, Parsed<$value>> {
                Box::new(ScalarHandler {
                    extract: $extract,
                    seen_opener: false,
                    finished: false,
                    _value: PhantomData,
                })
            }
        }
    };
}

scalar_parser!(
    /// Parses a boolean value at the root of its stream.
    BoolParser,
    /// The boolean at the root of the sub-stream; non-booleans are `Empty`.
    boolean,
    bool,
    |event: &JsonEvent| match event {
        JsonEvent::Bool(value) => Some(*value),
        _ => None,
    }
);

scalar_parser!(
    /// Parses a number value at the root of its stream.
    NumberParser,
    /// The number at the root of the sub-stream; non-numbers are `Empty`.
    number,
    f64,
    |event: &JsonEvent| match event {
        JsonEvent::Number(value) => Some(*value),
        _ => None,
    }
);

scalar_parser!(
    /// Parses a string value at the root of its stream.
    StringParser,
    /// The string at the root of the sub-stream; non-strings are `Empty`.
    string_value,
    String,
    |event: &JsonEvent| match event {
        JsonEvent::Str(value) => Some(value.clone()),
        _ => None,
    }
);

scalar_parser!(
    /// Parses a null value at the root of its stream.
    NullParser,
    /// Unit when the root of the sub-stream is `null`; anything else is
    /// `Empty`.
    null_value,
    (),
    |event: &JsonEvent| match event {
        JsonEvent::Null => Some(()),
        _ => None,
    }
);
