//! Parsers over XML sub-streams: attributes and text.

use weir_core::{BoxHandler, Handler, ParseError, Parsed, Parser, SourceError};

use crate::event::XmlEvent;

/// Parses a mandatory attribute from the root element of its stream.
#[derive(Debug, Clone)]
pub struct AttrParser {
    name: String,
}

/// The value of attribute `name` on the first element seen; its absence is a
/// [`ParseError::MissingAttribute`].
pub fn attr(name: impl Into<String>) -> AttrParser {
    AttrParser { name: name.into() }
}

struct AttrHandler {
    name: String,
    finished: bool,
}

impl Handler<XmlEvent> for AttrHandler {
    type Out = Parsed<String>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: XmlEvent) -> Option<Self::Out> {
        let XmlEvent::ElemStart(start) = input else {
            return None;
        };
        self.finished = true;
        match start.attr(&self.name) {
            Some(value) => Some(Parsed::Success(value.to_owned())),
            None => Some(Parsed::Error(ParseError::MissingAttribute(
                self.name.clone(),
            ))),
        }
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.finished = true;
        Some(Parsed::Error(error.into()))
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        Parsed::Error(ParseError::MissingElement(self.name.clone()))
    }
}

impl Parser<XmlEvent> for AttrParser {
    type Output = String;

    fn make_handler(&self) -> BoxHandler<XmlEvent, Parsed<String>> {
        Box::new(AttrHandler {
            name: self.name.clone(),
            finished: false,
        })
    }
}

/// Like [`AttrParser`] but absence yields `None` instead of an error.
#[derive(Debug, Clone)]
pub struct OptAttrParser {
    name: String,
}

/// The value of attribute `name` on the first element seen, if any.
pub fn attr_opt(name: impl Into<String>) -> OptAttrParser {
    OptAttrParser { name: name.into() }
}

struct OptAttrHandler {
    name: String,
    finished: bool,
}

impl Handler<XmlEvent> for OptAttrHandler {
    type Out = Parsed<Option<String>>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: XmlEvent) -> Option<Self::Out> {
        let XmlEvent::ElemStart(start) = input else {
            return None;
        };
        self.finished = true;
        Some(Parsed::Success(start.attr(&self.name).map(str::to_owned)))
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

impl Parser<XmlEvent> for OptAttrParser {
    type Output = Option<String>;

    fn make_handler(&self) -> BoxHandler<XmlEvent, Parsed<Option<String>>> {
        Box::new(OptAttrHandler {
            name: self.name.clone(),
            finished: false,
        })
    }
}

/// Concatenates all character data in its stream.
#[derive(Debug, Clone, Default)]
pub struct TextParser;

/// The concatenated text of the sub-stream, including nested elements'
/// text.
pub fn text() -> TextParser {
    TextParser
}

struct TextHandler {
    buffer: String,
    finished: bool,
}

impl Handler<XmlEvent> for TextHandler {
    type Out = Parsed<String>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: XmlEvent) -> Option<Self::Out> {
        if let XmlEvent::Text(chunk) = input {
            self.buffer.push_str(&chunk);
        }
        None
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.finished = true;
        Some(Parsed::Error(error.into()))
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        Parsed::Success(std::mem::take(&mut self.buffer))
    }
}

impl Parser<XmlEvent> for TextParser {
    type Output = String;

    fn make_handler(&self) -> BoxHandler<XmlEvent, Parsed<String>> {
        Box::new(TextHandler {
            buffer: String::new(),
            finished: false,
        })
    }
}
