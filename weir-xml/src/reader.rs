//! Source adapter over `quick-xml`.
//!
//! [`XmlSlice`] opens a string slice as a stream of owned [`XmlEvent`]s.
//! Empty elements are expanded into a start/end pair so the context stack
//! stays balanced, and tokenizer faults surface as `SourceError` items.

use quick_xml::events::{BytesStart, Event as QuickEvent};
use quick_xml::Reader;

use weir_core::{CloseGuard, EventSource, SourceError};

use crate::event::{ElemStart, XmlEvent};

/// Options for reading XML input.
#[derive(Debug, Clone)]
pub struct XmlReadOptions {
    /// Strip leading and trailing whitespace from text events and drop the
    /// all-whitespace ones. Defaults to `true`.
    pub trim_text: bool,
}

impl Default for XmlReadOptions {
    fn default() -> Self {
        Self { trim_text: true }
    }
}

/// An XML document held in memory, openable as an event source.
#[derive(Debug, Clone)]
pub struct XmlSlice<'a> {
    input: &'a str,
    options: XmlReadOptions,
}

impl<'a> XmlSlice<'a> {
    /// Read `input` with default options.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            options: XmlReadOptions::default(),
        }
    }

    /// Read `input` with explicit options.
    pub fn with_options(input: &'a str, options: XmlReadOptions) -> Self {
        Self { input, options }
    }
}

impl<'a> EventSource for XmlSlice<'a> {
    type Event = XmlEvent;
    type Iter = XmlEvents<'a>;

    fn open(self) -> Result<(Self::Iter, CloseGuard), SourceError> {
        let mut reader = Reader::from_str(self.input);
        let config = reader.config_mut();
        config.trim_text(self.options.trim_text);
        config.expand_empty_elements = true;
        Ok((
            XmlEvents {
                reader,
                done: false,
            },
            CloseGuard::noop(),
        ))
    }
}

/// Iterator over the events of an [`XmlSlice`].
pub struct XmlEvents<'a> {
    reader: Reader<&'a [u8]>,
    done: bool,
}

impl Iterator for XmlEvents<'_> {
    type Item = Result<XmlEvent, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.reader.read_event() {
                Ok(QuickEvent::Start(start)) => return Some(convert_start(&start)),
                Ok(QuickEvent::End(end)) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    return Some(Ok(XmlEvent::ElemEnd(name)));
                }
                Ok(QuickEvent::Text(chunk)) => match chunk.unescape() {
                    Ok(unescaped) => return Some(Ok(XmlEvent::Text(unescaped.into_owned()))),
                    Err(e) => return Some(self.fail(e)),
                },
                Ok(QuickEvent::CData(chunk)) => {
                    let raw = String::from_utf8_lossy(chunk.as_ref()).into_owned();
                    return Some(Ok(XmlEvent::Text(raw)));
                }
                Ok(QuickEvent::Comment(chunk)) => match chunk.unescape() {
                    Ok(unescaped) => return Some(Ok(XmlEvent::Comment(unescaped.into_owned()))),
                    Err(e) => return Some(self.fail(e)),
                },
                Ok(QuickEvent::Eof) => {
                    self.done = true;
                    return None;
                }
                // Declarations, processing instructions and doctypes carry no
                // structure the handler tree can act on.
                Ok(_) => continue,
                Err(e) => return Some(self.fail(e)),
            }
        }
    }
}

impl XmlEvents<'_> {
    fn fail<E: Into<weir_core::BoxError>>(&mut self, error: E) -> Result<XmlEvent, SourceError> {
        self.done = true;
        Err(SourceError::new(error))
    }
}

fn convert_start(start: &BytesStart<'_>) -> Result<XmlEvent, SourceError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(SourceError::new)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(SourceError::new)?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlEvent::ElemStart(ElemStart::new(name, attributes)))
}
