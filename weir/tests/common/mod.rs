#![allow(dead_code)]

use std::ops::Div;
use std::sync::{Arc, Mutex};

use weir::{
    BoxHandler, Chained, ContextChange, ContextMatcher, ContextualEvent, Event, Handler,
    MatchError, Parsed, Parser, SourceError,
};

/// A tiny hierarchical event family for framework-level tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TEvent {
    Open(&'static str),
    Close,
    Value(i32),
}

impl Event for TEvent {}

impl ContextualEvent for TEvent {
    type Frame = &'static str;

    fn context_change(&self) -> ContextChange<&'static str> {
        match self {
            TEvent::Open(name) => ContextChange::Push(*name),
            TEvent::Close => ContextChange::Pop,
            TEvent::Value(_) => ContextChange::Stay,
        }
    }
}

/// Matches a single frame by label.
#[derive(Debug, Clone)]
pub struct Label(pub &'static str);

pub fn label(name: &'static str) -> Label {
    Label(name)
}

impl ContextMatcher<&'static str> for Label {
    type Context = ();

    fn apply_prefix(
        &self,
        stack: &[&'static str],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        match stack.first() {
            Some(frame) if *frame == self.0 => Some((1, Ok(()))),
            _ => None,
        }
    }
}

impl<Rhs> Div<Rhs> for Label {
    type Output = Chained<Label, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// Matches a single frame by label but always fails extraction.
#[derive(Debug, Clone)]
pub struct BrokenLabel(pub &'static str);

impl ContextMatcher<&'static str> for BrokenLabel {
    type Context = ();

    fn apply_prefix(
        &self,
        stack: &[&'static str],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        match stack.first() {
            Some(frame) if *frame == self.0 => {
                Some((1, Err(MatchError::new(format!("cannot extract `{frame}`")))))
            }
            _ => None,
        }
    }
}

impl<Rhs> Div<Rhs> for BrokenLabel {
    type Output = Chained<BrokenLabel, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// Matches a single frame by label, extracting the label.
#[derive(Debug, Clone)]
pub struct ExtractLabel;

impl ContextMatcher<&'static str> for ExtractLabel {
    type Context = &'static str;

    fn apply_prefix(
        &self,
        stack: &[&'static str],
    ) -> Option<(usize, Result<Self::Context, MatchError>)> {
        stack.first().map(|frame| (1, Ok(*frame)))
    }
}

impl<Rhs> Div<Rhs> for ExtractLabel {
    type Output = Chained<ExtractLabel, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// Parses the first `Value` event of its stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueParser;

pub fn value() -> ValueParser {
    ValueParser
}

struct ValueHandler {
    finished: bool,
}

impl Handler<TEvent> for ValueHandler {
    type Out = Parsed<i32>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: TEvent) -> Option<Self::Out> {
        match input {
            TEvent::Value(n) => {
                self.finished = true;
                Some(Parsed::Success(n))
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

impl Parser<TEvent> for ValueParser {
    type Output = i32;

    fn make_handler(&self) -> BoxHandler<TEvent, Parsed<i32>> {
        Box::new(ValueHandler { finished: false })
    }
}

/// Sums every `Value` event until the end of its stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumParser;

pub fn sum() -> SumParser {
    SumParser
}

struct SumHandler {
    total: i32,
    finished: bool,
}

impl Handler<TEvent> for SumHandler {
    type Out = Parsed<i32>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: TEvent) -> Option<Self::Out> {
        if let TEvent::Value(n) = input {
            self.total += n;
        }
        None
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.finished = true;
        Some(Parsed::Error(error.into()))
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        Parsed::Success(self.total)
    }
}

impl Parser<TEvent> for SumParser {
    type Output = i32;

    fn make_handler(&self) -> BoxHandler<TEvent, Parsed<i32>> {
        Box::new(SumHandler {
            total: 0,
            finished: false,
        })
    }
}

/// Records `(child, event)` pairs into a shared log; succeeds with `()` at
/// end of input. Used to observe compound delivery order.
#[derive(Debug, Clone)]
pub struct ProbeParser {
    pub id: usize,
    pub log: Arc<Mutex<Vec<(usize, TEvent)>>>,
}

pub fn probe(id: usize, log: &Arc<Mutex<Vec<(usize, TEvent)>>>) -> ProbeParser {
    ProbeParser {
        id,
        log: Arc::clone(log),
    }
}

struct ProbeHandler {
    id: usize,
    log: Arc<Mutex<Vec<(usize, TEvent)>>>,
    finished: bool,
}

impl Handler<TEvent> for ProbeHandler {
    type Out = Parsed<()>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: TEvent) -> Option<Self::Out> {
        self.log.lock().unwrap().push((self.id, input));
        None
    }

    fn handle_error(&mut self, _error: SourceError) -> Option<Self::Out> {
        None
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        Parsed::Success(())
    }
}

impl Parser<TEvent> for ProbeParser {
    type Output = ();

    fn make_handler(&self) -> BoxHandler<TEvent, Parsed<()>> {
        Box::new(ProbeHandler {
            id: self.id,
            log: Arc::clone(&self.log),
            finished: false,
        })
    }
}
