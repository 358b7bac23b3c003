use weir::testing::RecordingHandler;
use weir::{
    drive, funnel, parse, BoxHandler, Handler, Parsed, Parser, SourceError, Splitter, Transformer,
    TransformerExt,
};

mod common;
use common::{label, value, TEvent};

fn interleaved() -> Vec<TEvent> {
    vec![
        TEvent::Open("blog"),
        TEvent::Open("author"),
        TEvent::Value(1),
        TEvent::Close,
        TEvent::Open("stats"),
        TEvent::Value(10),
        TEvent::Close,
        TEvent::Open("author"),
        TEvent::Value(2),
        TEvent::Close,
        TEvent::Close,
    ]
}

#[test]
fn merged_funnels_preserve_stream_order() {
    let authors = Splitter::new(label("blog") / label("author")).through(value());
    let stats = Splitter::new(label("blog") / label("stats")).through(value());
    let consumer = funnel![authors, stats].parse_to_list().into_consumer();
    assert_eq!(parse(interleaved(), &consumer).unwrap(), vec![1, 10, 2]);
}

#[test]
fn merge_is_the_binary_funnel() {
    let authors = Splitter::new(label("blog") / label("author")).through(value());
    let stats = Splitter::new(label("blog") / label("stats")).through(value());
    let consumer = authors.merge(stats).parse_to_list().into_consumer();
    assert_eq!(parse(interleaved(), &consumer).unwrap(), vec![1, 10, 2]);
}

#[test]
fn downstream_sees_exactly_one_end() {
    let authors = Splitter::new(label("blog") / label("author")).through(value());
    let stats = Splitter::new(label("blog") / label("stats")).through(value());
    let merged = funnel![authors, stats];

    let downstream = RecordingHandler::<Parsed<i32>>::new();
    let probe = downstream.probe();
    let mut handler = merged.spawn(Box::new(downstream));

    drive(interleaved(), &mut handler).unwrap();

    assert_eq!(probe.end_count(), 1);
    assert_eq!(
        probe.inputs(),
        vec![
            Parsed::Success(1),
            Parsed::Success(10),
            Parsed::Success(2)
        ]
    );
}

/// Emits the first `Value` event it sees, then retires.
struct TakeFirstValue;

impl Transformer<TEvent> for TakeFirstValue {
    type Emitted = Parsed<i32>;

    fn spawn<Out: 'static>(
        &self,
        downstream: BoxHandler<Parsed<i32>, Out>,
    ) -> BoxHandler<TEvent, Out> {
        Box::new(TakeFirstHandler {
            downstream,
            done: false,
        })
    }
}

struct TakeFirstHandler<Out> {
    downstream: BoxHandler<Parsed<i32>, Out>,
    done: bool,
}

impl<Out: 'static> Handler<TEvent> for TakeFirstHandler<Out> {
    type Out = Out;

    fn is_finished(&self) -> bool {
        self.done || self.downstream.is_finished()
    }

    fn handle_input(&mut self, input: TEvent) -> Option<Out> {
        if let TEvent::Value(n) = input {
            self.done = true;
            return self.downstream.handle_input(Parsed::Success(n));
        }
        None
    }

    fn handle_error(&mut self, _error: SourceError) -> Option<Out> {
        None
    }

    fn handle_end(&mut self) -> Out {
        self.done = true;
        self.downstream.handle_end()
    }
}

#[test]
fn one_funnel_retiring_early_does_not_end_the_downstream() {
    let authors = Splitter::new(label("blog") / label("author")).through(value());
    let consumer = funnel![TakeFirstValue, authors].parse_to_list().into_consumer();
    // TakeFirstValue grabs the first value (1, inside the first author);
    // the splitter keeps emitting afterwards.
    assert_eq!(parse(interleaved(), &consumer).unwrap(), vec![1, 1, 2]);
}

#[test]
fn when_every_funnel_is_done_the_end_is_delivered_early() {
    let only_first = funnel![TakeFirstValue].parse_to_list().into_consumer();
    // The single funnel retires at the first value; the downstream list is
    // ended right there, well before end of input.
    assert_eq!(parse(interleaved(), &only_first).unwrap(), vec![1]);
}
