use std::sync::{Arc, Mutex};

use weir::{parse, DriveError, ParseError, Parser};

mod common;
use common::{probe, sum, value, TEvent};

fn stream() -> Vec<TEvent> {
    vec![
        TEvent::Open("a"),
        TEvent::Value(2),
        TEvent::Value(3),
        TEvent::Close,
    ]
}

#[test]
fn pair_combines_both_results() {
    let consumer = value().and(sum()).into_consumer();
    assert_eq!(parse(stream(), &consumer).unwrap(), (2, 5));
}

#[test]
fn every_child_sees_every_event_in_stream_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let consumer = probe(1, &log).and(probe(2, &log)).into_consumer();
    parse(stream(), &consumer).unwrap();

    let recorded = log.lock().unwrap().clone();
    let mut expected = Vec::new();
    for event in stream() {
        expected.push((1, event.clone()));
        expected.push((2, event));
    }
    assert_eq!(
        recorded, expected,
        "children are notified in index order, one event at a time"
    );
}

#[test]
fn first_error_by_index_poisons_the_pair() {
    let left = value().try_map(|_| Err::<i32, _>(ParseError::Message("left".into())));
    let right = value().try_map(|_| Err::<i32, _>(ParseError::Message("right".into())));
    let consumer = left.and(right).into_consumer();

    match parse(stream(), &consumer) {
        Err(DriveError::Parse(ParseError::Message(msg))) => assert_eq!(msg, "left"),
        other => panic!("expected the left error, got {other:?}"),
    }
}

#[test]
fn a_sound_child_does_not_mask_a_failing_sibling() {
    let right = value().try_map(|_| Err::<i32, _>(ParseError::Message("right".into())));
    let consumer = value().and(right).into_consumer();

    match parse(stream(), &consumer) {
        Err(DriveError::Parse(ParseError::Message(msg))) => assert_eq!(msg, "right"),
        other => panic!("expected the right error, got {other:?}"),
    }
}

#[test]
fn tuples_flatten_at_the_call_site() {
    let consumer = (value(), sum(), value())
        .map(|(first, total, again)| (first, total, again))
        .into_consumer();
    assert_eq!(parse(stream(), &consumer).unwrap(), (2, 5, 2));
}

#[test]
fn unfinished_children_are_finished_at_end_of_input() {
    // `sum` only settles at end of input; the pair must still combine.
    let consumer = sum().and(sum()).into_consumer();
    assert_eq!(parse(stream(), &consumer).unwrap(), (5, 5));
}

#[test]
fn four_wide_tuple() {
    let consumer = (value(), sum(), value(), sum())
        .map(|(a, b, c, d)| a + b + c + d)
        .into_consumer();
    assert_eq!(parse(stream(), &consumer).unwrap(), 14);
}
