use weir::{one_of, parse, DriveError, ParseError, Parser};

mod common;
use common::{sum, value, TEvent};

fn stream() -> Vec<TEvent> {
    vec![
        TEvent::Open("a"),
        TEvent::Value(4),
        TEvent::Close,
    ]
}

#[test]
fn lowest_index_wins_a_same_event_tie() {
    let alternatives = one_of![
        value().map(|v| ("first", v)),
        value().map(|v| ("second", v)),
    ];
    let result = parse(stream(), &alternatives.into_consumer()).unwrap();
    assert_eq!(result, ("first", 4));
}

#[test]
fn a_late_success_beats_an_early_error() {
    let failing = value().try_map(|_| Err::<i32, _>(ParseError::Message("broken".into())));
    let alternatives = one_of![failing, sum()];
    let result = parse(stream(), &alternatives.into_consumer()).unwrap();
    assert_eq!(result, 4);
}

#[test]
fn the_first_error_is_reported_when_nothing_succeeds() {
    let first = value().try_map(|_| Err::<i32, _>(ParseError::Message("first".into())));
    let second = value().try_map(|_| Err::<i32, _>(ParseError::Message("second".into())));
    let never = value().filter(|_| false);
    let alternatives = one_of![never, first, second];

    match parse(stream(), &alternatives.into_consumer()) {
        Err(DriveError::Parse(ParseError::Message(msg))) => assert_eq!(msg, "first"),
        other => panic!("expected the first error, got {other:?}"),
    }
}

#[test]
fn all_empty_is_empty() {
    let alternatives = one_of![
        value().filter(|_| false),
        value().filter(|_| false),
    ];
    let result = parse(stream(), &alternatives.into_consumer());
    assert!(matches!(result, Err(DriveError::NoValue)));
}

#[test]
fn a_winner_stops_event_delivery_to_the_rest() {
    // The second alternative would error on the second value; the first
    // settles on the first value, so the error never materializes.
    let events = vec![
        TEvent::Open("a"),
        TEvent::Value(1),
        TEvent::Value(2),
        TEvent::Close,
    ];
    let failing_on_two = sum().try_map(|total| {
        if total > 1 {
            Err(ParseError::Message("too much".into()))
        } else {
            Ok(total)
        }
    });
    let alternatives = one_of![value(), failing_on_two];
    assert_eq!(parse(events, &alternatives.into_consumer()).unwrap(), 1);
}
