use weir::testing::ScriptedSource;
use weir::{parse, DriveError, ParseError, Parser, SourceError, Splitter, TransformerExt};

mod common;
use common::{label, sum, value, BrokenLabel, ExtractLabel, TEvent};

fn blog(posts: &[&[i32]]) -> Vec<TEvent> {
    let mut events = vec![TEvent::Open("blog")];
    for post in posts {
        events.push(TEvent::Open("post"));
        events.extend(post.iter().map(|n| TEvent::Value(*n)));
        events.push(TEvent::Close);
    }
    events.push(TEvent::Close);
    events
}

#[test]
fn collects_one_result_per_sub_stream_in_order() {
    let events = blog(&[&[1], &[2], &[3]]);
    let consumer = Splitter::new(label("blog") / label("post"))
        .as_list_of(value())
        .into_consumer();
    assert_eq!(parse(events, &consumer).unwrap(), vec![1, 2, 3]);
}

#[test]
fn events_outside_sub_streams_are_dropped() {
    let events = vec![
        TEvent::Open("blog"),
        TEvent::Value(99),
        TEvent::Open("post"),
        TEvent::Value(1),
        TEvent::Close,
        TEvent::Value(98),
        TEvent::Close,
    ];
    let consumer = Splitter::new(label("blog") / label("post"))
        .as_list_of(sum())
        .into_consumer();
    assert_eq!(parse(events, &consumer).unwrap(), vec![1]);
}

#[test]
fn sub_stream_close_is_structural() {
    // A nested `post` inside a matched `post` must not re-open or close the
    // sub-stream early; it belongs to the outer sub-stream.
    let events = vec![
        TEvent::Open("blog"),
        TEvent::Open("post"),
        TEvent::Value(1),
        TEvent::Open("post"),
        TEvent::Value(2),
        TEvent::Close,
        TEvent::Value(3),
        TEvent::Close,
        TEvent::Close,
    ];
    let consumer = Splitter::new(label("blog") / label("post"))
        .as_list_of(sum())
        .into_consumer();
    assert_eq!(parse(events, &consumer).unwrap(), vec![6]);
}

#[test]
fn first_stops_at_the_first_sub_stream_end() {
    // Anything the driver pulls past the first `</post>` is a fault, so a
    // passing test proves the short-circuit.
    let script = vec![
        Ok(TEvent::Open("blog")),
        Ok(TEvent::Open("post")),
        Ok(TEvent::Value(1)),
        Ok(TEvent::Value(2)),
        Ok(TEvent::Close),
        Err(SourceError::message("read past the first sub-stream")),
    ];
    let source = ScriptedSource::from_script(script);
    let close_probe = source.close_probe();
    let consumer = Splitter::new(label("blog") / label("post"))
        .first(sum())
        .into_consumer();

    assert_eq!(parse(source, &consumer).unwrap(), 3);
    assert_eq!(close_probe.count(), 1, "source released promptly");
}

#[test]
fn first_skips_empty_sub_streams() {
    let events = blog(&[&[], &[5]]);
    let consumer = Splitter::new(label("blog") / label("post"))
        .first(value())
        .into_consumer();
    assert_eq!(parse(events, &consumer).unwrap(), 5);
}

#[test]
fn exhausted_first_is_no_value() {
    let events = blog(&[]);
    let consumer = Splitter::new(label("blog") / label("post"))
        .first(value())
        .into_consumer();
    assert!(matches!(parse(events, &consumer), Err(DriveError::NoValue)));
}

#[test]
fn match_failure_is_surfaced_downstream() {
    let events = blog(&[&[1]]);
    let consumer = Splitter::new(label("blog") / BrokenLabel("post"))
        .as_list_of(value())
        .into_consumer();
    match parse(events, &consumer) {
        Err(DriveError::Parse(ParseError::Match(_))) => {}
        other => panic!("expected a match error, got {other:?}"),
    }
}

#[test]
fn context_reaches_the_bound_parser() {
    let events = vec![
        TEvent::Open("blog"),
        TEvent::Open("post"),
        TEvent::Value(1),
        TEvent::Close,
        TEvent::Open("ad"),
        TEvent::Value(2),
        TEvent::Close,
        TEvent::Close,
    ];
    let consumer = Splitter::new(label("blog") / ExtractLabel)
        .through_with(|((), name)| value().map(move |v| (name, v)))
        .parse_to_list()
        .into_consumer();
    assert_eq!(
        parse(events, &consumer).unwrap(),
        vec![("post", 1), ("ad", 2)]
    );
}

#[test]
fn splitters_nest() {
    // blog > post > comment, with the inner splitter scoped to one post.
    let events = vec![
        TEvent::Open("blog"),
        TEvent::Open("post"),
        TEvent::Open("comment"),
        TEvent::Value(1),
        TEvent::Close,
        TEvent::Open("comment"),
        TEvent::Value(2),
        TEvent::Close,
        TEvent::Close,
        TEvent::Open("post"),
        TEvent::Open("comment"),
        TEvent::Value(3),
        TEvent::Close,
        TEvent::Close,
        TEvent::Close,
    ];
    let comments = || {
        Splitter::new(label("post") / label("comment")).as_list_of(value())
    };
    let consumer = Splitter::new(label("blog") / label("post"))
        .as_list_of(comments())
        .into_consumer();
    assert_eq!(
        parse(events, &consumer).unwrap(),
        vec![vec![1, 2], vec![3]]
    );
}
