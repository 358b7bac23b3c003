use weir::testing::ScriptedSource;
use weir::{funnel, parse, DriveError, ParseError, Parser, Splitter, TransformerExt};
use weir_xml::{attr, attr_opt, elem, elem_attr, text, ElemStart, XmlEvent, XmlSlice};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Author {
    id: String,
    name: String,
}

#[test]
fn flat_attributes_combine() {
    let parser = (attr("id"), attr("name"))
        .map(|(id, name)| Author { id, name })
        .into_consumer();
    let author = parse(XmlSlice::new(r#"<a id="x" name="y"/>"#), &parser).unwrap();
    assert_eq!(
        author,
        Author {
            id: "x".into(),
            name: "y".into()
        }
    );
}

#[test]
fn a_missing_mandatory_attribute_is_an_error() {
    let parser = (attr("id"), attr("name"))
        .map(|(id, name)| Author { id, name })
        .into_consumer();
    match parse(XmlSlice::new(r#"<a id="x"/>"#), &parser) {
        Err(DriveError::Parse(ParseError::MissingAttribute(name))) => assert_eq!(name, "name"),
        other => panic!("expected a missing-attribute error, got {other:?}"),
    }
}

#[test]
fn split_posts_collect_in_document_order() {
    let xml = r#"<blog><post date="2015-11-16"/><post date="2015-11-17"/></blog>"#;
    let dates = Splitter::new(elem("blog") / elem("post"))
        .as_list_of(attr("date"))
        .into_consumer();
    assert_eq!(
        parse(XmlSlice::new(xml), &dates).unwrap(),
        vec!["2015-11-16".to_string(), "2015-11-17".to_string()]
    );
}

fn post(date: &str) -> Vec<XmlEvent> {
    vec![
        XmlEvent::ElemStart(ElemStart::new(
            "post",
            vec![("date".to_string(), date.to_string())],
        )),
        XmlEvent::ElemEnd("post".to_string()),
    ]
}

#[test]
fn first_releases_after_the_first_post() {
    // Everything past the first `</post>` is a fault; reaching it would
    // fail the parse, so a passing test proves the short-circuit.
    let mut script = vec![Ok(XmlEvent::ElemStart(ElemStart::new("blog", Vec::new())))];
    script.extend(post("2015-11-16").into_iter().map(Ok));
    for _ in 0..1000 {
        script.push(Err(weir::SourceError::message("read past the first post")));
    }

    let source = ScriptedSource::from_script(script);
    let close_probe = source.close_probe();
    let first_date = Splitter::new(elem("blog") / elem("post"))
        .first(attr("date"))
        .into_consumer();

    assert_eq!(parse(source, &first_date).unwrap(), "2015-11-16");
    assert_eq!(close_probe.count(), 1);
}

#[test]
fn funnelled_splitters_merge_in_stream_order() {
    let xml = "<blog>\
               <post><author>ada</author><stats>40</stats></post>\
               <post><stats>41</stats><author>brian</author></post>\
               </blog>";
    let authors = Splitter::new(elem("blog") / elem("post") / elem("author")).through(text());
    let stats = Splitter::new(elem("blog") / elem("post") / elem("stats")).through(text());
    let merged = funnel![authors, stats].parse_to_list().into_consumer();
    assert_eq!(
        parse(XmlSlice::new(xml), &merged).unwrap(),
        vec!["ada", "40", "41", "brian"]
    );
}

#[test]
fn optional_attributes_do_not_fail() {
    let xml = r#"<blog><post date="d1"/><post/></blog>"#;
    let dates = Splitter::new(elem("blog") / elem("post"))
        .as_list_of(attr_opt("date"))
        .into_consumer();
    assert_eq!(
        parse(XmlSlice::new(xml), &dates).unwrap(),
        vec![Some("d1".to_string()), None]
    );
}

#[test]
fn text_concatenates_across_nested_elements() {
    let xml = "<post>a<b>bold</b>tail</post>";
    let body = Splitter::new(elem("post")).first(text()).into_consumer();
    assert_eq!(parse(XmlSlice::new(xml), &body).unwrap(), "aboldtail");
}

#[test]
fn attribute_context_binds_the_inner_parser() {
    let xml = r#"<blog><post date="d1"><author>ada</author></post></blog>"#;
    let dated_authors = Splitter::new(elem("blog") / elem_attr("post", "date") / elem("author"))
        .through_with(|(((), date), ())| {
            text().map(move |author| (date.clone(), author))
        })
        .parse_to_list()
        .into_consumer();
    assert_eq!(
        parse(XmlSlice::new(xml), &dated_authors).unwrap(),
        vec![("d1".to_string(), "ada".to_string())]
    );
}

#[test]
fn a_failing_context_extraction_surfaces() {
    let xml = r#"<blog><post><author>ada</author></post></blog>"#;
    let dated_authors = Splitter::new(elem("blog") / elem_attr("post", "date") / elem("author"))
        .through_with(|(((), date), ())| {
            text().map(move |author| (date.clone(), author))
        })
        .parse_to_list()
        .into_consumer();
    match parse(XmlSlice::new(xml), &dated_authors) {
        Err(DriveError::Parse(ParseError::Match(_))) => {}
        other => panic!("expected a match error, got {other:?}"),
    }
}
