use madoko::block::Attributes;
use madoko::block::attribute::AttributeError;

#[test]
fn empty_input_has_no_attributes() {
    assert!(Attributes::parse("").unwrap().is_empty());
    assert!(Attributes::parse("   ").unwrap().is_empty());
}

#[test]
fn key_value_pairs() {
    let attrs = Attributes::parse("toc: no ; label : Intro").unwrap();
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("toc"), Some("no"));
    assert_eq!(attrs.get("label"), Some("Intro"));
}

#[test]
fn shorthands() {
    let attrs = Attributes::parse("#sec-intro; .wide; .boxed").unwrap();
    assert_eq!(attrs.id(), Some("sec-intro"));
    assert_eq!(attrs.classes().collect::<Vec<_>>(), vec!["wide", "boxed"]);
}

#[test]
fn parsing_is_idempotent() {
    let first = Attributes::parse("#a; .b; c: d").unwrap();
    let second = Attributes::parse("#a; .b; c: d").unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_key_is_rejected() {
    match Attributes::parse(":value") {
        Err(AttributeError::EmptyKey { segment, input }) => {
            assert_eq!(segment, ":value");
            assert_eq!(input, ":value");
        }
        other => panic!("expected EmptyKey, got {:?}", other),
    }
}

#[test]
fn empty_value_is_rejected() {
    let err = Attributes::parse("#ok; key:").unwrap_err();
    assert!(matches!(err, AttributeError::EmptyValue { .. }));
    let message = err.to_string();
    assert!(message.contains("key:"), "message was: {}", message);
    assert!(message.contains("#ok; key:"), "message was: {}", message);
}

#[test]
fn unrecognised_segment_is_rejected() {
    let err = Attributes::parse("#ok; nonsense").unwrap_err();
    assert!(matches!(err, AttributeError::InvalidSegment { ref segment, .. } if segment == "nonsense"));
}

#[test]
fn explicit_key_colliding_with_shorthand_is_rejected() {
    let err = Attributes::parse("#one; id: two").unwrap_err();
    assert!(matches!(err, AttributeError::DuplicateKey { ref key, .. } if key == "id"));

    let err = Attributes::parse(".a; class: b").unwrap_err();
    assert!(matches!(err, AttributeError::DuplicateKey { ref key, .. } if key == "class"));
}
