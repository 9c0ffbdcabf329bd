use madoko::fs::{MemoryFileSystem, StaticEnvironment};
use madoko::metadata::{Metadata, MetadataError};
use madoko::source::LineSource;

fn read(text: &str) -> (Result<Metadata, MetadataError>, Option<String>) {
    let fs = MemoryFileSystem::new();
    let env = StaticEnvironment::new("/work");
    let mut source = LineSource::from_text(text, "/work/doc.mdk", &fs, &env);
    let result = Metadata::read(&mut source);
    let next = source.peek_line().unwrap().map(|l| l.text);
    (result, next)
}

#[test]
fn reads_key_value_pairs() {
    let (metadata, next) = read("Title: A Book\nAuthor :  Someone  \n\n# Chapter");
    let metadata = metadata.unwrap();
    assert_eq!(metadata.len(), 2);
    assert_eq!(metadata.get("title"), Some("A Book"));
    assert_eq!(metadata.get("AUTHOR"), Some("Someone"));
    assert_eq!(metadata.title(), Some("A Book"));
    assert_eq!(next.as_deref(), Some("# Chapter"));
}

#[test]
fn value_is_split_at_the_first_colon() {
    let (metadata, _) = read("Link: http://example.com/a:b");
    assert_eq!(
        metadata.unwrap().get("link"),
        Some("http://example.com/a:b")
    );
}

#[test]
fn keys_may_hold_any_non_colon_characters() {
    let (metadata, next) = read("Title: T\nAuthor(s): A, B\nCo/Author: C\n\nBody");
    let metadata = metadata.unwrap();
    assert_eq!(metadata.get("author(s)"), Some("A, B"));
    assert_eq!(metadata.get("Co/Author"), Some("C"));
    assert_eq!(next.as_deref(), Some("Body"));
}

#[test]
fn bullet_lines_are_never_metadata() {
    let (metadata, next) = read("- item: one");
    assert!(metadata.unwrap().is_empty());
    assert_eq!(next.as_deref(), Some("- item: one"));
}

#[test]
fn indented_lines_continue_the_previous_value() {
    let (metadata, next) = read("Title: A long\n  and winding\n\ttitle\nBody text");
    assert_eq!(
        metadata.unwrap().get("Title"),
        Some("A long and winding title")
    );
    assert_eq!(next.as_deref(), Some("Body text"));
}

#[test]
fn blank_line_ends_continuation_but_not_the_header() {
    let (metadata, next) = read("Title: Book\n\nAuthor: Me\n\n   indented body\nmore");
    let metadata = metadata.unwrap();
    assert_eq!(metadata.get("title"), Some("Book"));
    assert_eq!(metadata.get("author"), Some("Me"));
    assert_eq!(next.as_deref(), Some("   indented body"));
}

#[test]
fn stops_without_consuming_the_first_body_line() {
    let (metadata, next) = read("Just a paragraph.\nTitle: not metadata");
    assert!(metadata.unwrap().is_empty());
    assert_eq!(next.as_deref(), Some("Just a paragraph."));
}

#[test]
fn heading_lines_are_never_metadata() {
    let (metadata, next) = read("# Part: One");
    assert!(metadata.unwrap().is_empty());
    assert_eq!(next.as_deref(), Some("# Part: One"));
}

#[test]
fn duplicate_keys_are_an_error() {
    let (metadata, _) = read("Title: One\ntitle: Two");
    match metadata {
        Err(MetadataError::DuplicateKey { key, location }) => {
            assert_eq!(key, "title");
            assert_eq!(location.line, 2);
        }
        other => panic!("expected DuplicateKey, got {:?}", other),
    }
}

#[test]
fn blank_title_is_no_title() {
    let (metadata, _) = read("Title :   \n[TITLE]");
    let metadata = metadata.unwrap();
    assert_eq!(metadata.get("title"), Some(""));
    assert_eq!(metadata.title(), None);
}

#[test]
fn empty_document_has_no_metadata() {
    let (metadata, next) = read("");
    assert!(metadata.unwrap().is_empty());
    assert_eq!(next, None);
}
