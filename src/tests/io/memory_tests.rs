//! Tests for the in-memory sink.

use crate::io::{InMemorySink, Sink};

#[test]
fn in_memory_sink_keeps_chunks_in_order() {
    let sink = InMemorySink::new("capture");
    assert!(sink.is_empty());

    sink.accept("abc").unwrap();
    sink.accept("").unwrap();
    sink.accept("def").unwrap();

    assert_eq!(sink.id(), "capture");
    assert_eq!(sink.contents(), "abcdef");
    assert_eq!(sink.chunks(), vec!["abc", "", "def"]);
}

#[test]
fn clones_share_the_buffer() {
    let sink = InMemorySink::new("capture");
    let reader = sink.clone();

    sink.accept("shared").unwrap();
    assert_eq!(reader.contents(), "shared");

    reader.clear();
    assert!(sink.is_empty());
}

#[test]
fn take_empties_the_sink() {
    let sink = InMemorySink::new("capture");
    sink.accept("one").unwrap();
    sink.accept("two").unwrap();

    assert_eq!(sink.take(), vec!["one", "two"]);
    assert!(sink.is_empty());
}
