//! Tests for the composable sinks.

use std::io;
use std::sync::{Arc, Mutex};

use crate::io::{FnSink, InMemorySink, NullSink, Sink, TeeSink};

#[derive(Debug)]
struct BrokenSink;

impl Sink for BrokenSink {
    fn id(&self) -> &str {
        "broken"
    }

    fn accept(&self, _text: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[test]
fn null_sink_accepts_everything() {
    assert!(NullSink.accept("anything").is_ok());
    assert_eq!(NullSink.id(), "null");
}

#[test]
fn fn_sink_calls_back() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_cb = seen.clone();
    let sink = FnSink::new("console", move |text| {
        seen_cb.lock().unwrap().push(text.to_uppercase());
    });

    sink.accept("hello").unwrap();
    assert_eq!(sink.id(), "console");
    assert_eq!(*seen.lock().unwrap(), vec!["HELLO"]);
}

#[test]
fn tee_sink_reaches_every_target() {
    let a = InMemorySink::new("a");
    let b = InMemorySink::new("b");
    let tee = TeeSink::new(vec![Arc::new(a.clone()), Arc::new(b.clone())]);

    tee.accept("split").unwrap();

    assert_eq!(tee.id(), "a+b");
    assert_eq!(tee.targets().len(), 2);
    assert_eq!(a.contents(), "split");
    assert_eq!(b.contents(), "split");
}

#[test]
fn tee_sink_keeps_going_after_a_failure() {
    let after = InMemorySink::new("after");
    let tee = TeeSink::new(vec![Arc::new(BrokenSink), Arc::new(after.clone())]);

    let err = tee.accept("text").unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(after.contents(), "text");
}

#[test]
fn arc_of_sink_is_a_sink() {
    let inner = InMemorySink::new("inner");
    let shared: Arc<InMemorySink> = Arc::new(inner.clone());
    Sink::accept(&shared, "via arc").unwrap();
    assert_eq!(Sink::id(&shared), "inner");
    assert_eq!(inner.contents(), "via arc");
}
