//! Tests for the printer: routing, limits and failure handling.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::channel::Channel;
use crate::format::{FormatError, FormatRequest, RenderLimit};
use crate::io::{InMemorySink, NullSink, Sink};
use crate::printer::Printer;
use crate::registry::SinkRegistry;

#[derive(Debug)]
struct FailingSink;

impl Sink for FailingSink {
    fn id(&self) -> &str {
        "failing"
    }

    fn accept(&self, _text: &str) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&self) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

#[derive(Debug)]
struct PanickingSink;

impl Sink for PanickingSink {
    fn id(&self) -> &str {
        "panicking"
    }

    fn accept(&self, _text: &str) -> io::Result<()> {
        panic!("sink blew up");
    }
}

#[derive(Debug, Default)]
struct CountingSink {
    flushes: AtomicUsize,
}

impl Sink for CountingSink {
    fn id(&self) -> &str {
        "counting"
    }

    fn accept(&self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

fn capturing_printer() -> (Printer, InMemorySink, InMemorySink) {
    let normal = InMemorySink::new("normal");
    let error = InMemorySink::new("error");
    let registry = SinkRegistry::with_baseline(Arc::new(normal.clone()), Arc::new(error.clone()));
    (Printer::new(registry, RenderLimit::default()), normal, error)
}

#[test]
fn routes_each_channel_to_its_own_sink() {
    let (printer, normal, error) = capturing_printer();

    printer.normal_v("%d apples, %s\n", &args![3, "ripe"]);
    printer.error_v("failure: %s (code %d)", &args!["disk full", 28]);

    assert_eq!(normal.contents(), "3 apples, ripe\n");
    assert_eq!(error.contents(), "failure: disk full (code 28)");
}

#[test]
fn one_emit_is_one_chunk() {
    let (printer, normal, _error) = capturing_printer();

    printer.emit_v(Channel::Normal, "%s-%s-%s", &args!["a", "b", "c"]);
    printer.emit_v(Channel::Normal, "", &args![]);

    assert_eq!(normal.chunks(), vec!["a-b-c", ""]);
}

#[test]
fn macro_and_list_forms_agree() {
    let (printer, normal, _error) = capturing_printer();

    crate::emit!(printer, Channel::Normal, "%5.1f|%-4s|%x", 3.14159, "ab", 255);
    let direct = normal.take();

    let args = args![3.14159, "ab", 255];
    printer.emit_v(Channel::Normal, "%5.1f|%-4s|%x", &args);
    let forwarded = normal.take();

    assert_eq!(direct, forwarded);
    assert_eq!(direct, vec!["  3.1|ab  |ff"]);
}

#[test]
fn sink_errors_are_counted_and_swallowed() {
    let (printer, normal, _error) = capturing_printer();
    printer.set_sink(Channel::Error, Arc::new(FailingSink));

    printer.error_v("lost %d", &args![1]);
    printer.error_v("lost %d", &args![2]);
    printer.normal_v("kept", &args![]);

    assert_eq!(printer.failures(Channel::Error), 2);
    assert_eq!(printer.failures(Channel::Normal), 0);
    assert_eq!(normal.contents(), "kept");
}

#[test]
fn sink_panics_do_not_escape() {
    let (printer, _normal, error) = capturing_printer();
    printer.set_sink(Channel::Normal, Arc::new(PanickingSink));

    printer.normal_v("boom", &args![]);
    printer.error_v("still here", &args![]);

    assert_eq!(printer.failures(Channel::Normal), 1);
    assert_eq!(error.contents(), "still here");
}

#[test]
fn failing_sink_does_not_fall_back() {
    let (printer, normal, error) = capturing_printer();
    printer.set_sink(Channel::Normal, Arc::new(FailingSink));

    printer.normal_v("nowhere", &args![]);

    assert!(normal.is_empty());
    assert!(error.is_empty());
}

#[test]
fn emit_str_does_not_interpret_percent() {
    let (printer, normal, _error) = capturing_printer();

    printer.emit_str(Channel::Normal, "100% done %d");

    assert_eq!(normal.contents(), "100% done %d");
}

#[test]
fn try_emit_rejects_mismatches_without_emitting() {
    let (printer, normal, _error) = capturing_printer();

    let err = printer
        .try_emit_v(Channel::Normal, "%d apples", &args!["three"])
        .unwrap_err();
    assert!(matches!(err, FormatError::ArgumentMismatch { .. }));
    assert!(normal.is_empty());

    printer
        .try_emit_v(Channel::Normal, "%d apples", &args![3])
        .unwrap();
    assert_eq!(normal.contents(), "3 apples");
}

#[test]
fn checked_requests_emit() {
    let (printer, _normal, error) = capturing_printer();

    let request = FormatRequest::new("code %03d", args![7]).unwrap();
    printer.emit_request(Channel::Error, &request);

    assert_eq!(error.contents(), "code 007");
}

#[test]
fn limit_applies_to_later_emits() {
    let (printer, normal, _error) = capturing_printer();

    printer.set_limit(RenderLimit::Chars(4));
    assert_eq!(printer.limit(), RenderLimit::Chars(4));
    printer.normal_v("%s", &args!["truncated"]);

    printer.set_limit(RenderLimit::Unbounded);
    assert_eq!(printer.limit(), RenderLimit::Unbounded);
    printer.normal_v("%s", &args!["whole"]);

    assert_eq!(normal.chunks(), vec!["trun", "whole"]);
}

#[test]
fn unbounded_limit_keeps_long_output() {
    let (printer, normal, _error) = capturing_printer();
    printer.set_limit(RenderLimit::Unbounded);

    let long = "x".repeat(200_000);
    printer.normal_v("%s", &args![long.as_str()]);

    assert_eq!(normal.contents().len(), 200_000);
}

#[test]
fn scoped_sink_restores_on_drop() {
    let (printer, normal, _error) = capturing_printer();
    let temp = InMemorySink::new("temp");

    {
        let _guard = printer.scoped_sink(Channel::Normal, Arc::new(temp.clone()));
        printer.normal_v("inside", &args![]);
    }
    printer.normal_v("outside", &args![]);

    assert_eq!(temp.contents(), "inside");
    assert_eq!(normal.contents(), "outside");
}

#[test]
fn flush_reaches_the_sink() {
    let (printer, _normal, _error) = capturing_printer();
    let counting = Arc::new(CountingSink::default());
    printer.set_sink(Channel::Normal, counting.clone());
    printer.set_sink(Channel::Error, Arc::new(FailingSink));

    printer.flush(Channel::Normal);
    printer.flush(Channel::Error);

    assert_eq!(counting.flushes.load(Ordering::Relaxed), 1);
    assert_eq!(printer.failures(Channel::Error), 1);
}

#[test]
fn default_printer_has_sinks() {
    let printer = Printer::default();
    assert_eq!(printer.sink(Channel::Normal).id(), "-");
    assert_eq!(printer.sink(Channel::Error).id(), "stderr");

    printer.set_sink(Channel::Normal, Arc::new(NullSink));
    printer.normal_v("discarded", &args![]);
    assert_eq!(printer.failures(Channel::Normal), 0);
}
