//! Sink abstractions and implementations.
//!
//! This module provides:
//! - `Sink`: Trait for consumers of rendered text
//! - Baseline sinks for stdout/stderr, plus a file sink
//! - Composable sinks: callback, tee, null
//! - An in-memory capturing sink for testing
//! - A queue sink feeding async consumers (feature `async`)

mod memory;
mod sink;
mod std_io;

pub use memory::InMemorySink;
pub use sink::{FnSink, NullSink, Sink, TeeSink};
pub use std_io::{FileSink, StderrSink, StdoutSink};

#[cfg(feature = "async")]
mod queue;

#[cfg(feature = "async")]
pub use queue::{QueueReceiver, QueueSink};
