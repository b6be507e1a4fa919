//! # printio
//!
//! Dual-channel printf-style output with pluggable sinks.
//!
//! ## Overview
//!
//! printio lets a library or embedded interpreter print human-readable text
//! without deciding where it ends up:
//! - **Two channels**: `Normal` for informational output, `Error` for diagnostics
//! - **printf semantics**: C format strings rendered by a pure, total renderer
//! - **Two call shapes**: variadic macros and functions taking a pre-packed
//!   `ArgList`, rendering byte-identical text
//! - **Pluggable sinks**: stdout/stderr by default, files, callbacks, tees,
//!   in-memory capture, async queues
//! - **Best-effort delivery**: emitting never fails; sink errors are counted
//!   and swallowed
//! - **Configuration**: sinks and length bound from JSON/YAML/TOML files
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use printio::{Channel, InMemorySink, emit_error, emit_normal};
//!
//! // stdout by default
//! emit_normal!("%d apples, %s\n", 3, "ripe");
//!
//! // capture the error channel for a while
//! let capture = InMemorySink::new("capture");
//! let previous = printio::set_sink(Channel::Error, Arc::new(capture.clone()));
//! emit_error!("failure: %s (code %d)", "disk full", 28);
//! printio::set_sink(Channel::Error, previous);
//!
//! assert_eq!(capture.contents(), "failure: disk full (code 28)");
//! ```
//!
//! ## Forwarding arguments
//!
//! A wrapper that takes its own arguments forwards them as an `ArgList`:
//!
//! ```rust
//! use printio::{ArgList, emit_error_v};
//!
//! fn warn(format: &str, args: &ArgList<'_>) {
//!     emit_error_v(format, args);
//! }
//!
//! warn("%s: %d%%\n", &printio::args!["progress", 40]);
//! ```
//!
//! ## Injected printers
//!
//! The global entry points use a process-wide `Printer`. Code that should
//! not touch global state takes a `Printer` (built with `PrinterBuilder` or
//! `Printer::default()`) and calls `emit_v`, or uses the `emit!` macro.
//!
//! ## Length bound
//!
//! Rendered text is cut to `DEFAULT_MAX_CHARS` characters unless the
//! printer's `RenderLimit` says otherwise. Truncation keeps exactly the first
//! N characters and is not an error.
//!
//! ## Features
//!
//! - `yaml` - YAML configuration files (enabled by default)
//! - `json` - JSON configuration files
//! - `toml` - TOML configuration files
//! - `async` - `QueueSink` feeding a tokio consumer
//! - `miette` - Pretty error reporting with miette
//! - `tracing` - Log sink installation, truncation and sink failures

#[macro_use]
mod macros;

// Core modules
pub mod builder;
pub mod channel;
pub mod config;
pub mod error;
pub mod format;
pub mod global;
pub mod io;
pub mod printer;
pub mod registry;

// Re-exports for convenience
pub use builder::PrinterBuilder;
pub use channel::Channel;
pub use config::{FileExistsPolicy, PrintConfig, SinkConfig, SinkKind, SinkSpec};
pub use error::{ConfigError, Stage};
pub use format::{
    ArgList, DEFAULT_MAX_CHARS, FormatArg, FormatError, FormatRequest, RenderLimit, RenderedText,
    render, try_render,
};
pub use global::{
    emit_error_v, emit_normal_v, install_config, printer, reset, scoped_sink, set_sink, sink,
};
pub use io::{FileSink, FnSink, InMemorySink, NullSink, Sink, StderrSink, StdoutSink, TeeSink};
pub use printer::Printer;
pub use registry::{SinkGuard, SinkRegistry};

// Async re-exports
#[cfg(feature = "async")]
pub use io::{QueueReceiver, QueueSink};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::PrintDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
