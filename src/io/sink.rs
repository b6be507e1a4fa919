//! Sink trait definition and the small composable sinks.

use std::fmt::{self, Debug};
use std::io;
use std::sync::Arc;

/// Consumer of rendered text for one channel.
///
/// Implementors receive complete, already-rendered chunks. The text is only
/// borrowed for the duration of the call; copy it to keep it.
pub trait Sink: Send + Sync + Debug {
    /// Returns an identifier for this sink.
    ///
    /// Used in log events. Convention: "-" for stdout, "stderr", file path
    /// for files.
    fn id(&self) -> &str;

    /// Consume one chunk of text.
    ///
    /// Errors are reported to the caller's printer, which counts and
    /// discards them. They never reach the code that emitted the text.
    fn accept(&self, text: &str) -> io::Result<()>;

    /// Flush anything buffered.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        (**self).accept(text)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn id(&self) -> &str {
        "null"
    }

    fn accept(&self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}

type Callback = Arc<dyn Fn(&str) + Send + Sync>;

/// Sink backed by a host callback.
///
/// This is the usual way a GUI or embedding host receives output.
#[derive(Clone)]
pub struct FnSink {
    id: String,
    callback: Callback,
}

impl FnSink {
    pub fn new<F>(id: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            callback: Arc::new(callback),
        }
    }
}

impl Debug for FnSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").field("id", &self.id).finish()
    }
}

impl Sink for FnSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        (self.callback)(text);
        Ok(())
    }
}

/// Sink that forwards every chunk to several sinks in order.
///
/// Every target sees every chunk even if an earlier one fails; the first
/// error is returned.
#[derive(Debug, Clone)]
pub struct TeeSink {
    id: String,
    targets: Vec<Arc<dyn Sink>>,
}

impl TeeSink {
    pub fn new(targets: Vec<Arc<dyn Sink>>) -> Self {
        let id = targets
            .iter()
            .map(|t| t.id())
            .collect::<Vec<_>>()
            .join("+");
        Self { id, targets }
    }

    pub fn targets(&self) -> &[Arc<dyn Sink>] {
        &self.targets
    }
}

impl Sink for TeeSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        let mut first_err = None;
        for target in &self.targets {
            if let Err(e) = target.accept(text) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn flush(&self) -> io::Result<()> {
        let mut first_err = None;
        for target in &self.targets {
            if let Err(e) = target.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
