//! The printer: renderer, registry and limit bundled as one context object.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::channel::Channel;
use crate::format::{self, ArgList, FormatError, FormatRequest, RenderLimit, RenderedText};
use crate::io::Sink;
use crate::registry::{SinkGuard, SinkRegistry};

const UNBOUNDED: usize = usize::MAX;

/// Renders formatted text and routes it to the sink of a channel.
///
/// Every emitting method is infallible from the caller's side: a sink that
/// returns an error or panics has the failure counted (see
/// [`Printer::failures`]) and the text is lost. Nothing is retried and
/// nothing falls back to the other channel.
#[derive(Debug)]
pub struct Printer {
    registry: SinkRegistry,
    limit: AtomicUsize,
    failures: [AtomicU64; 2],
}

impl Printer {
    /// Create a printer over `registry` with the given render limit.
    pub fn new(registry: SinkRegistry, limit: RenderLimit) -> Self {
        Self {
            registry,
            limit: AtomicUsize::new(encode_limit(limit)),
            failures: [AtomicU64::new(0), AtomicU64::new(0)],
        }
    }

    /// Get the sink registry.
    pub fn registry(&self) -> &SinkRegistry {
        &self.registry
    }

    /// Get the render limit.
    pub fn limit(&self) -> RenderLimit {
        match self.limit.load(Ordering::Relaxed) {
            UNBOUNDED => RenderLimit::Unbounded,
            n => RenderLimit::Chars(n),
        }
    }

    /// Change the render limit for subsequent emits.
    pub fn set_limit(&self, limit: RenderLimit) {
        self.limit.store(encode_limit(limit), Ordering::Relaxed);
    }

    /// The sink currently installed for `channel`.
    pub fn sink(&self, channel: Channel) -> Arc<dyn Sink> {
        self.registry.get(channel)
    }

    /// Install `sink` for `channel`, returning the previous one.
    pub fn set_sink(&self, channel: Channel, sink: Arc<dyn Sink>) -> Arc<dyn Sink> {
        self.registry.set(channel, sink)
    }

    /// Install `sink` for `channel` until the guard is dropped.
    pub fn scoped_sink(&self, channel: Channel, sink: Arc<dyn Sink>) -> SinkGuard<'_> {
        self.registry.scoped(channel, sink)
    }

    /// Render `format` with a pre-packed argument list and emit it.
    pub fn emit_v(&self, channel: Channel, format: &str, args: &ArgList<'_>) {
        let text = format::render(format, args, self.limit());
        self.dispatch(channel, &text);
    }

    /// [`Printer::emit_v`] on the normal channel.
    pub fn normal_v(&self, format: &str, args: &ArgList<'_>) {
        self.emit_v(Channel::Normal, format, args);
    }

    /// [`Printer::emit_v`] on the error channel.
    pub fn error_v(&self, format: &str, args: &ArgList<'_>) {
        self.emit_v(Channel::Error, format, args);
    }

    /// Emit a request that was checked when it was built.
    pub fn emit_request(&self, channel: Channel, request: &FormatRequest<'_, '_>) {
        let text = request.render(self.limit());
        self.dispatch(channel, &text);
    }

    /// Check `format` against `args` and emit only if they agree.
    ///
    /// The error describes the caller's mistake; nothing is emitted for a
    /// rejected request.
    pub fn try_emit_v(
        &self,
        channel: Channel,
        format: &str,
        args: &ArgList<'_>,
    ) -> Result<(), FormatError> {
        let text = format::try_render(format, args, self.limit())?;
        self.dispatch(channel, &text);
        Ok(())
    }

    /// Emit text as is, without interpreting `%`.
    pub fn emit_str(&self, channel: Channel, text: &str) {
        let mut args = ArgList::with_capacity(1);
        args.push(text);
        self.emit_v(channel, "%s", &args);
    }

    /// Flush the sink of `channel`. Failures are counted like emit failures.
    pub fn flush(&self, channel: Channel) {
        let sink = self.registry.get(channel);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.flush()));
        self.settle(channel, &*sink, outcome);
    }

    /// Number of sink failures seen on `channel` since creation.
    pub fn failures(&self, channel: Channel) -> u64 {
        self.failures[channel.index()].load(Ordering::Relaxed)
    }

    fn dispatch(&self, channel: Channel, text: &RenderedText) {
        if text.is_truncated() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                channel = %channel,
                limit = ?self.limit(),
                "formatted output truncated"
            );
        }

        let sink = self.registry.get(channel);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.accept(text.as_str())));
        self.settle(channel, &*sink, outcome);
    }

    fn settle(
        &self,
        channel: Channel,
        sink: &dyn Sink,
        outcome: std::thread::Result<std::io::Result<()>>,
    ) {
        let failed = match outcome {
            Ok(Ok(())) => false,
            Ok(Err(_e)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(channel = %channel, sink = sink.id(), error = %_e, "sink failed");
                true
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(channel = %channel, sink = sink.id(), "sink panicked");
                true
            }
        };
        if failed {
            self.failures[channel.index()].fetch_add(1, Ordering::Relaxed);
        }
        #[cfg(not(feature = "tracing"))]
        let _ = sink;
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(SinkRegistry::new(), RenderLimit::default())
    }
}

fn encode_limit(limit: RenderLimit) -> usize {
    match limit {
        RenderLimit::Unbounded => UNBOUNDED,
        RenderLimit::Chars(n) => n.min(UNBOUNDED - 1),
    }
}
