//! Per-channel sink registry.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::channel::Channel;
use crate::io::{Sink, StderrSink, StdoutSink};

/// Holds the active sink for each channel.
///
/// A channel always has exactly one sink: the registry starts with a
/// baseline pair and every replacement swaps one `Arc` for another under a
/// write lock, so a concurrent reader sees either the old or the new sink.
/// Lookups clone the `Arc` and release the lock before the sink runs.
pub struct SinkRegistry {
    active: [RwLock<Arc<dyn Sink>>; 2],
    baseline: [Arc<dyn Sink>; 2],
}

impl SinkRegistry {
    /// Registry with stdout for the normal channel and stderr for errors.
    pub fn new() -> Self {
        Self::with_baseline(Arc::new(StdoutSink::new()), Arc::new(StderrSink::new()))
    }

    /// Registry with custom baseline sinks, which `reset` returns to.
    pub fn with_baseline(normal: Arc<dyn Sink>, error: Arc<dyn Sink>) -> Self {
        Self {
            active: [RwLock::new(normal.clone()), RwLock::new(error.clone())],
            baseline: [normal, error],
        }
    }

    /// The sink currently installed for `channel`.
    pub fn get(&self, channel: Channel) -> Arc<dyn Sink> {
        self.active[channel.index()]
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install `sink` for `channel`, returning the sink it replaces.
    pub fn set(&self, channel: Channel, sink: Arc<dyn Sink>) -> Arc<dyn Sink> {
        #[cfg(feature = "tracing")]
        tracing::debug!(channel = %channel, sink = sink.id(), "installing sink");

        let mut slot = self.active[channel.index()]
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, sink)
    }

    /// The baseline sink for `channel`.
    pub fn baseline(&self, channel: Channel) -> Arc<dyn Sink> {
        self.baseline[channel.index()].clone()
    }

    /// Put the baseline sink back on `channel`, returning the one removed.
    pub fn reset(&self, channel: Channel) -> Arc<dyn Sink> {
        self.set(channel, self.baseline(channel))
    }

    /// Put the baseline sinks back on both channels.
    pub fn reset_all(&self) {
        for channel in Channel::ALL {
            self.reset(channel);
        }
    }

    /// Install `sink` until the returned guard is dropped, then restore
    /// whatever was installed before.
    pub fn scoped(&self, channel: Channel, sink: Arc<dyn Sink>) -> SinkGuard<'_> {
        let previous = self.set(channel, sink);
        SinkGuard {
            registry: self,
            channel,
            previous: Some(previous),
        }
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("normal", &self.get(Channel::Normal).id().to_string())
            .field("error", &self.get(Channel::Error).id().to_string())
            .finish()
    }
}

/// Restores a channel's previous sink on drop.
#[must_use = "the previous sink is restored as soon as the guard is dropped"]
pub struct SinkGuard<'r> {
    registry: &'r SinkRegistry,
    channel: Channel,
    previous: Option<Arc<dyn Sink>>,
}

impl SinkGuard<'_> {
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl fmt::Debug for SinkGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkGuard")
            .field("channel", &self.channel)
            .finish()
    }
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.registry.set(self.channel, previous);
        }
    }
}
