//! Builder for creating Printer instances.

use std::sync::Arc;

use crate::channel::Channel;
use crate::config::{PrintConfig, SinkKind, SinkSpec};
use crate::error::{ConfigError, Stage};
use crate::format::RenderLimit;
use crate::io::{FileSink, NullSink, Sink, StderrSink, StdoutSink};
use crate::printer::Printer;
use crate::registry::SinkRegistry;

#[derive(Debug, Clone)]
enum SinkSource {
    Spec(SinkSpec),
    Ready(Arc<dyn Sink>),
}

#[derive(Debug)]
pub struct PrinterBuilder {
    baseline: [Arc<dyn Sink>; 2],
    active: [Option<SinkSource>; 2],
    limit: RenderLimit,
}

impl PrinterBuilder {
    pub fn new() -> Self {
        Self {
            baseline: [Arc::new(StdoutSink::new()), Arc::new(StderrSink::new())],
            active: [None, None],
            limit: RenderLimit::default(),
        }
    }

    /// Replace the baseline sink `channel` falls back to on reset.
    pub fn with_baseline(mut self, channel: Channel, sink: Arc<dyn Sink>) -> Self {
        self.baseline[channel.index()] = sink;
        self
    }

    /// Install a ready-made sink on `channel`.
    pub fn with_sink(mut self, channel: Channel, sink: Arc<dyn Sink>) -> Self {
        self.active[channel.index()] = Some(SinkSource::Ready(sink));
        self
    }

    /// Install the sink described by `spec` on `channel`. It is opened by
    /// [`PrinterBuilder::build`].
    pub fn with_spec(mut self, channel: Channel, spec: SinkSpec) -> Self {
        self.active[channel.index()] = Some(SinkSource::Spec(spec));
        self
    }

    pub fn with_limit(mut self, limit: RenderLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> Result<Printer, ConfigError> {
        let [normal_base, error_base] = self.baseline;
        let registry = SinkRegistry::with_baseline(normal_base, error_base);

        for (channel, source) in Channel::ALL.into_iter().zip(self.active) {
            let sink = match source {
                None => continue,
                Some(SinkSource::Ready(sink)) => sink,
                Some(SinkSource::Spec(spec)) => open_sink(&spec)?,
            };
            registry.set(channel, sink);
        }

        Ok(Printer::new(registry, self.limit))
    }

    pub fn from_config(config: &PrintConfig) -> Result<Self, ConfigError> {
        let mut builder = PrinterBuilder::new().with_limit(config.limit());

        for channel in Channel::ALL {
            if let Some(sink_cfg) = config.sink(channel) {
                builder = builder.with_spec(channel, sink_cfg.to_spec(channel)?);
            }
        }

        Ok(builder)
    }
}

impl Default for PrinterBuilder {
    fn default() -> Self {
        PrinterBuilder::new()
    }
}

/// Open the sink a specification describes.
pub fn open_sink(spec: &SinkSpec) -> Result<Arc<dyn Sink>, ConfigError> {
    let sink: Arc<dyn Sink> = match &spec.kind {
        SinkKind::Stdout => Arc::new(StdoutSink::new()),
        SinkKind::Stderr => Arc::new(StderrSink::new()),
        SinkKind::Null => Arc::new(NullSink),
        SinkKind::File { path, policy } => Arc::new(
            FileSink::open(path, *policy)
                .map_err(|e| ConfigError::new(Stage::Open, spec.id.clone(), e))?,
        ),
    };
    Ok(sink)
}
