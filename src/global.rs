//! Process-wide default printer and the global entry points.
//!
//! The global printer is created on first use with stdout/stderr as the
//! channel sinks, so every entry point has a sink from the very first call.
//! Hosts redirect output with [`set_sink`] and restore it either with the
//! returned previous sink, with a [`scoped_sink`] guard, or with [`reset`].

use std::sync::{Arc, OnceLock};

use crate::builder::open_sink;
use crate::channel::Channel;
use crate::config::PrintConfig;
use crate::error::ConfigError;
use crate::format::ArgList;
use crate::io::Sink;
use crate::printer::Printer;
use crate::registry::SinkGuard;

static PRINTER: OnceLock<Printer> = OnceLock::new();

/// The process-wide printer.
pub fn printer() -> &'static Printer {
    PRINTER.get_or_init(Printer::default)
}

/// Render with a pre-packed argument list and emit on the normal channel.
pub fn emit_normal_v(format: &str, args: &ArgList<'_>) {
    printer().emit_v(Channel::Normal, format, args);
}

/// Render with a pre-packed argument list and emit on the error channel.
pub fn emit_error_v(format: &str, args: &ArgList<'_>) {
    printer().emit_v(Channel::Error, format, args);
}

/// Install `sink` on `channel`, returning the sink it replaces.
pub fn set_sink(channel: Channel, sink: Arc<dyn Sink>) -> Arc<dyn Sink> {
    printer().set_sink(channel, sink)
}

/// The sink currently installed on `channel`.
pub fn sink(channel: Channel) -> Arc<dyn Sink> {
    printer().sink(channel)
}

/// Install `sink` on `channel` until the guard is dropped.
pub fn scoped_sink(channel: Channel, sink: Arc<dyn Sink>) -> SinkGuard<'static> {
    printer().scoped_sink(channel, sink)
}

/// Put stdout/stderr back on both channels.
pub fn reset() {
    let printer = printer();
    for channel in Channel::ALL {
        printer.flush(channel);
    }
    printer.registry().reset_all();
}

/// Apply a configuration to the global printer.
///
/// Every configured sink is opened before any is installed, so a failure
/// leaves the current sinks untouched.
pub fn install_config(config: &PrintConfig) -> Result<(), ConfigError> {
    let mut opened = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        if let Some(sink_cfg) = config.sink(channel) {
            opened.push((channel, open_sink(&sink_cfg.to_spec(channel)?)?));
        }
    }

    let printer = printer();
    printer.set_limit(config.limit());
    for (channel, sink) in opened {
        printer.set_sink(channel, sink);
    }
    Ok(())
}
